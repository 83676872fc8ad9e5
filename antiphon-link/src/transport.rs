//! Byte-level transport over a half-duplex port
//!
//! Wraps the raw port capability with the two operations the handshake
//! needs: emitting a fully framed byte sequence with the required direction
//! bracketing, and accumulating incoming bytes until the doubled END
//! terminator appears.

use antiphon_hal::{Clock, Delay, Direction, HalfDuplexPort};
use antiphon_protocol::{validate_framing, FrameError, END, MAX_FRAME_LEN};
use heapless::Vec;

/// Result of one terminator-bounded read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// A terminated, well-framed sequence of this many bytes was read
    Complete(usize),
    /// The deadline passed before a terminator appeared
    TimedOut,
    /// The scratch buffer filled without a terminator
    Overflow,
    /// A terminated sequence arrived but failed envelope validation
    Malformed(FrameError),
}

/// Transmit a byte sequence with direction bracketing
///
/// Enables the driver, writes every byte with the inter-byte clearance
/// delay, flushes until the bytes have physically left, and releases the
/// bus. The release happens on every exit path: a node that holds the
/// driver enabled while idle blocks the shared bus for all peers.
pub fn write_frame<P, D>(
    port: &mut P,
    delay: &mut D,
    bytes: &[u8],
    inter_byte_delay_us: u32,
) -> Result<(), P::Error>
where
    P: HalfDuplexPort,
    D: Delay,
{
    port.set_direction(Direction::Transmit)?;
    let sent = send_all(port, delay, bytes, inter_byte_delay_us);
    let released = port.set_direction(Direction::Receive);
    sent?;
    released
}

fn send_all<P, D>(
    port: &mut P,
    delay: &mut D,
    bytes: &[u8],
    inter_byte_delay_us: u32,
) -> Result<(), P::Error>
where
    P: HalfDuplexPort,
    D: Delay,
{
    for &byte in bytes {
        port.write_byte(byte)?;
        delay.delay_us(inter_byte_delay_us);
    }
    port.flush()
}

/// Accumulate bytes until the doubled END terminator
///
/// Polls the port against a single deadline covering the whole read; the
/// first byte and every inter-byte gap share the same budget. On a
/// terminator the accumulated sequence is immediately re-checked against
/// the frame envelope. Bytes after the terminator are left unread.
pub fn read_until_terminator<P, C>(
    port: &mut P,
    clock: &mut C,
    scratch: &mut Vec<u8, MAX_FRAME_LEN>,
    timeout_ms: u32,
) -> Result<ReadOutcome, P::Error>
where
    P: HalfDuplexPort,
    C: Clock,
{
    scratch.clear();
    port.set_direction(Direction::Receive)?;

    let start = clock.now_ms();
    loop {
        if port.byte_available() {
            let byte = port.read_byte()?;
            if scratch.push(byte).is_err() {
                return Ok(ReadOutcome::Overflow);
            }
            let len = scratch.len();
            if len >= 2 && scratch[len - 1] == END && scratch[len - 2] == END {
                break;
            }
        } else if clock.now_ms().wrapping_sub(start) >= timeout_ms {
            return Ok(ReadOutcome::TimedOut);
        }
    }

    match validate_framing(scratch) {
        Ok(()) => Ok(ReadOutcome::Complete(scratch.len())),
        Err(e) => Ok(ReadOutcome::Malformed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockClock, MockDelay, MockPort};
    use antiphon_protocol::{Frame, START};

    #[test]
    fn write_frame_brackets_direction() {
        let mut port = MockPort::new();
        let mut delay = MockDelay::default();
        let frame = Frame::encode(&[1, 2, 3]).unwrap();

        write_frame(&mut port, &mut delay, frame.as_bytes(), 500).unwrap();

        assert_eq!(port.tx.as_slice(), frame.as_bytes());
        assert_eq!(
            port.directions.as_slice(),
            &[Direction::Transmit, Direction::Receive]
        );
        assert_eq!(delay.total_us, 500 * frame.len() as u32);
        assert_eq!(port.flushes, 1);
    }

    #[test]
    fn write_frame_releases_bus_on_write_failure() {
        let mut port = MockPort::new();
        port.fail_writes = true;
        let mut delay = MockDelay::default();

        let result = write_frame(&mut port, &mut delay, &[0xAB], 100);

        assert!(result.is_err());
        assert_eq!(port.directions.last(), Some(&Direction::Receive));
    }

    #[test]
    fn read_stops_at_terminator_and_leaves_trailing_bytes() {
        let mut port = MockPort::new();
        let frame = Frame::encode(&[7, 8]).unwrap();
        port.load_rx(frame.as_bytes());
        port.load_rx(&[0x06]); // response byte queued behind the frame
        let mut clock = MockClock::default();
        let mut scratch = Vec::new();

        let outcome = read_until_terminator(&mut port, &mut clock, &mut scratch, 10).unwrap();

        assert_eq!(outcome, ReadOutcome::Complete(frame.len()));
        assert_eq!(scratch.as_slice(), frame.as_bytes());
        assert_eq!(port.rx.len(), 1);
    }

    #[test]
    fn read_times_out_on_silent_port() {
        let mut port = MockPort::new();
        let mut clock = MockClock::default();
        let mut scratch = Vec::new();

        let outcome = read_until_terminator(&mut port, &mut clock, &mut scratch, 5).unwrap();

        assert_eq!(outcome, ReadOutcome::TimedOut);
        assert!(clock.now >= 5);
    }

    #[test]
    fn read_times_out_on_stalled_mid_frame() {
        let mut port = MockPort::new();
        port.load_rx(&[START, 0x11, !0x11]); // no terminator ever arrives
        let mut clock = MockClock::default();
        let mut scratch = Vec::new();

        let outcome = read_until_terminator(&mut port, &mut clock, &mut scratch, 5).unwrap();

        assert_eq!(outcome, ReadOutcome::TimedOut);
    }

    #[test]
    fn read_reports_overflow_without_terminator() {
        let mut port = MockPort::new();
        let noise = [0x55u8; MAX_FRAME_LEN + 4];
        port.load_rx(&noise);
        let mut clock = MockClock::default();
        let mut scratch = Vec::new();

        let outcome = read_until_terminator(&mut port, &mut clock, &mut scratch, 10).unwrap();

        assert_eq!(outcome, ReadOutcome::Overflow);
    }

    #[test]
    fn read_rejects_terminated_sequence_with_bad_start() {
        let mut port = MockPort::new();
        port.load_rx(&[0x7E, 0x01, !0x01, END, END]);
        let mut clock = MockClock::default();
        let mut scratch = Vec::new();

        let outcome = read_until_terminator(&mut port, &mut clock, &mut scratch, 10).unwrap();

        assert_eq!(outcome, ReadOutcome::Malformed(FrameError::BadStart));
    }
}
