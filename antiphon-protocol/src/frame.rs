//! Frame encoding, validation and comparison.
//!
//! Frame format:
//! - START (1 byte): 0x02 synchronization byte
//! - DATA/INVERSE pairs (2 bytes each): payload byte followed by its
//!   bitwise complement
//! - END (2 bytes): doubled 0x03 terminator

use heapless::Vec;

/// Frame start marker (ASCII STX)
pub const START: u8 = 0x02;

/// Frame end marker (ASCII ETX), always doubled at frame end
pub const END: u8 = 0x03;

/// Positive acknowledgement byte (ASCII ACK)
pub const ACK: u8 = 0x06;

/// Negative acknowledgement byte (ASCII NAK)
pub const NAK: u8 = 0x15;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD: usize = 32;

/// Maximum complete frame size (START + data/inverse pairs + END + END)
pub const MAX_FRAME_LEN: usize = 2 * MAX_PAYLOAD + 3;

/// Shortest legal frame: START + one data/inverse pair + END + END
const MIN_FRAME_LEN: usize = 5;

/// Errors that can occur during frame encoding or validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload length outside 1..=MAX_PAYLOAD
    InvalidLength,
    /// First byte is not the START marker
    BadStart,
    /// Frame does not end with a doubled END marker
    BadEnd,
}

/// An encoded wire frame
///
/// Built once per send attempt and immutable afterwards; the link layer
/// compares it byte-for-byte against the frame echoed by the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// Encode a payload into a wire frame
    ///
    /// Each payload byte is written followed by its bitwise complement,
    /// bracketed by START and the doubled END marker.
    pub fn encode(payload: &[u8]) -> Result<Self, FrameError> {
        if payload.is_empty() || payload.len() > MAX_PAYLOAD {
            return Err(FrameError::InvalidLength);
        }

        let mut bytes = Vec::new();
        // Capacity is sized for MAX_PAYLOAD, so these pushes cannot fail
        // for a length-checked payload.
        let _ = bytes.push(START);
        for &b in payload {
            let _ = bytes.push(b);
            let _ = bytes.push(!b);
        }
        let _ = bytes.push(END);
        let _ = bytes.push(END);

        Ok(Self { bytes })
    }

    /// The encoded bytes, ready for the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded frame length (`2n + 3` for an n-byte payload)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: a frame carries at least one data/inverse pair
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Check the frame envelope of a received byte sequence
///
/// Verifies the START marker and the doubled END terminator, distinguishing
/// the two failures for diagnostics. Redundancy pairs are not inspected
/// here; that judgement belongs to the sender's echo comparison.
pub fn validate_framing(buf: &[u8]) -> Result<(), FrameError> {
    if buf.len() < MIN_FRAME_LEN {
        return Err(FrameError::BadEnd);
    }
    if buf[0] != START {
        return Err(FrameError::BadStart);
    }
    if buf[buf.len() - 1] != END || buf[buf.len() - 2] != END {
        return Err(FrameError::BadEnd);
    }
    Ok(())
}

/// Compare an original frame against its echo
///
/// True iff both frames carry the START and END markers and every data
/// position (odd index) is bit-identical between the two. Data bytes are
/// only required to match pairwise between the two frames; a data byte is
/// not re-checked against its in-frame complement. Both inputs are expected
/// to have passed [`validate_framing`] already.
pub fn frames_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() || a.len() < MIN_FRAME_LEN {
        return false;
    }
    if a[0] != START || b[0] != START {
        return false;
    }
    if a[a.len() - 1] != END || b[b.len() - 1] != END {
        return false;
    }
    // Data bytes sit at odd indices; the last pair ends at len - 4.
    let mut i = 1;
    while i < a.len() - 2 {
        if a[i] != b[i] {
            return false;
        }
        i += 2;
    }
    true
}

/// Recover the payload from a validated frame
///
/// Payload length is `(frame_len - 3) / 2`; data bytes sit at odd indices.
/// Assumes the buffer already passed [`validate_framing`].
pub fn extract_payload(buf: &[u8]) -> Vec<u8, MAX_PAYLOAD> {
    let count = (buf.len().saturating_sub(3)) / 2;
    let mut payload = Vec::new();
    for i in 0..count.min(MAX_PAYLOAD) {
        let _ = payload.push(buf[2 * i + 1]);
    }
    payload
}
