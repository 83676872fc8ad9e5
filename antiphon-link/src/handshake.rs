//! Send/echo/acknowledge handshake
//!
//! Both roles run one pass of their state machine per call and return a
//! terminal result; there is no internal retry loop. The sender transmits a
//! frame, waits for the peer's verbatim echo, compares the two copies and
//! answers with ACK or NAK. The receiver validates an incoming frame's
//! envelope, echoes the exact wire image back and waits for the verdict.
//!
//! Sender states: Encoding -> Transmitting -> AwaitingEcho -> Comparing ->
//! Acking/Nacking -> Done. Receiver states: AwaitingFrame ->
//! ValidatingFrame -> Echoing -> AwaitingResponse -> Extracting/Failing ->
//! Done.

use antiphon_hal::{Clock, Delay, HalfDuplexPort};
use antiphon_protocol::{
    extract_payload, frames_match, Frame, FrameError, ACK, MAX_FRAME_LEN, MAX_PAYLOAD, NAK,
};
use heapless::Vec;

use crate::config::LinkConfig;
use crate::session::SessionStats;
use crate::transport::{self, ReadOutcome};

/// Terminal result of one handshake attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Payload length outside bounds, rejected before any I/O
    InvalidLength,
    /// No byte pending at receive entry; call again later
    NoData,
    /// The exchange budget elapsed with nothing received
    Timeout,
    /// Bytes arrived but never formed a terminated frame
    ShortRead,
    /// A terminated sequence arrived with a broken envelope
    Framing(FrameError),
    /// The echoed frame differed from the transmitted one
    RedundancyMismatch,
    /// The peer answered the echo with NAK
    Rejected,
    /// The peer answered with something other than ACK or NAK
    UnexpectedResponse(u8),
    /// The underlying port reported a hardware fault
    Port,
}

/// One endpoint of the echo-verified link
///
/// Owns a single half-duplex port together with the clock and delay
/// capabilities, the reusable receive scratch buffer and the session
/// counters. The scratch buffer belongs exclusively to the in-flight call;
/// nothing else survives between calls except the counters.
pub struct Link<P, C, D> {
    port: P,
    clock: C,
    delay: D,
    config: LinkConfig,
    scratch: Vec<u8, MAX_FRAME_LEN>,
    stats: SessionStats,
}

impl<P, C, D> Link<P, C, D>
where
    P: HalfDuplexPort,
    C: Clock,
    D: Delay,
{
    /// Create a link endpoint over one port
    pub fn new(port: P, clock: C, delay: D, config: LinkConfig) -> Self {
        Self {
            port,
            clock,
            delay,
            config,
            scratch: Vec::new(),
            stats: SessionStats::new(),
        }
    }

    /// Session counters, updated by the sender role
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Link configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Direct access to the underlying port, for bring-up and tests
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Send one payload and wait for the acknowledged echo
    ///
    /// Returns `Ok(())` iff the peer echoed the frame back bit-exact and
    /// the ACK round completed. Callers retry by invoking again; each
    /// attempt is bounded by the derived exchange budget.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        let result = self.send_once(payload);
        match result {
            Ok(()) => self.stats.record_success(),
            Err(_) => self.stats.record_failure(),
        }
        result
    }

    fn send_once(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        // Encoding
        let frame = Frame::encode(payload).map_err(|_| LinkError::InvalidLength)?;
        let gap_us = self.config.inter_byte_delay_us();

        // Transmitting
        transport::write_frame(&mut self.port, &mut self.delay, frame.as_bytes(), gap_us)
            .map_err(|_| LinkError::Port)?;

        // AwaitingEcho
        let budget_ms = self.config.exchange_budget_ms(frame.len());
        if !self.wait_for_byte(budget_ms) {
            return Err(LinkError::Timeout);
        }
        let outcome = transport::read_until_terminator(
            &mut self.port,
            &mut self.clock,
            &mut self.scratch,
            budget_ms,
        )
        .map_err(|_| LinkError::Port)?;
        match outcome {
            ReadOutcome::Complete(_) => {}
            ReadOutcome::Malformed(e) => return Err(LinkError::Framing(e)),
            // The peer sent nothing intelligible; no NAK goes out on this
            // path.
            ReadOutcome::TimedOut | ReadOutcome::Overflow => return Err(LinkError::ShortRead),
        }

        // Comparing, then Acking/Nacking
        if frames_match(frame.as_bytes(), &self.scratch) {
            self.write_response(ACK)?;
            Ok(())
        } else {
            self.write_response(NAK)?;
            Err(LinkError::RedundancyMismatch)
        }
    }

    /// Accept one incoming frame, echo it and deliver the payload
    ///
    /// Returns immediately with [`LinkError::NoData`] when nothing is
    /// pending; the expected usage is an outer loop that polls this until
    /// a handshake completes.
    ///
    /// The verdict byte is judged strictly: anything other than ACK or
    /// NAK, a zero byte included, fails the attempt as
    /// [`LinkError::UnexpectedResponse`].
    pub fn receive(&mut self) -> Result<Vec<u8, MAX_PAYLOAD>, LinkError> {
        // AwaitingFrame: non-blocking entry
        if !self.port.byte_available() {
            return Err(LinkError::NoData);
        }

        // ValidatingFrame
        let budget_ms = self.config.exchange_budget_ms(MAX_FRAME_LEN);
        let outcome = transport::read_until_terminator(
            &mut self.port,
            &mut self.clock,
            &mut self.scratch,
            budget_ms,
        )
        .map_err(|_| LinkError::Port)?;
        let count = match outcome {
            ReadOutcome::Complete(count) => count,
            ReadOutcome::Malformed(e) => return Err(LinkError::Framing(e)),
            ReadOutcome::TimedOut | ReadOutcome::Overflow => return Err(LinkError::ShortRead),
        };

        // Echoing: the exact wire image goes back, even if redundancy pairs
        // are internally inconsistent. Judging them is the sender's job.
        let gap_us = self.config.inter_byte_delay_us();
        transport::write_frame(&mut self.port, &mut self.delay, &self.scratch, gap_us)
            .map_err(|_| LinkError::Port)?;

        // AwaitingResponse, then Extracting/Failing
        let budget_ms = self.config.exchange_budget_ms(count);
        match self.wait_and_read(budget_ms)? {
            Some(byte) if byte == ACK => Ok(extract_payload(&self.scratch)),
            Some(byte) if byte == NAK => Err(LinkError::Rejected),
            Some(byte) => Err(LinkError::UnexpectedResponse(byte)),
            None => Err(LinkError::Timeout),
        }
    }

    /// Transmit a single ACK/NAK byte with direction bracketing
    fn write_response(&mut self, byte: u8) -> Result<(), LinkError> {
        let gap_us = self.config.inter_byte_delay_us();
        transport::write_frame(&mut self.port, &mut self.delay, &[byte], gap_us)
            .map_err(|_| LinkError::Port)
    }

    /// Poll for availability against a deadline
    fn wait_for_byte(&mut self, timeout_ms: u32) -> bool {
        let start = self.clock.now_ms();
        loop {
            if self.port.byte_available() {
                return true;
            }
            if self.clock.now_ms().wrapping_sub(start) >= timeout_ms {
                return false;
            }
        }
    }

    /// Read one byte within the deadline, `None` on budget exhaustion
    fn wait_and_read(&mut self, timeout_ms: u32) -> Result<Option<u8>, LinkError> {
        if !self.wait_for_byte(timeout_ms) {
            return Ok(None);
        }
        self.port
            .read_byte()
            .map(Some)
            .map_err(|_| LinkError::Port)
    }
}
