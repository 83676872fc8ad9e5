//! Antiphon wire format
//!
//! This crate defines the frame encoding used on the shared half-duplex bus.
//! There is no hardware CRC on the target UARTs, so integrity comes from
//! per-byte redundancy plus the echo comparison performed by the link layer.
//!
//! # Frame layout
//!
//! ```text
//! ┌───────┬──────┬───────┬─────┬──────────┬────────────┬─────┬─────┐
//! │ START │ d0   │ ~d0   │ ... │ d(n-1)   │ ~d(n-1)    │ END │ END │
//! │ 1B    │ 1B   │ 1B    │     │ 1B       │ 1B         │ 1B  │ 1B  │
//! └───────┴──────┴───────┴─────┴──────────┴────────────┴─────┴─────┘
//! ```
//!
//! Every data byte is immediately followed by its bitwise complement, and
//! the frame ends with a doubled END marker. Frame length is `2n + 3` for an
//! n-byte payload. The marker bytes are ASCII control values chosen to be
//! unlikely in typical payloads; collision with payload content is a known
//! limitation, not a protocol violation.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod frame;

pub use frame::{
    extract_payload, frames_match, validate_framing, Frame, FrameError, ACK, END, MAX_FRAME_LEN,
    MAX_PAYLOAD, NAK, START,
};
