//! Board-agnostic handshake engine for the antiphon bus link
//!
//! Two or more nodes share a two-wire differential bus through
//! direction-controlled transceivers. This crate drives one port through the
//! full exchange for a single payload:
//!
//! ```text
//! sender                               receiver
//!   │ ── frame (data/inverse pairs) ──▶ │
//!   │ ◀── verbatim echo of the frame ── │
//!   │ ── ACK (match) / NAK (mismatch) ─▶ │
//! ```
//!
//! The engine is fully synchronous and single-threaded: waiting means
//! polling the port against a deadline on an injected millisecond clock.
//! One call runs one handshake attempt to completion and returns; there is
//! no internal retry. Callers loop on [`Link::send`] / [`Link::receive`]
//! until success, relying on the bounded per-attempt timeout.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod handshake;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::LinkConfig;
pub use handshake::{Link, LinkError};
pub use session::SessionStats;
