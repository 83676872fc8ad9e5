//! Hardware abstraction traits for the antiphon bus link
//!
//! The protocol core never touches hardware directly. Everything it needs
//! from a board is expressed as three small traits:
//!
//! - [`HalfDuplexPort`]: a direction-controlled serial channel (UART plus
//!   transceiver driver-enable line)
//! - [`Clock`]: a monotonic millisecond clock for deadlines
//! - [`Delay`]: a busy-wait used for inter-byte clearance
//!
//! Chip-specific HALs implement these; tests substitute in-memory fakes so
//! protocol behavior can be exercised without real timing.

#![no_std]
#![deny(unsafe_code)]

pub mod serial;
pub mod time;

pub use serial::{DataBits, Direction, HalfDuplexPort, Parity, SerialConfig, StopBits};
pub use time::{Clock, Delay};
