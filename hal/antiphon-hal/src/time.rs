//! Time source abstractions
//!
//! The protocol has no cooperative suspension primitive - waiting means
//! polling against a wall-clock deadline. Both the clock and the short
//! busy-wait delay are injected so host tests can simulate time instead of
//! sleeping.

/// Monotonic millisecond clock
pub trait Clock {
    /// Current timestamp in milliseconds
    ///
    /// Must be monotonic over the life of a handshake; wrap-around is
    /// tolerated because deadlines are computed with wrapping subtraction.
    fn now_ms(&mut self) -> u32;
}

/// Microsecond busy-wait
pub trait Delay {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}
