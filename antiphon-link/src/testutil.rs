//! In-memory fakes for the HAL capability traits
//!
//! The mock port records direction switches and transmitted bytes, and
//! serves reads from a pre-loaded queue; the mock clock advances one
//! millisecond per reading so poll loops observe time passing without
//! sleeping.

use antiphon_hal::{Clock, Delay, Direction, HalfDuplexPort};
use heapless::{Deque, Vec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPortError {
    WriteFailed,
    RxEmpty,
}

pub struct MockPort {
    pub rx: Deque<u8, 256>,
    pub tx: Vec<u8, 256>,
    pub directions: Vec<Direction, 64>,
    pub flushes: u32,
    pub fail_writes: bool,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
            directions: Vec::new(),
            flushes: 0,
            fail_writes: false,
        }
    }

    /// Queue bytes to be served by subsequent reads
    pub fn load_rx(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).unwrap();
        }
    }
}

impl HalfDuplexPort for MockPort {
    type Error = MockPortError;

    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        self.directions.push(direction).unwrap();
        Ok(())
    }

    fn byte_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.rx.pop_front().ok_or(MockPortError::RxEmpty)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockPortError::WriteFailed);
        }
        self.tx.push(byte).unwrap();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockClock {
    pub now: u32,
}

impl Clock for MockClock {
    fn now_ms(&mut self) -> u32 {
        self.now += 1;
        self.now
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_us: u32,
}

impl Delay for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += us;
    }
}
