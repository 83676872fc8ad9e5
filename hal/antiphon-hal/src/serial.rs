//! Half-duplex serial port abstractions
//!
//! Provides the trait for a direction-controlled serial channel - a UART
//! whose transceiver (RS-485 style) is switched between driving the bus and
//! listening to it via an enable line.

/// Transceiver direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Driver enabled, node owns the bus
    Transmit,
    /// Driver disabled, node listens
    Receive,
}

/// A direction-controlled half-duplex serial channel
///
/// One instance corresponds to one physical port (UART + transceiver).
/// Implementations must guarantee that [`set_direction`](Self::set_direction)
/// takes effect before the call returns; the protocol core relies on it to
/// bracket every transmission.
pub trait HalfDuplexPort {
    /// Error type for port operations
    type Error;

    /// Switch the transceiver between transmit and receive
    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;

    /// Check whether at least one received byte is ready to read
    fn byte_available(&mut self) -> bool;

    /// Read the next received byte
    ///
    /// Only meaningful after [`byte_available`](Self::byte_available)
    /// returned true.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Queue a byte for transmission
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Block until every queued byte has physically left the shift register
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Serial line configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
