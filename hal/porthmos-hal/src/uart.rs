//! UART serial communication abstractions
//!
//! Provides traits for bounded serial I/O that can be implemented by
//! chip-specific adapters, and the fixed per-port configuration record.

/// UART transmitter
///
/// Async trait for sending data over a UART interface.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write the whole of `data` to the UART
    ///
    /// Returns the number of bytes written, which equals `data.len()`
    /// on success.
    async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;
}

/// UART receiver
///
/// Async trait for receiving data from a UART interface.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read whatever the UART has produced, up to `buf.len()` bytes
    ///
    /// Blocks until at least one byte is available or `timeout_ms` has
    /// elapsed, whichever comes first. `Ok(0)` means nothing arrived
    /// within the timeout; it is not an error.
    async fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;
}

/// UART configuration
///
/// Fixed at compile time, one record per physical port.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Hardware flow control
    pub flow_control: FlowControl,
    /// GPIO number of the TX pin
    pub tx_pin: u8,
    /// GPIO number of the RX pin
    pub rx_pin: u8,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            tx_pin: 0,
            rx_pin: 1,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
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

/// Hardware flow control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowControl {
    None,
    RtsCts,
}
