//! Adapters between the embassy drivers and the port traits
//!
//! The buffered UART halves provide interrupt-driven ring buffers; these
//! wrappers add the bounded-read semantics the core logic is written
//! against, and translate the board's port records into driver configs.

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};

use porthmos_hal::i2c::I2cConfig;
use porthmos_hal::uart::{self, UartConfig, UartRx, UartTx};

/// Build the embassy UART config for a port record.
///
/// Flow control is not part of the driver config on this chip; both ports
/// are wired without RTS/CTS and use the plain constructors.
pub fn uart_config(cfg: &UartConfig) -> embassy_rp::uart::Config {
    let mut out = embassy_rp::uart::Config::default();
    out.baudrate = cfg.baudrate;
    out.data_bits = match cfg.data_bits {
        uart::DataBits::Five => embassy_rp::uart::DataBits::DataBits5,
        uart::DataBits::Six => embassy_rp::uart::DataBits::DataBits6,
        uart::DataBits::Seven => embassy_rp::uart::DataBits::DataBits7,
        uart::DataBits::Eight => embassy_rp::uart::DataBits::DataBits8,
    };
    out.parity = match cfg.parity {
        uart::Parity::None => embassy_rp::uart::Parity::ParityNone,
        uart::Parity::Even => embassy_rp::uart::Parity::ParityEven,
        uart::Parity::Odd => embassy_rp::uart::Parity::ParityOdd,
    };
    out.stop_bits = match cfg.stop_bits {
        uart::StopBits::One => embassy_rp::uart::StopBits::STOP1,
        uart::StopBits::Two => embassy_rp::uart::StopBits::STOP2,
    };
    out
}

/// Build the embassy I2C config for a bus record.
///
/// Pull-up enables are wiring documentation on this chip; the driver
/// configures the pad pull-ups itself.
pub fn i2c_config(cfg: &I2cConfig) -> embassy_rp::i2c::Config {
    let mut out = embassy_rp::i2c::Config::default();
    out.frequency = cfg.frequency;
    out
}

/// Transmit half of a port.
pub struct TxPort {
    inner: BufferedUartTx,
}

impl TxPort {
    pub fn new(inner: BufferedUartTx) -> Self {
        Self { inner }
    }
}

impl UartTx for TxPort {
    type Error = embassy_rp::uart::Error;

    async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.inner.write_all(data).await?;
        Ok(data.len())
    }
}

/// Receive half of a port.
pub struct RxPort {
    inner: BufferedUartRx,
}

impl RxPort {
    pub fn new(inner: BufferedUartRx) -> Self {
        Self { inner }
    }
}

impl UartRx for RxPort {
    type Error = embassy_rp::uart::Error;

    async fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        match with_timeout(Duration::from_millis(timeout_ms as u64), self.inner.read(buf)).await {
            Ok(result) => result,
            Err(_) => Ok(0),
        }
    }
}
