//! Board wiring and sizing constants
//!
//! Everything here is fixed at compile time; the port records mirror the
//! physical wiring and never change at runtime.

use porthmos_hal::i2c::{I2cConfig, I2cMode};
use porthmos_hal::uart::{DataBits, FlowControl, Parity, StopBits, UartConfig};

/// Host console: UART0 on GPIO 0 (TX) / GPIO 1 (RX).
pub const HOST_PORT: UartConfig = UartConfig {
    baudrate: 115_200,
    data_bits: DataBits::Eight,
    parity: Parity::None,
    stop_bits: StopBits::One,
    flow_control: FlowControl::None,
    tx_pin: 0,
    rx_pin: 1,
};

/// Cellular/GPS modem: UART1 on GPIO 8 (TX) / GPIO 9 (RX).
///
/// SIM808-class modules come up at 9600 baud.
pub const MODEM_PORT: UartConfig = UartConfig {
    baudrate: 9_600,
    data_bits: DataBits::Eight,
    parity: Parity::None,
    stop_bits: StopBits::One,
    flow_control: FlowControl::None,
    tx_pin: 8,
    rx_pin: 9,
};

/// Display panel bus: I2C1 on GPIO 14 (SDA) / GPIO 15 (SCL).
pub const DISPLAY_BUS: I2cConfig = I2cConfig {
    mode: I2cMode::Master,
    sda_pin: 14,
    scl_pin: 15,
    sda_pullup: true,
    scl_pullup: true,
    frequency: I2cConfig::FAST_PLUS_HZ,
};

/// UART driver ring buffers hold two full reads' worth.
pub const UART_RING_SIZE: usize = porthmos_core::modem::RESPONSE_CAPACITY * 2;

/// Rail and modem boot settle before bring-up begins.
pub const POWER_ON_SETTLE_MS: u64 = 1500;
