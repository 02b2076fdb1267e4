//! Porthmos - Modem/GPS Bridge Firmware
//!
//! Main firmware binary for RP2040-based tracker boards. Brings the
//! display bus, both UARTs, the modem link, and the GPS engine into a
//! known-good state, then ferries raw GPS output from the cellular modem
//! across to the host console.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::I2c;
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use porthmos_core::bringup::bring_up;

mod board;
mod bringup;
mod channels;
mod ports;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART ring buffers (must live forever)
static HOST_TX_BUF: StaticCell<[u8; board::UART_RING_SIZE]> = StaticCell::new();
static HOST_RX_BUF: StaticCell<[u8; board::UART_RING_SIZE]> = StaticCell::new();
static MODEM_TX_BUF: StaticCell<[u8; board::UART_RING_SIZE]> = StaticCell::new();
static MODEM_RX_BUF: StaticCell<[u8; board::UART_RING_SIZE]> = StaticCell::new();

// Second-core executor for the relay task
static mut CORE1_STACK: Stack<4096> = Stack::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Porthmos firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Let the board rails and the modem's own boot settle before touching
    // any peripheral.
    Timer::after_millis(board::POWER_ON_SETTLE_MS).await;

    // Display bus. The panel is driven, not rendered to, by this firmware;
    // installing the bus driver is all bring-up needs.
    let _display_bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, ports::i2c_config(&board::DISPLAY_BUS));

    // Host console UART
    let host_tx_buf = HOST_TX_BUF.init([0u8; board::UART_RING_SIZE]);
    let host_rx_buf = HOST_RX_BUF.init([0u8; board::UART_RING_SIZE]);

    let host = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, ports::uart_config(&board::HOST_PORT));
    let host = host.into_buffered(Irqs, host_tx_buf, host_rx_buf);
    // The console is write-only: nothing commands this device from the host
    // side.
    let (host_tx, _host_rx) = host.split();
    let host_tx = ports::TxPort::new(host_tx);

    // Modem UART
    let modem_tx_buf = MODEM_TX_BUF.init([0u8; board::UART_RING_SIZE]);
    let modem_rx_buf = MODEM_RX_BUF.init([0u8; board::UART_RING_SIZE]);

    let modem = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, ports::uart_config(&board::MODEM_PORT));
    let modem = modem.into_buffered(Irqs, modem_tx_buf, modem_rx_buf);
    let (modem_tx, modem_rx) = modem.split();
    let mut modem_tx = ports::TxPort::new(modem_tx);
    let mut modem_rx = ports::RxPort::new(modem_rx);

    info!("Drivers installed");

    // Ordered bring-up: every stage retries until ready, so reaching the
    // other side means the modem answered and the GPS engine is powered.
    {
        let mut steps = bringup::BoardBringUp::new(&mut modem_tx, &mut modem_rx);
        bring_up(&mut steps, &mut Delay).await;
    }
    info!("Bring-up complete");

    // The relay gets its own core so host-side output is never stuck
    // behind modem traffic.
    #[allow(static_mut_refs)]
    let core1_stack = unsafe { &mut CORE1_STACK };
    spawn_core1(p.CORE1, core1_stack, move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| spawner.spawn(tasks::relay_task(host_tx)).unwrap())
    });

    spawner.spawn(tasks::modem_task(modem_tx, modem_rx)).unwrap();
    spawner.spawn(tasks::gps_poll_task()).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
