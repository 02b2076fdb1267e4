//! Modem-to-host relay task
//!
//! Runs on the second core. Once a second it forwards everything the modem
//! owner has queued to the host console, verbatim - partial sentences
//! included. A cycle with nothing pending writes nothing.

use defmt::*;
use embassy_time::{Duration, Ticker};

use porthmos_hal::uart::UartTx;

use crate::channels::MODEM_RESPONSES;
use crate::ports::TxPort;

/// Interval between relay cycles.
const RELAY_INTERVAL_MS: u64 = 1000;

/// Relay task - drains modem output to the host console
#[embassy_executor::task]
pub async fn relay_task(mut host: TxPort) {
    info!("Relay task started");

    let mut ticker = Ticker::every(Duration::from_millis(RELAY_INTERVAL_MS));

    loop {
        while let Ok(chunk) = MODEM_RESPONSES.try_receive() {
            if host.write(&chunk).await.is_err() {
                warn!("host write failed, dropping {} bytes", chunk.len());
            }
        }
        ticker.next().await;
    }
}
