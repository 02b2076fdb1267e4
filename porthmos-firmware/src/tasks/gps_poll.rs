//! GPS fix polling task
//!
//! Fire-and-forget: a fix request goes out every second whether or not the
//! previous one was ever answered. The modem owner writes it; the reply,
//! if any, reaches the host through the relay like all other modem output.

use defmt::*;
use embassy_time::{Duration, Ticker};

use porthmos_core::modem::ModemCommand;

use crate::channels::MODEM_REQUESTS;

/// Interval between fix requests.
const FIX_POLL_INTERVAL_MS: u64 = 1000;

/// GPS poll task - requests a fix once a second
#[embassy_executor::task]
pub async fn gps_poll_task() {
    info!("GPS poll task started");

    let mut ticker = Ticker::every(Duration::from_millis(FIX_POLL_INTERVAL_MS));

    loop {
        if MODEM_REQUESTS.try_send(ModemCommand::RequestFix).is_err() {
            warn!("request queue full, dropping fix request");
        }
        ticker.next().await;
    }
}
