//! Modem owner task
//!
//! Sole owner of the modem UART after bring-up. Requests arrive on the
//! request channel and go out in order; whatever the modem sends back is
//! drained with a short bounded read and queued for the relay.

use defmt::*;
use embassy_futures::select::{select, Either};

use porthmos_core::modem::RESPONSE_CAPACITY;
use porthmos_core::relay;
use porthmos_hal::uart::{UartRx, UartTx};

use crate::channels::{MODEM_REQUESTS, MODEM_RESPONSES};
use crate::ports::{RxPort, TxPort};

/// Bounded read while draining modem output.
const DRAIN_READ_TIMEOUT_MS: u32 = 20;

/// Modem owner task - writes queued commands, drains replies
#[embassy_executor::task]
pub async fn modem_task(mut tx: TxPort, mut rx: RxPort) {
    info!("Modem task started");

    let mut buf = [0u8; RESPONSE_CAPACITY];

    loop {
        match select(MODEM_REQUESTS.receive(), rx.read(&mut buf, DRAIN_READ_TIMEOUT_MS)).await {
            Either::First(cmd) => {
                trace!("modem <- {}", cmd);
                if tx.write(cmd.bytes()).await.is_err() {
                    warn!("modem write failed, command dropped");
                }
            }
            Either::Second(Ok(0)) => {
                // Nothing arrived inside the window
            }
            Either::Second(Ok(len)) => {
                trace!("modem -> {} bytes", len);
                for chunk in relay::chunks(&buf[..len]) {
                    if MODEM_RESPONSES.try_send(chunk).is_err() {
                        warn!("response channel full, dropping modem output");
                    }
                }
            }
            Either::Second(Err(e)) => {
                warn!("modem read error: {:?}", e);
            }
        }
    }
}
