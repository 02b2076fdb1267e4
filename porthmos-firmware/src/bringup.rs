//! Board bring-up steps
//!
//! One init operation per dependency, invoked by the sequencer in fixed
//! order. Driver installation cannot fail on this chip, so those stages
//! settle and report ready; the modem link check is the stage that earns
//! the retry loop.

use defmt::*;
use embassy_time::{Delay, Timer};

use porthmos_core::bringup::{BringUp, Outcome};
use porthmos_core::modem::{self, ModemCommand, RESPONSE_CAPACITY};
use porthmos_hal::uart::UartTx;

use crate::ports::{RxPort, TxPort};

/// Settle after the display bus driver install.
const BUS_SETTLE_MS: u64 = 100;

/// Settle after the host console driver install.
const HOST_SETTLE_MS: u64 = 100;

/// Settle after the modem driver install.
const MODEM_SETTLE_MS: u64 = 10;

/// The GPS engine needs a beat after the power command before it accepts
/// anything further.
const GPS_SETTLE_MS: u64 = 100;

/// Bring-up steps bound to the board's modem port.
pub struct BoardBringUp<'a> {
    modem_tx: &'a mut TxPort,
    modem_rx: &'a mut RxPort,
    delay: Delay,
    reply: [u8; RESPONSE_CAPACITY],
}

impl<'a> BoardBringUp<'a> {
    pub fn new(modem_tx: &'a mut TxPort, modem_rx: &'a mut RxPort) -> Self {
        Self {
            modem_tx,
            modem_rx,
            delay: Delay,
            reply: [0; RESPONSE_CAPACITY],
        }
    }
}

impl BringUp for BoardBringUp<'_> {
    async fn display_bus(&mut self) -> Outcome {
        debug!("display bus settling");
        Timer::after_millis(BUS_SETTLE_MS).await;
        Outcome::Ready
    }

    async fn host_port(&mut self) -> Outcome {
        debug!("host uart settling");
        Timer::after_millis(HOST_SETTLE_MS).await;
        Outcome::Ready
    }

    async fn modem_port(&mut self) -> Outcome {
        debug!("modem uart settling");
        Timer::after_millis(MODEM_SETTLE_MS).await;
        Outcome::Ready
    }

    async fn modem_link(&mut self) -> Outcome {
        let outcome =
            modem::probe(self.modem_tx, self.modem_rx, &mut self.delay, &mut self.reply).await;
        if outcome == Outcome::NotReady {
            debug!("modem not answering yet");
        }
        outcome
    }

    async fn gps_power(&mut self) -> Outcome {
        if self.modem_tx.write(ModemCommand::GpsPowerOn.bytes()).await.is_err() {
            warn!("gps power-on write failed");
        }
        Timer::after_millis(GPS_SETTLE_MS).await;
        Outcome::Ready
    }
}
