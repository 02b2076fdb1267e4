//! Device bring-up sequencing
//!
//! Start-up is modeled as an explicit state machine: one stage per hardware
//! dependency, walked in a fixed order. A stage that reports `NotReady` is
//! retried after a stage-specific backoff, forever; only `Ready` advances.
//! There is no overall timeout and no escalation: with nobody around to
//! press reset, giving up is not a recoverable state.

use embedded_hal_async::delay::DelayNs;

/// Result of one initialization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Ready,
    NotReady,
}

/// Bring-up stages, in the order they must complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Display I2C bus driver
    DisplayBus,
    /// Host console UART driver
    HostPort,
    /// Modem UART driver
    ModemPort,
    /// Modem answering the liveness probe
    ModemLink,
    /// GPS engine powered up
    GpsPower,
    /// All dependencies ready
    Complete,
}

impl Stage {
    /// First stage of the fixed order.
    pub const FIRST: Stage = Stage::DisplayBus;

    /// Backoff between retries of this stage.
    ///
    /// Driver installs recover near-instantly. The link check has to give
    /// the modem firmware time to boot, and the GPS engine is slower still.
    pub fn backoff_ms(self) -> u32 {
        match self {
            Stage::DisplayBus | Stage::HostPort | Stage::ModemPort => 10,
            Stage::ModemLink => 100,
            Stage::GpsPower => 1000,
            Stage::Complete => 0,
        }
    }

    /// Stage name for log output.
    pub fn name(self) -> &'static str {
        match self {
            Stage::DisplayBus => "display bus",
            Stage::HostPort => "host uart",
            Stage::ModemPort => "modem uart",
            Stage::ModemLink => "modem link",
            Stage::GpsPower => "gps power",
            Stage::Complete => "complete",
        }
    }

    /// Next stage after an attempt: `Ready` advances, `NotReady` stays put.
    pub fn advance(self, outcome: Outcome) -> Stage {
        match outcome {
            Outcome::Ready => self.next(),
            Outcome::NotReady => self,
        }
    }

    fn next(self) -> Stage {
        match self {
            Stage::DisplayBus => Stage::HostPort,
            Stage::HostPort => Stage::ModemPort,
            Stage::ModemPort => Stage::ModemLink,
            Stage::ModemLink => Stage::GpsPower,
            Stage::GpsPower => Stage::Complete,
            Stage::Complete => Stage::Complete,
        }
    }
}

/// One initialization operation per bring-up stage.
///
/// Each operation performs its stage's hardware work and reports whether
/// the dependency came up. The sequencer invokes an operation again only if
/// the previous attempt reported `NotReady`, so a stage's side effects run
/// exactly once per success.
pub trait BringUp {
    async fn display_bus(&mut self) -> Outcome;
    async fn host_port(&mut self) -> Outcome;
    async fn modem_port(&mut self) -> Outcome;
    async fn modem_link(&mut self) -> Outcome;
    async fn gps_power(&mut self) -> Outcome;
}

/// Drive `board` through every stage in order.
///
/// Retries each stage with its backoff until it reports `Ready`; returns
/// only once the final stage has succeeded.
pub async fn bring_up<B: BringUp, D: DelayNs>(board: &mut B, delay: &mut D) {
    let mut stage = Stage::FIRST;

    loop {
        let outcome = match stage {
            Stage::DisplayBus => board.display_bus().await,
            Stage::HostPort => board.host_port().await,
            Stage::ModemPort => board.modem_port().await,
            Stage::ModemLink => board.modem_link().await,
            Stage::GpsPower => board.gps_power().await,
            Stage::Complete => break,
        };

        match outcome {
            Outcome::Ready => stage = stage.advance(Outcome::Ready),
            Outcome::NotReady => delay.delay_ms(stage.backoff_ms()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use heapless::Vec;

    /// Stub board whose stages fail a scripted number of times.
    struct FlakyBoard {
        remaining_failures: [u32; 5],
        attempts: [u32; 5],
        log: Vec<&'static str, 32>,
    }

    impl FlakyBoard {
        fn new(failures: [u32; 5]) -> Self {
            Self {
                remaining_failures: failures,
                attempts: [0; 5],
                log: Vec::new(),
            }
        }

        fn attempt(&mut self, step: usize, name: &'static str) -> Outcome {
            let _ = self.log.push(name);
            self.attempts[step] += 1;
            if self.remaining_failures[step] > 0 {
                self.remaining_failures[step] -= 1;
                Outcome::NotReady
            } else {
                Outcome::Ready
            }
        }
    }

    impl BringUp for FlakyBoard {
        async fn display_bus(&mut self) -> Outcome {
            self.attempt(0, "display_bus")
        }

        async fn host_port(&mut self) -> Outcome {
            self.attempt(1, "host_port")
        }

        async fn modem_port(&mut self) -> Outcome {
            self.attempt(2, "modem_port")
        }

        async fn modem_link(&mut self) -> Outcome {
            self.attempt(3, "modem_link")
        }

        async fn gps_power(&mut self) -> Outcome {
            self.attempt(4, "gps_power")
        }
    }

    /// Delay stub that records each requested backoff instead of waiting.
    struct RecordingDelay {
        ms: Vec<u32, 32>,
    }

    impl RecordingDelay {
        fn new() -> Self {
            Self { ms: Vec::new() }
        }
    }

    impl DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            let _ = self.ms.push(ns / 1_000_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            let _ = self.ms.push(ms);
        }
    }

    #[test]
    fn test_ready_first_try() {
        let mut board = FlakyBoard::new([0; 5]);
        let mut delay = RecordingDelay::new();

        block_on(bring_up(&mut board, &mut delay));

        assert_eq!(board.attempts, [1; 5]);
        assert!(delay.ms.is_empty());
        assert_eq!(
            &board.log[..],
            ["display_bus", "host_port", "modem_port", "modem_link", "gps_power"]
        );
    }

    #[test]
    fn test_retries_same_stage_until_ready() {
        let mut board = FlakyBoard::new([0, 0, 0, 3, 0]);
        let mut delay = RecordingDelay::new();

        block_on(bring_up(&mut board, &mut delay));

        // N failures means exactly N+1 attempts, with the link backoff
        // between each.
        assert_eq!(board.attempts, [1, 1, 1, 4, 1]);
        assert_eq!(&delay.ms[..], [100, 100, 100]);
    }

    #[test]
    fn test_driver_install_backoff() {
        let mut board = FlakyBoard::new([2, 1, 0, 0, 0]);
        let mut delay = RecordingDelay::new();

        block_on(bring_up(&mut board, &mut delay));

        assert_eq!(board.attempts, [3, 2, 1, 1, 1]);
        assert_eq!(&delay.ms[..], [10, 10, 10]);
    }

    #[test]
    fn test_gps_power_backoff() {
        let mut board = FlakyBoard::new([0, 0, 0, 0, 2]);
        let mut delay = RecordingDelay::new();

        block_on(bring_up(&mut board, &mut delay));

        assert_eq!(board.attempts, [1, 1, 1, 1, 3]);
        assert_eq!(&delay.ms[..], [1000, 1000]);
    }

    #[test]
    fn test_never_advances_before_success() {
        let mut board = FlakyBoard::new([1, 1, 1, 1, 1]);
        let mut delay = RecordingDelay::new();

        block_on(bring_up(&mut board, &mut delay));

        // Every retry hits the same stage again; no later stage is touched
        // early.
        assert_eq!(
            &board.log[..],
            [
                "display_bus",
                "display_bus",
                "host_port",
                "host_port",
                "modem_port",
                "modem_port",
                "modem_link",
                "modem_link",
                "gps_power",
                "gps_power",
            ]
        );
        assert_eq!(&delay.ms[..], [10, 10, 10, 100, 1000]);
    }

    #[test]
    fn test_not_ready_stays_put() {
        let stages = [
            Stage::DisplayBus,
            Stage::HostPort,
            Stage::ModemPort,
            Stage::ModemLink,
            Stage::GpsPower,
        ];

        for stage in stages {
            assert_eq!(stage.advance(Outcome::NotReady), stage);
        }
    }

    #[test]
    fn test_ready_walks_fixed_order() {
        let mut stage = Stage::FIRST;
        let mut order = Vec::<Stage, 8>::new();

        while stage != Stage::Complete {
            let _ = order.push(stage);
            stage = stage.advance(Outcome::Ready);
        }

        assert_eq!(
            &order[..],
            [
                Stage::DisplayBus,
                Stage::HostPort,
                Stage::ModemPort,
                Stage::ModemLink,
                Stage::GpsPower,
            ]
        );
    }

    #[test]
    fn test_backoff_table() {
        assert_eq!(Stage::DisplayBus.backoff_ms(), 10);
        assert_eq!(Stage::HostPort.backoff_ms(), 10);
        assert_eq!(Stage::ModemPort.backoff_ms(), 10);
        assert_eq!(Stage::ModemLink.backoff_ms(), 100);
        assert_eq!(Stage::GpsPower.backoff_ms(), 1000);
    }
}
