//! Modem command set and link prober
//!
//! The modem speaks carriage-return-terminated AT commands over its UART.
//! Replies are raw bytes; the only reply this firmware ever inspects is the
//! liveness acknowledgement. Everything else is forwarded to the host
//! unparsed.

use embedded_hal_async::delay::DelayNs;
use porthmos_hal::uart::{UartRx, UartTx};

use crate::bringup::Outcome;

/// Capacity of a task's modem read buffer.
pub const RESPONSE_CAPACITY: usize = 1024;

/// Settle time between sending the liveness probe and collecting the reply.
pub const PROBE_SETTLE_MS: u32 = 10;

/// Read timeout while collecting the probe reply.
pub const PROBE_READ_TIMEOUT_MS: u32 = 10;

/// Marker the modem includes in a positive reply.
const ACK: &[u8] = b"OK";

/// Commands the firmware sends to the modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModemCommand {
    /// Liveness check; an alive modem answers with an `OK` line.
    Probe,
    /// Power up the GPS engine. The reply is not inspected.
    GpsPowerOn,
    /// Request the current GPS fix.
    ///
    /// The reply is forwarded raw and arrives in the shape
    /// `+CGPSINF: <mode>,<longitude>,<latitude>,<altitude>,<UTC time>,<TTFF>,<satellites>,<speed>,<course>`
    /// with UTC time as `yyyymmddHHMMSS.mmm`, TTFF in seconds, speed in
    /// km/h and course in degrees, e.g.
    /// `+CGPSINF: 0,2528.949000,4915.533500,850.800000,20200422074617.000,0,10,1.185280,18.020000`
    RequestFix,
}

impl ModemCommand {
    /// Wire bytes for this command.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            ModemCommand::Probe => b"AT\r",
            ModemCommand::GpsPowerOn => b"AT+CGPSPWR=1\r",
            ModemCommand::RequestFix => b"AT+CGPSINF=0\r",
        }
    }
}

/// Scan a reply for the acknowledgement marker.
///
/// The marker counts wherever the two bytes appear adjacently: modems echo
/// commands and pad replies with blank lines, so no line framing is
/// assumed. Only the filled portion of the buffer may be passed in; an
/// `ERROR` reply contains no adjacent `OK` pair and does not match.
pub fn contains_ack(reply: &[u8]) -> bool {
    reply.windows(ACK.len()).any(|pair| pair == ACK)
}

/// Check whether the modem is alive and answering commands.
///
/// Sends the liveness command, allows [`PROBE_SETTLE_MS`] for the reply to
/// accumulate, then drains at most one buffer's worth with a short timeout
/// and scans it for the marker. Never blocks longer than settle plus read
/// timeout; a silent or garbled modem yields `NotReady`. Stateless, so a
/// `NotReady` verdict can simply be retried.
pub async fn probe<T, R, D>(tx: &mut T, rx: &mut R, delay: &mut D, buf: &mut [u8]) -> Outcome
where
    T: UartTx,
    R: UartRx,
    D: DelayNs,
{
    let _ = tx.write(ModemCommand::Probe.bytes()).await;
    delay.delay_ms(PROBE_SETTLE_MS).await;

    let len = rx.read(buf, PROBE_READ_TIMEOUT_MS).await.unwrap_or(0);

    if contains_ack(&buf[..len]) {
        Outcome::Ready
    } else {
        Outcome::NotReady
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use heapless::Vec;

    /// Mock transmitter that records everything written.
    struct MockTx {
        written: Vec<u8, 256>,
    }

    impl MockTx {
        fn new() -> Self {
            Self { written: Vec::new() }
        }
    }

    impl UartTx for MockTx {
        type Error = core::convert::Infallible;

        async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
            self.written.extend_from_slice(data).unwrap();
            Ok(data.len())
        }
    }

    /// Mock receiver that replays a fixed reply and records timeouts.
    struct MockRx {
        reply: &'static [u8],
        timeouts: Vec<u32, 8>,
    }

    impl MockRx {
        fn new(reply: &'static [u8]) -> Self {
            Self {
                reply,
                timeouts: Vec::new(),
            }
        }
    }

    impl UartRx for MockRx {
        type Error = core::convert::Infallible;

        async fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
            let _ = self.timeouts.push(timeout_ms);
            let n = self.reply.len().min(buf.len());
            buf[..n].copy_from_slice(&self.reply[..n]);
            Ok(n)
        }
    }

    /// Delay stub that records instead of waiting.
    struct MockDelay {
        ms: Vec<u32, 8>,
    }

    impl MockDelay {
        fn new() -> Self {
            Self { ms: Vec::new() }
        }
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            let _ = self.ms.push(ns / 1_000_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            let _ = self.ms.push(ms);
        }
    }

    fn run_probe(reply: &'static [u8]) -> (Outcome, MockTx, MockRx, MockDelay) {
        let mut tx = MockTx::new();
        let mut rx = MockRx::new(reply);
        let mut delay = MockDelay::new();
        let mut buf = [0u8; RESPONSE_CAPACITY];

        let outcome = block_on(probe(&mut tx, &mut rx, &mut delay, &mut buf));
        (outcome, tx, rx, delay)
    }

    #[test]
    fn test_ack_found_anywhere() {
        assert!(contains_ack(b"AT\r\r\nOK\r\n"));
        assert!(contains_ack(b"noise before OK and after"));
    }

    #[test]
    fn test_ack_at_start() {
        assert!(contains_ack(b"OK\r\n"));
    }

    #[test]
    fn test_error_reply_is_not_ack() {
        assert!(!contains_ack(b"\r\nERROR\r\n"));
    }

    #[test]
    fn test_empty_and_short_replies() {
        assert!(!contains_ack(b""));
        assert!(!contains_ack(b"O"));
    }

    #[test]
    fn test_scan_stops_at_fill_boundary() {
        // A 'K' sitting one byte past the filled region must not complete
        // the marker.
        let buf = [b'x', b'O', b'K'];
        assert!(!contains_ack(&buf[..2]));
        assert!(contains_ack(&buf[..3]));
    }

    #[test]
    fn test_probe_sends_liveness_command() {
        let (_, tx, rx, delay) = run_probe(b"OK\r\n");

        assert_eq!(&tx.written[..], b"AT\r");
        assert_eq!(&delay.ms[..], [PROBE_SETTLE_MS]);
        assert_eq!(&rx.timeouts[..], [PROBE_READ_TIMEOUT_MS]);
    }

    #[test]
    fn test_probe_ready_on_ok() {
        let (outcome, ..) = run_probe(b"AT\r\r\nOK\r\n");
        assert_eq!(outcome, Outcome::Ready);
    }

    #[test]
    fn test_probe_not_ready_on_error() {
        let (outcome, ..) = run_probe(b"AT\r\r\nERROR\r\n");
        assert_eq!(outcome, Outcome::NotReady);
    }

    #[test]
    fn test_probe_not_ready_on_silence() {
        let (outcome, ..) = run_probe(b"");
        assert_eq!(outcome, Outcome::NotReady);
    }

    #[test]
    fn test_probe_idempotent_when_not_ready() {
        // No hidden state accumulates across attempts.
        let mut tx = MockTx::new();
        let mut rx = MockRx::new(b"\r\nERROR\r\n");
        let mut delay = MockDelay::new();
        let mut buf = [0u8; RESPONSE_CAPACITY];

        for _ in 0..3 {
            let outcome = block_on(probe(&mut tx, &mut rx, &mut delay, &mut buf));
            assert_eq!(outcome, Outcome::NotReady);
        }
        assert_eq!(&tx.written[..], b"AT\rAT\rAT\r");
    }

    #[test]
    fn test_command_bytes() {
        assert_eq!(ModemCommand::Probe.bytes(), b"AT\r");
        assert_eq!(ModemCommand::GpsPowerOn.bytes(), b"AT+CGPSPWR=1\r");
        assert_eq!(ModemCommand::RequestFix.bytes(), b"AT+CGPSINF=0\r");
    }
}
