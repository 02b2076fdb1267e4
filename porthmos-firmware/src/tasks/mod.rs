//! Embassy async tasks
//!
//! Each task runs independently. The modem owner serializes all access to
//! the modem UART; the poll and relay tasks only ever touch the channels.

pub mod gps_poll;
pub mod modem;
pub mod relay;

pub use gps_poll::gps_poll_task;
pub use modem::modem_task;
pub use relay::relay_task;
