//! Inter-task communication channels
//!
//! The modem UART has a single owner task; these channels are how the other
//! tasks reach it. Uses embassy-sync primitives so both cores can touch
//! them safely.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use porthmos_core::modem::ModemCommand;
use porthmos_core::relay::Chunk;

/// Channel capacity for commands bound for the modem
const REQUEST_QUEUE_SIZE: usize = 4;

/// Channel capacity for drained modem output awaiting relay
const RESPONSE_QUEUE_SIZE: usize = 16;

/// Requests from producer tasks to the modem owner
pub static MODEM_REQUESTS: Channel<CriticalSectionRawMutex, ModemCommand, REQUEST_QUEUE_SIZE> =
    Channel::new();

/// Raw modem output from the owner to the relay
pub static MODEM_RESPONSES: Channel<CriticalSectionRawMutex, Chunk, RESPONSE_QUEUE_SIZE> =
    Channel::new();
