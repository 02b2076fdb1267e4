//! Relay payload chunking
//!
//! Whatever the modem produces is forwarded to the host verbatim. Drained
//! bytes cross the task boundary as fixed-capacity chunks on a channel;
//! chunking preserves content and order, so a GPS sentence split across
//! reads simply spans more than one chunk.

use heapless::Vec;

/// Capacity of one relay chunk.
pub const CHUNK_CAPACITY: usize = 64;

/// One run of drained modem bytes.
pub type Chunk = Vec<u8, CHUNK_CAPACITY>;

/// Split `bytes` into channel-sized chunks, preserving order.
///
/// Zero input bytes produce no chunks; a cycle with nothing to relay stays
/// silent.
pub fn chunks(bytes: &[u8]) -> impl Iterator<Item = Chunk> + '_ {
    bytes.chunks(CHUNK_CAPACITY).map(|part| {
        let mut chunk = Chunk::new();
        // part.len() <= CHUNK_CAPACITY, so this cannot overflow
        let _ = chunk.extend_from_slice(part);
        chunk
    })
}
