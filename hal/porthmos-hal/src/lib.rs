//! Porthmos Hardware Abstraction Layer
//!
//! This crate defines the hardware seam the bridge logic is written
//! against: bounded serial I/O traits and the immutable port/bus
//! configuration records. Chip-specific adapters implement the traits on
//! target; host-side tests implement them with scripted mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (porthmos-core, firmware)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  porthmos-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embassy-rp    │       │ host-side     │
//! │ port adapters │       │ test mocks    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication with
//!   bounded-timeout reads

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use i2c::I2cConfig;
pub use uart::{UartRx, UartTx};
