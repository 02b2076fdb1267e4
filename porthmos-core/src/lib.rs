//! Board-agnostic core logic for the modem/GPS bridge firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Bring-up state machine and retry sequencer
//! - Modem command set and link prober
//! - Relay payload chunking

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod bringup;
pub mod modem;
pub mod relay;
