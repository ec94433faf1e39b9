//! Platform seams for memory-mapped AXI peripherals.
//!
//! This crate is intentionally small: it defines the register-access and
//! delay traits that the driver crates program against, plus the in-memory
//! implementations used by host-side tests. Real targets supply their own
//! `RegisterBus`/`Delay` over volatile MMIO and a hardware timer.

mod bus;
mod delay;

pub use bus::{RecordingBus, RegisterBus};
pub use delay::{CountingDelay, Delay, StdDelay};
