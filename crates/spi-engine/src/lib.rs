//! Transaction compiler and offload driver for the AXI SPI engine.
//!
//! The engine is a memory-mapped SPI state machine driven by a linear
//! instruction stream. This crate provides:
//!
//! - [`insn`]: pure encoders from logical operations (chip select, sleep,
//!   transfer) to the engine's 32-bit instruction words.
//! - [`program::compile`]: the command FIFO builder, turning a
//!   [`Message`] plus a [`Descriptor`] into a [`program::Program`]
//!   (config prologue, one instruction per operation, trailing sync).
//! - [`Descriptor::execute`]: immediate mode — the CPU streams the
//!   program into the live command FIFO and moves data words through the
//!   tx/rx data FIFOs synchronously.
//! - [`Descriptor::offload_load`] / [`Descriptor::offload_arm`]: offload
//!   mode — the same program is loaded into replay memories and a pair of
//!   DMA channels stream samples without per-transfer CPU work.
//!
//! Hardware access goes through [`axi_platform::RegisterBus`], so the
//! whole stack runs against an in-memory register backend in tests.
//! Callers must serialize operations on a single [`Descriptor`]; there is
//! no internal locking.

pub mod insn;
pub mod program;
pub mod regs;

mod descriptor;
mod dma;
mod engine;
mod error;
mod message;
mod offload;

pub use descriptor::{Config, Descriptor, ProtocolConfig};
pub use dma::TransferSpec;
pub use error::{Error, Result};
pub use message::{Message, SpiOp};

#[cfg(test)]
mod proptests;
