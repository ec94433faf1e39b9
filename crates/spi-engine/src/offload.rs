//! Offloaded (DMA-replayed) transfer execution.
//!
//! The offload path compiles the same kind of program as the immediate
//! path but loads it into the engine's offload memories, then arms the DMA
//! controllers so hardware replays the program autonomously (typically on
//! a periodic trigger) without per-sample CPU involvement.
//!
//! State machine: `Idle -> Loaded` (`offload_load`) `-> Armed`
//! (`offload_arm`, hardware now free-running) `-> Idle` on the next load.
//! Arming from `Idle` fails with [`Error::NotLoaded`]; loading while armed
//! is legal and leaves the new program `Loaded` (the previous run keeps
//! replaying until its channels are reset). Consistency between the loaded
//! program and the `message_count` passed to `offload_arm` is a caller
//! precondition; it is not re-validated here.

use axi_platform::{Delay, RegisterBus};

use crate::descriptor::Descriptor;
use crate::dma::{self, TransferSpec};
use crate::error::{Error, Result};
use crate::insn;
use crate::message::Message;
use crate::program;
use crate::regs::{
    reg_offload_cmd_mem, reg_offload_ctrl, reg_offload_reset, reg_offload_sdo_mem,
    DMAC_FLAG_LAST, OFFLOAD_CTRL_ENABLE,
};

/// Settle time between starting the DMA channels and enabling replay.
const ARM_SETTLE_US: u32 = 1000;

impl Descriptor {
    /// Compile `msg` and load it into the offload command and data
    /// memories.
    ///
    /// Fails before any register write if the message needs a DMA
    /// direction the core was not synthesized with; the rx-only, tx-only
    /// and both-directions cases surface as distinct errors.
    pub fn offload_load(&mut self, bus: &mut dyn RegisterBus, msg: &Message) -> Result<()> {
        let needs_rx = msg.reads();
        let needs_tx = msg.writes();
        let rx_missing = needs_rx && !self.config.offload_rx_enabled;
        let tx_missing = needs_tx && !self.config.offload_tx_enabled;
        match (rx_missing, tx_missing) {
            (true, true) => return Err(Error::RxTxNotConfigured),
            (true, false) => return Err(Error::RxNotConfigured),
            (false, true) => return Err(Error::TxNotConfigured),
            (false, false) => {}
        }
        if msg.tx.len() != msg.tx_bytes() {
            return Err(Error::BufferLength {
                expected: msg.tx_bytes(),
                actual: msg.tx.len(),
            });
        }

        let program = program::compile(self, msg)?;

        let base = self.config.base;
        let channel = self.config.offload_channel;
        bus.write32(base + reg_offload_reset(channel), 1);
        bus.write32(base + reg_offload_reset(channel), 0);

        for &word in program.words() {
            bus.write32(base + reg_offload_cmd_mem(channel), word);
        }

        let bits = self.active_word_bits;
        let mut tx_words = 0;
        if needs_tx {
            let words = insn::pack_words(&msg.tx, bits);
            tx_words = words.len() as u32;
            for word in words {
                bus.write32(base + reg_offload_sdo_mem(channel), word);
            }
        }

        self.pending_rx_words = if needs_rx {
            insn::word_count_for(msg.rx_bytes(), bits)
        } else {
            0
        };
        self.pending_tx_words = tx_words;
        self.offload_rx_addr = msg.rx_addr;
        self.offload_tx_addr = msg.tx_addr;
        self.offload_configured =
            self.config.offload_rx_enabled || self.config.offload_tx_enabled;

        tracing::debug!(
            instructions = program.len(),
            tx_words,
            rx_words = self.pending_rx_words,
            "offload program loaded"
        );
        Ok(())
    }

    /// Program the DMA channels for `message_count` replays of the loaded
    /// message and start hardware replay.
    ///
    /// Each replay moves one alignment unit per direction: 4 bytes when
    /// the active word width exceeds 16 bits, 2 bytes otherwise. Arming
    /// consumes the loaded state; a second consecutive arm fails with
    /// [`Error::NotLoaded`].
    pub fn offload_arm(
        &mut self,
        bus: &mut dyn RegisterBus,
        delay: &mut dyn Delay,
        message_count: u32,
    ) -> Result<()> {
        if !self.offload_configured {
            return Err(Error::NotLoaded);
        }
        if message_count == 0 {
            return Err(Error::InvalidConfig("message count must be nonzero"));
        }

        let alignment: u32 = if self.active_word_bits > 16 { 4 } else { 2 };
        let length = alignment * message_count;

        if self.pending_rx_words > 0 {
            let spec = TransferSpec {
                src_addr: 0,
                dest_addr: self.offload_rx_addr,
                src_stride: 0,
                dest_stride: 0,
                x_length: length - 1,
                y_length: 0,
                flags: 0,
            };
            dma::start_transfer(bus, self.config.rx_dma_base, &spec);
        }
        if self.pending_tx_words > 0 {
            let spec = TransferSpec {
                src_addr: self.offload_tx_addr,
                dest_addr: 0,
                src_stride: 0,
                dest_stride: 0,
                x_length: length - 1,
                y_length: 0,
                flags: DMAC_FLAG_LAST,
            };
            dma::start_transfer(bus, self.config.tx_dma_base, &spec);
        }

        delay.delay_us(ARM_SETTLE_US);
        bus.write32(
            self.config.base + reg_offload_ctrl(self.config.offload_channel),
            OFFLOAD_CTRL_ENABLE,
        );

        self.offload_configured = false;
        self.pending_rx_words = 0;
        self.pending_tx_words = 0;

        tracing::debug!(message_count, length, "offload armed, replay running");
        Ok(())
    }
}
