//! Immediate (CPU-driven, polled) transfer execution.

use axi_platform::{Delay, RegisterBus};

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::insn;
use crate::message::Message;
use crate::program;
use crate::regs::{REG_CMD_FIFO, REG_SDI_FIFO, REG_SDI_FIFO_LEVEL, REG_SDO_FIFO};

/// Interval between rx FIFO level polls.
const RX_POLL_INTERVAL_US: u32 = 10;

impl Descriptor {
    /// Compile `msg` and run it synchronously through the live FIFOs.
    ///
    /// Instruction words are streamed to the command FIFO strictly in
    /// program order, one register write per word; then the tx data words,
    /// then the rx data words are drained. `msg.rx` is only valid once this
    /// returns `Ok`. The rx drain is bounded by the descriptor's
    /// `rx_timeout_us` budget.
    pub fn execute(
        &mut self,
        bus: &mut dyn RegisterBus,
        delay: &mut dyn Delay,
        msg: &mut Message,
    ) -> Result<()> {
        check_buffer(msg.tx.len(), msg.tx_bytes())?;
        check_buffer(msg.rx.len(), msg.rx_bytes())?;

        let program = program::compile(self, msg)?;
        let base = self.config.base;
        let bits = self.active_word_bits;

        for &word in program.words() {
            bus.write32(base + REG_CMD_FIFO, word);
        }

        let mut tx_words = 0;
        if msg.writes() {
            let words = insn::pack_words(&msg.tx, bits);
            tx_words = words.len();
            for word in words {
                bus.write32(base + REG_SDO_FIFO, word);
            }
        }

        let mut rx_words = 0;
        if msg.reads() {
            rx_words = insn::word_count_for(msg.rx.len(), bits);
            let words = self.drain_rx(bus, delay, rx_words)?;
            insn::unpack_words(&words, bits, &mut msg.rx);
        }

        tracing::debug!(
            instructions = program.len(),
            tx_words,
            rx_words,
            "immediate transfer complete"
        );
        Ok(())
    }

    fn drain_rx(
        &self,
        bus: &mut dyn RegisterBus,
        delay: &mut dyn Delay,
        expected: u32,
    ) -> Result<Vec<u32>> {
        let base = self.config.base;
        let mut words = Vec::with_capacity(expected as usize);
        let mut waited_us = 0u64;

        while (words.len() as u32) < expected {
            let level = bus.read32(base + REG_SDI_FIFO_LEVEL);
            if level == 0 {
                if waited_us >= u64::from(self.config.rx_timeout_us) {
                    return Err(Error::RxTimeout {
                        expected,
                        received: words.len() as u32,
                    });
                }
                delay.delay_us(RX_POLL_INTERVAL_US);
                waited_us += u64::from(RX_POLL_INTERVAL_US);
                continue;
            }
            let remaining = expected - words.len() as u32;
            for _ in 0..level.min(remaining) {
                words.push(bus.read32(base + REG_SDI_FIFO));
            }
        }
        Ok(words)
    }
}

fn check_buffer(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::BufferLength { expected, actual });
    }
    Ok(())
}
