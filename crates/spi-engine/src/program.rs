//! Command FIFO builder: compiles a [`Message`] into the engine's linear
//! instruction stream.

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::insn;
use crate::message::{Message, SpiOp};
use crate::regs::{ENGINE_REG_CLK_DIV, ENGINE_REG_CONFIG, ENGINE_REG_XFER_BITS};

/// A compiled instruction stream for one logical SPI message.
///
/// Transient: built, streamed into a command FIFO or offload memory, and
/// discarded. Always exactly `3 + ops + 1` words: the clock/protocol/width
/// prologue, one instruction per logical operation, and a trailing sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program(Vec<u32>);

impl Program {
    pub fn words(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compile `msg` against the descriptor's current configuration.
///
/// Pure data transformation: no register I/O happens here, and an encoding
/// failure aborts without returning a partial program.
pub fn compile(desc: &Descriptor, msg: &Message) -> Result<Program> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(3 + msg.ops.len() + 1)
        .map_err(|_| Error::Allocation)?;

    let cfg = desc.config();
    let bits = desc.word_width();

    words.push(insn::reg_write(ENGINE_REG_CLK_DIV, cfg.clock_divider)?);
    words.push(insn::reg_write(
        ENGINE_REG_CONFIG,
        u32::from(cfg.protocol.bits()),
    )?);
    words.push(insn::reg_write(ENGINE_REG_XFER_BITS, bits)?);

    for op in &msg.ops {
        let word = match *op {
            SpiOp::AssertCs => insn::chip_select(cfg.chip_select, true, cfg.cs_assert_delay),
            SpiOp::DeassertCs => insn::chip_select(cfg.chip_select, false, cfg.cs_assert_delay),
            SpiOp::Sleep { ns } => {
                let divider = insn::sleep_divider(cfg.ref_clock_hz, cfg.clock_divider, ns)?;
                insn::sleep(divider)?
            }
            SpiOp::Read { bytes } => {
                insn::transfer(false, true, insn::word_count_for(bytes, bits))?
            }
            SpiOp::Write { bytes } => {
                insn::transfer(true, false, insn::word_count_for(bytes, bits))?
            }
            SpiOp::ReadWrite { bytes } => {
                insn::transfer(true, true, insn::word_count_for(bytes, bits))?
            }
        };
        words.push(word);
    }

    words.push(insn::sync());
    Ok(Program(words))
}
