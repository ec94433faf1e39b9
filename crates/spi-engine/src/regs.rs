//! Register map and instruction layout of the SPI engine core and the AXI
//! DMA controller channels used by the offload path.
//!
//! All offsets are byte offsets from the respective block's base address and
//! are accessed as 32-bit words.

// SPI engine control block.
pub const REG_VERSION: u32 = 0x00;
/// Capability register: the widest data word (in bits) the core shifts.
pub const REG_DATA_WIDTH: u32 = 0x0c;
pub const REG_RESET: u32 = 0x40;
pub const REG_CMD_FIFO_ROOM: u32 = 0xc0;
pub const REG_SDO_FIFO_ROOM: u32 = 0xc4;
pub const REG_SDI_FIFO_LEVEL: u32 = 0xc8;
pub const REG_CMD_FIFO: u32 = 0xe0;
pub const REG_SDO_FIFO: u32 = 0xe4;
pub const REG_SDI_FIFO: u32 = 0xe8;
pub const REG_SDI_FIFO_PEEK: u32 = 0xec;

// Offload control block, one 0x20-stride group per offload channel.
const OFFLOAD_BLOCK_BASE: u32 = 0x100;
const OFFLOAD_BLOCK_STRIDE: u32 = 0x20;

pub fn reg_offload_ctrl(channel: u8) -> u32 {
    OFFLOAD_BLOCK_BASE + OFFLOAD_BLOCK_STRIDE * u32::from(channel)
}

pub fn reg_offload_status(channel: u8) -> u32 {
    reg_offload_ctrl(channel) + 0x04
}

pub fn reg_offload_reset(channel: u8) -> u32 {
    reg_offload_ctrl(channel) + 0x08
}

pub fn reg_offload_cmd_mem(channel: u8) -> u32 {
    reg_offload_ctrl(channel) + 0x10
}

pub fn reg_offload_sdo_mem(channel: u8) -> u32 {
    reg_offload_ctrl(channel) + 0x14
}

/// OFFLOAD_CTRL bit0: start autonomous replay of the loaded program.
pub const OFFLOAD_CTRL_ENABLE: u32 = 1 << 0;

// Instruction words are `tag | (arg1 << 8) | arg2`; arg1 and arg2 are 8-bit
// fields.
pub const INST_TRANSFER: u32 = 0x0000;
pub const INST_CS: u32 = 0x1000;
pub const INST_REG_WRITE: u32 = 0x2000;
pub const INST_MISC: u32 = 0x3000;

/// MISC sub-ops, selected by arg1.
pub const MISC_SYNC: u32 = 0x0;
pub const MISC_SLEEP: u32 = 0x1;

/// Transfer flag bits (arg1).
pub const TRANSFER_READ: u32 = 1 << 0;
pub const TRANSFER_WRITE: u32 = 1 << 1;

/// Engine register ids addressable through `INST_REG_WRITE`.
pub const ENGINE_REG_CLK_DIV: u32 = 0x0;
pub const ENGINE_REG_CONFIG: u32 = 0x1;
pub const ENGINE_REG_XFER_BITS: u32 = 0x2;

pub const INST_ARG1_SHIFT: u32 = 8;
pub const INST_ARG_MAX: u32 = 0xff;

/// All chip-select lines idle (every line deasserted is the all-ones
/// baseline; asserting clears the selected line's bit).
pub const CS_IDLE_MASK: u32 = 0xff;

// AXI DMA controller channel register block.
pub const DMAC_REG_IRQ_MASK: u32 = 0x80;
pub const DMAC_REG_IRQ_PENDING: u32 = 0x84;
pub const DMAC_REG_CTRL: u32 = 0x400;
pub const DMAC_REG_START_TRANSFER: u32 = 0x408;
pub const DMAC_REG_FLAGS: u32 = 0x40c;
pub const DMAC_REG_DEST_ADDRESS: u32 = 0x410;
pub const DMAC_REG_SRC_ADDRESS: u32 = 0x414;
pub const DMAC_REG_X_LENGTH: u32 = 0x418;
pub const DMAC_REG_Y_LENGTH: u32 = 0x41c;
pub const DMAC_REG_DEST_STRIDE: u32 = 0x420;
pub const DMAC_REG_SRC_STRIDE: u32 = 0x424;

pub const DMAC_CTRL_ENABLE: u32 = 1 << 0;
/// FLAGS bit0: assert TLAST at the end of the transfer (tx direction).
pub const DMAC_FLAG_LAST: u32 = 1 << 0;
/// Writing all-ones to IRQ_PENDING acknowledges every pending interrupt.
pub const DMAC_IRQ_CLEAR_ALL: u32 = 0xff;
