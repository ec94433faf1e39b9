//! AXI DMA controller channel programming.
//!
//! The controller itself is external; this module only issues the register
//! sequence that resets a channel, describes one transfer, and starts it.

use axi_platform::RegisterBus;

use crate::regs::{
    DMAC_CTRL_ENABLE, DMAC_IRQ_CLEAR_ALL, DMAC_REG_CTRL, DMAC_REG_DEST_ADDRESS,
    DMAC_REG_DEST_STRIDE, DMAC_REG_FLAGS, DMAC_REG_IRQ_MASK, DMAC_REG_IRQ_PENDING,
    DMAC_REG_SRC_ADDRESS, DMAC_REG_SRC_STRIDE, DMAC_REG_START_TRANSFER, DMAC_REG_X_LENGTH,
    DMAC_REG_Y_LENGTH,
};

/// One transfer handed to a DMA controller channel.
///
/// A device-to-memory channel uses the destination side and a
/// memory-to-device channel the source side; the unused side is programmed
/// to zero. `x_length` is the transfer length minus one, per the
/// controller's register contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSpec {
    pub src_addr: u32,
    pub dest_addr: u32,
    pub src_stride: u32,
    pub dest_stride: u32,
    pub x_length: u32,
    pub y_length: u32,
    pub flags: u32,
}

/// Reset the channel, program `spec`, and issue the start command.
///
/// The reset sequence (disable, enable, unmask, acknowledge all pending
/// interrupts) is also the only way to abort a running channel.
pub(crate) fn start_transfer(bus: &mut dyn RegisterBus, dmac_base: u32, spec: &TransferSpec) {
    bus.write32(dmac_base + DMAC_REG_CTRL, 0);
    bus.write32(dmac_base + DMAC_REG_CTRL, DMAC_CTRL_ENABLE);
    bus.write32(dmac_base + DMAC_REG_IRQ_MASK, 0);
    bus.write32(dmac_base + DMAC_REG_IRQ_PENDING, DMAC_IRQ_CLEAR_ALL);

    bus.write32(dmac_base + DMAC_REG_DEST_ADDRESS, spec.dest_addr);
    bus.write32(dmac_base + DMAC_REG_SRC_ADDRESS, spec.src_addr);
    bus.write32(dmac_base + DMAC_REG_DEST_STRIDE, spec.dest_stride);
    bus.write32(dmac_base + DMAC_REG_SRC_STRIDE, spec.src_stride);
    bus.write32(dmac_base + DMAC_REG_X_LENGTH, spec.x_length);
    bus.write32(dmac_base + DMAC_REG_Y_LENGTH, spec.y_length);
    bus.write32(dmac_base + DMAC_REG_FLAGS, spec.flags);

    bus.write32(dmac_base + DMAC_REG_START_TRANSFER, 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axi_platform::RecordingBus;

    #[test]
    fn channel_is_reset_before_programming_and_started_last() {
        let mut bus = RecordingBus::new();
        let spec = TransferSpec {
            src_addr: 0,
            dest_addr: 0x1000_0000,
            src_stride: 0,
            dest_stride: 0,
            x_length: 0x3f,
            y_length: 0,
            flags: 0,
        };
        start_transfer(&mut bus, 0x7c42_0000, &spec);

        let writes = bus.writes();
        assert_eq!(writes[0], (0x7c42_0000 + DMAC_REG_CTRL, 0));
        assert_eq!(writes[1], (0x7c42_0000 + DMAC_REG_CTRL, DMAC_CTRL_ENABLE));
        assert_eq!(writes[2], (0x7c42_0000 + DMAC_REG_IRQ_MASK, 0));
        assert_eq!(writes[3], (0x7c42_0000 + DMAC_REG_IRQ_PENDING, 0xff));
        assert_eq!(
            writes.last().copied(),
            Some((0x7c42_0000 + DMAC_REG_START_TRANSFER, 1))
        );
        assert_eq!(
            bus.last_write(0x7c42_0000 + DMAC_REG_X_LENGTH),
            Some(0x3f)
        );
    }
}
