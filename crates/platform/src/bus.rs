use std::collections::{BTreeMap, HashMap, VecDeque};

/// Abstraction for 32-bit register access on a memory-mapped peripheral.
///
/// Addresses are absolute bus addresses; drivers add their block's base
/// address before calling in. Reads take `&mut self` because MMIO reads can
/// have side effects (popping a hardware FIFO, clearing a status bit).
pub trait RegisterBus {
    fn read32(&mut self, addr: u32) -> u32;
    fn write32(&mut self, addr: u32, value: u32);
}

/// In-memory register backend for tests.
///
/// Every write is recorded in order. Reads come from a per-address scripted
/// queue when one is present (FIFO pop semantics, modelling data-FIFO and
/// level registers), otherwise from the flat register map, otherwise zero.
#[derive(Debug, Default)]
pub struct RecordingBus {
    regs: BTreeMap<u32, u32>,
    read_queues: HashMap<u32, VecDeque<u32>>,
    writes: Vec<(u32, u32)>,
    reads: Vec<u32>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a register value returned by subsequent reads of `addr`.
    pub fn set_reg(&mut self, addr: u32, value: u32) {
        self.regs.insert(addr, value);
    }

    /// Queue a value for a single future read of `addr`.
    ///
    /// Queued values take priority over the flat register map and are
    /// consumed in FIFO order, one per read.
    pub fn push_read(&mut self, addr: u32, value: u32) {
        self.read_queues.entry(addr).or_default().push_back(value);
    }

    /// Every `(addr, value)` write issued so far, in issue order.
    pub fn writes(&self) -> &[(u32, u32)] {
        &self.writes
    }

    /// Addresses of every read issued so far, in issue order.
    pub fn reads(&self) -> &[u32] {
        &self.reads
    }

    /// Writes issued to `addr`, in issue order.
    pub fn writes_to(&self, addr: u32) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Last value written to `addr`, if any write hit it.
    pub fn last_write(&self, addr: u32) -> Option<u32> {
        self.writes
            .iter()
            .rev()
            .find(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
    }

    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.reads.clear();
    }
}

impl RegisterBus for RecordingBus {
    fn read32(&mut self, addr: u32) -> u32 {
        self.reads.push(addr);
        if let Some(queue) = self.read_queues.get_mut(&addr) {
            if let Some(value) = queue.pop_front() {
                return value;
            }
        }
        self.regs.get(&addr).copied().unwrap_or(0)
    }

    fn write32(&mut self, addr: u32, value: u32) {
        self.writes.push((addr, value));
        self.regs.insert(addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_reads_pop_in_order_then_fall_back() {
        let mut bus = RecordingBus::new();
        bus.set_reg(0x10, 7);
        bus.push_read(0x10, 1);
        bus.push_read(0x10, 2);

        assert_eq!(bus.read32(0x10), 1);
        assert_eq!(bus.read32(0x10), 2);
        assert_eq!(bus.read32(0x10), 7);
        assert_eq!(bus.reads(), &[0x10, 0x10, 0x10]);
    }

    #[test]
    fn writes_are_recorded_in_order() {
        let mut bus = RecordingBus::new();
        bus.write32(0x40, 1);
        bus.write32(0x40, 0);
        bus.write32(0xe0, 0x3000);

        assert_eq!(bus.writes(), &[(0x40, 1), (0x40, 0), (0xe0, 0x3000)]);
        assert_eq!(bus.writes_to(0x40), vec![1, 0]);
        assert_eq!(bus.last_write(0xe0), Some(0x3000));
        assert_eq!(bus.read32(0xe0), 0x3000);
    }
}
