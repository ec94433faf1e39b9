use std::time::Duration;

/// Busy-wait / sleep seam for drivers that need fixed settle delays or
/// bounded polling intervals.
pub trait Delay {
    fn delay_us(&mut self, us: u32);
}

/// Host implementation over `std::thread::sleep`.
#[derive(Debug, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }
}

/// Test double that only accumulates the requested time.
#[derive(Debug, Default)]
pub struct CountingDelay {
    total_us: u64,
}

impl CountingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_us(&self) -> u64 {
        self.total_us
    }
}

impl Delay for CountingDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += u64::from(us);
    }
}
