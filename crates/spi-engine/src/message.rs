//! Logical SPI transactions.

/// One logical operation inside a [`Message`].
///
/// Transfer operands are byte counts; the engine derives the word count
/// from the descriptor's active word width at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiOp {
    AssertCs,
    DeassertCs,
    Sleep { ns: u32 },
    Read { bytes: usize },
    Write { bytes: usize },
    ReadWrite { bytes: usize },
}

/// An ordered list of logical operations plus the tx/rx byte buffers they
/// operate on.
///
/// `tx` must hold exactly the bytes implied by the write-direction ops and
/// `rx` the bytes implied by the read-direction ops; `rx` is the only field
/// the engine mutates, and only after an immediate transfer completes.
/// `rx_addr`/`tx_addr` are the sample-buffer bus addresses used by the
/// offload path and are ignored by immediate transfers.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub ops: Vec<SpiOp>,
    pub tx: Vec<u8>,
    pub rx: Vec<u8>,
    pub rx_addr: u32,
    pub tx_addr: u32,
}

impl Message {
    pub fn new(ops: Vec<SpiOp>) -> Self {
        let mut msg = Message {
            ops,
            ..Message::default()
        };
        msg.tx = vec![0; msg.tx_bytes()];
        msg.rx = vec![0; msg.rx_bytes()];
        msg
    }

    /// Total bytes moved out to the device by this message.
    pub fn tx_bytes(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                SpiOp::Write { bytes } | SpiOp::ReadWrite { bytes } => *bytes,
                _ => 0,
            })
            .sum()
    }

    /// Total bytes moved in from the device by this message.
    pub fn rx_bytes(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                SpiOp::Read { bytes } | SpiOp::ReadWrite { bytes } => *bytes,
                _ => 0,
            })
            .sum()
    }

    pub fn writes(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, SpiOp::Write { .. } | SpiOp::ReadWrite { .. }))
    }

    pub fn reads(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, SpiOp::Read { .. } | SpiOp::ReadWrite { .. }))
    }
}
