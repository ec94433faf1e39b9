use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for SPI engine transaction compilation and execution.
///
/// Configuration and encoding failures are detected before the first
/// register write of the failing call; only [`Error::RxTimeout`] can be
/// reported after hardware state has already changed (the FIFOs are
/// stateless, so no rollback is attempted).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("transfer of {words} words exceeds the instruction word-count field")]
    InvalidWordCount { words: u32 },

    #[error("instruction field value {value} does not fit in {bits} bits")]
    FieldOverflow { value: u32, bits: u32 },

    #[error("sleep of {ns} ns is below the resolution of the sleep instruction")]
    InvalidSleepTime { ns: u32 },

    #[error("message buffer holds {actual} bytes, ops require {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("unsupported data word width of {bits} bits")]
    UnsupportedWordWidth { bits: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("DMA rx channel requested but offload rx support is not enabled")]
    RxNotConfigured,

    #[error("DMA tx channel requested but offload tx support is not enabled")]
    TxNotConfigured,

    #[error("DMA rx and tx channels requested but offload support is not enabled")]
    RxTxNotConfigured,

    #[error("offload arm requested before a program was loaded")]
    NotLoaded,

    #[error("failed to allocate the instruction program")]
    Allocation,

    #[error("rx FIFO delivered {received} of {expected} words before the deadline")]
    RxTimeout { expected: u32, received: u32 },
}
