//! Session configuration and descriptor state.

use axi_platform::RegisterBus;
use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::regs::{INST_ARG_MAX, REG_DATA_WIDTH, REG_RESET};

bitflags! {
    /// Bits of the engine's protocol CONFIG register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProtocolConfig: u8 {
        /// Sample on the trailing clock edge (CPHA).
        const CPHA = 1 << 0;
        /// Idle the clock high (CPOL).
        const CPOL = 1 << 1;
        /// Bidirectional three-wire mode.
        const THREE_WIRE = 1 << 2;
    }
}

/// Caller-chosen parameters of one SPI engine session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the engine's control register block.
    pub base: u32,
    /// Base address of the rx (device-to-memory) DMA controller channel.
    pub rx_dma_base: u32,
    /// Base address of the tx (memory-to-device) DMA controller channel.
    pub tx_dma_base: u32,
    /// Offload channel index within the engine.
    pub offload_channel: u8,
    /// Frequency of the engine's reference clock.
    pub ref_clock_hz: u32,
    /// SCLK divider programmed into the engine (SCLK = ref / (2*(div+1))).
    pub clock_divider: u32,
    /// Chip-select line driven by this session.
    pub chip_select: u8,
    pub protocol: ProtocolConfig,
    /// Delay field of chip-select instructions.
    pub cs_assert_delay: u8,
    /// Whether the core was synthesized with rx offload support.
    pub offload_rx_enabled: bool,
    /// Whether the core was synthesized with tx offload support.
    pub offload_tx_enabled: bool,
    /// Budget for the immediate-mode rx FIFO poll.
    pub rx_timeout_us: u32,
}

impl Config {
    /// Matches the settle time the pre-timeout driver generation waited
    /// unconditionally.
    pub const DEFAULT_RX_TIMEOUT_US: u32 = 1_000_000;
}

/// Long-lived state of one SPI engine session.
///
/// Owned exclusively by the caller; operations that touch hardware take the
/// register bus by argument, and callers must serialize `execute` /
/// `offload_load` / `offload_arm` against a single descriptor.
#[derive(Debug)]
pub struct Descriptor {
    pub(crate) config: Config,
    max_word_bits: u32,
    pub(crate) active_word_bits: u32,
    pub(crate) offload_configured: bool,
    pub(crate) pending_rx_words: u32,
    pub(crate) pending_tx_words: u32,
    pub(crate) offload_rx_addr: u32,
    pub(crate) offload_tx_addr: u32,
}

impl Descriptor {
    /// Validate `config`, reset the engine, and probe its capabilities.
    ///
    /// The maximum word width comes from the core's DATA_WIDTH capability
    /// register and is fixed for the descriptor's lifetime; the active
    /// width starts at the maximum.
    pub fn new(bus: &mut dyn RegisterBus, config: Config) -> Result<Self> {
        if config.clock_divider > INST_ARG_MAX {
            return Err(Error::InvalidConfig(
                "clock divider does not fit the instruction field",
            ));
        }
        if config.chip_select >= 8 {
            return Err(Error::InvalidConfig("chip select line out of range"));
        }
        if config.ref_clock_hz == 0 {
            return Err(Error::InvalidConfig("reference clock must be nonzero"));
        }
        if config.rx_timeout_us == 0 {
            return Err(Error::InvalidConfig("rx timeout must be nonzero"));
        }

        bus.write32(config.base + REG_RESET, 1);
        bus.write32(config.base + REG_RESET, 0);

        let max_word_bits = bus.read32(config.base + REG_DATA_WIDTH);
        if !valid_word_width(max_word_bits) {
            return Err(Error::UnsupportedWordWidth {
                bits: max_word_bits,
            });
        }

        Ok(Descriptor {
            config,
            max_word_bits,
            active_word_bits: max_word_bits,
            offload_configured: false,
            pending_rx_words: 0,
            pending_tx_words: 0,
            offload_rx_addr: 0,
            offload_tx_addr: 0,
        })
    }

    /// Select the data word width used by subsequent transfers.
    pub fn set_word_width(&mut self, bits: u32) -> Result<()> {
        if !valid_word_width(bits) || bits > self.max_word_bits {
            return Err(Error::UnsupportedWordWidth { bits });
        }
        self.active_word_bits = bits;
        Ok(())
    }

    pub fn word_width(&self) -> u32 {
        self.active_word_bits
    }

    pub fn max_word_width(&self) -> u32 {
        self.max_word_bits
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn valid_word_width(bits: u32) -> bool {
    (8..=32).contains(&bits) && bits % 8 == 0
}
