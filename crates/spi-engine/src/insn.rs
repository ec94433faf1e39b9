//! Instruction encoder.
//!
//! Pure functions that pack one logical operation into one 32-bit
//! instruction word using the engine's `tag | (arg1 << 8) | arg2` layout.
//! No hardware access happens here; encoders validate their field widths
//! and fail before anything touches a register.

use crate::error::{Error, Result};
use crate::regs::{
    CS_IDLE_MASK, INST_ARG1_SHIFT, INST_ARG_MAX, INST_CS, INST_MISC, INST_REG_WRITE,
    INST_TRANSFER, MISC_SLEEP, MISC_SYNC, TRANSFER_READ, TRANSFER_WRITE,
};

/// Encode a chip-select change.
///
/// Asserting clears the selected line's bit relative to the all-ones idle
/// baseline (deassert everyone else, assert this one); deasserting restores
/// the baseline regardless of `cs`. `delay` occupies the high argument
/// field in both cases.
pub fn chip_select(cs: u8, assert: bool, delay: u8) -> u32 {
    let mask = if assert {
        CS_IDLE_MASK & !(1u32 << cs)
    } else {
        CS_IDLE_MASK
    };
    INST_CS | (u32::from(delay) << INST_ARG1_SHIFT) | mask
}

/// Encode a data transfer of `words` words.
///
/// The instruction stores `words - 1` in an 8-bit field, so a single
/// instruction moves at most 256 words.
pub fn transfer(write: bool, read: bool, words: u32) -> Result<u32> {
    if words == 0 || words - 1 > INST_ARG_MAX {
        return Err(Error::InvalidWordCount { words });
    }
    let mut flags = 0;
    if read {
        flags |= TRANSFER_READ;
    }
    if write {
        flags |= TRANSFER_WRITE;
    }
    Ok(INST_TRANSFER | (flags << INST_ARG1_SHIFT) | (words - 1))
}

/// Convert a sleep duration to the sleep instruction's clock divider.
///
/// The sleep instruction counts in units of two SCLK periods, hence the
/// `2 * (clock_divider + 1)` term. Durations shorter than one countable
/// unit produce a non-positive divider and are rejected.
pub fn sleep_divider(ref_clock_hz: u32, clock_divider: u32, ns: u32) -> Result<u32> {
    let ticks = u64::from(ref_clock_hz) / 1_000_000 * u64::from(ns)
        / 1000
        / (2 * (u64::from(clock_divider) + 1));
    if ticks <= 1 {
        return Err(Error::InvalidSleepTime { ns });
    }
    Ok((ticks - 1) as u32)
}

/// Encode a sleep for `divider` units.
pub fn sleep(divider: u32) -> Result<u32> {
    check_field(divider, 8)?;
    Ok(INST_MISC | (MISC_SLEEP << INST_ARG1_SHIFT) | divider)
}

/// Encode a write to one of the engine's internal configuration registers
/// (clock divider, protocol config, transfer width).
pub fn reg_write(reg: u32, value: u32) -> Result<u32> {
    check_field(reg, 8)?;
    check_field(value, 8)?;
    Ok(INST_REG_WRITE | (reg << INST_ARG1_SHIFT) | value)
}

/// Encode the trailing synchronization instruction.
pub fn sync() -> u32 {
    INST_MISC | (MISC_SYNC << INST_ARG1_SHIFT)
}

fn check_field(value: u32, bits: u32) -> Result<()> {
    if value >> bits != 0 {
        return Err(Error::FieldOverflow { value, bits });
    }
    Ok(())
}

/// Number of data words needed to carry `byte_count` bytes at a word width
/// of `bits`.
///
/// A transfer instruction always moves at least one word, so byte counts
/// shorter than a word (including zero) still account for one word.
pub fn word_count_for(byte_count: usize, bits: u32) -> u32 {
    let bits = bits as usize;
    if byte_count * 8 < bits {
        return 1;
    }
    let word_bytes = bits / 8;
    (byte_count.div_ceil(word_bytes)) as u32
}

/// Pack a byte buffer into data-FIFO words, zero-padded to word boundaries.
///
/// Byte `i` occupies `word[i / word_bytes]` at bit offset
/// `bits - 8 - 8 * (i % word_bytes)`.
pub fn pack_words(bytes: &[u8], bits: u32) -> Vec<u32> {
    let word_bytes = (bits / 8) as usize;
    let mut words = vec![0u32; word_count_for(bytes.len(), bits) as usize];
    for (i, byte) in bytes.iter().enumerate() {
        let shift = bits - 8 - 8 * (i % word_bytes) as u32;
        words[i / word_bytes] |= u32::from(*byte) << shift;
    }
    words
}

/// Inverse of [`pack_words`]: scatter FIFO words back into a byte buffer.
pub fn unpack_words(words: &[u32], bits: u32, bytes: &mut [u8]) {
    let word_bytes = (bits / 8) as usize;
    for (i, byte) in bytes.iter_mut().enumerate() {
        let shift = bits - 8 - 8 * (i % word_bytes) as u32;
        *byte = (words[i / word_bytes] >> shift) as u8;
    }
}
