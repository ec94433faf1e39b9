use proptest::prelude::*;

use crate::insn::{pack_words, unpack_words, word_count_for};

fn word_width_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(8u32), Just(16u32), Just(24u32), Just(32u32)]
}

proptest! {
    #[test]
    fn word_accounting_matches_the_ceiling_rule(
        byte_count in 0usize..=4096,
        bits in word_width_strategy(),
    ) {
        let words = word_count_for(byte_count, bits);
        let word_bytes = (bits / 8) as usize;
        if byte_count * 8 < bits as usize {
            prop_assert_eq!(words, 1);
        } else {
            prop_assert_eq!(words as usize, byte_count.div_ceil(word_bytes));
        }
    }

    #[test]
    fn byte_packing_round_trips(
        bytes in proptest::collection::vec(any::<u8>(), 0..=64),
        bits in word_width_strategy(),
    ) {
        let words = pack_words(&bytes, bits);
        prop_assert_eq!(words.len(), word_count_for(bytes.len(), bits) as usize);

        let mut out = vec![0u8; bytes.len()];
        unpack_words(&words, bits, &mut out);
        prop_assert_eq!(out, bytes);
    }

    #[test]
    fn packing_pads_the_tail_with_zeros(
        bytes in proptest::collection::vec(any::<u8>(), 1..=64),
        bits in word_width_strategy(),
    ) {
        let words = pack_words(&bytes, bits);
        let word_bytes = (bits / 8) as usize;
        let used = bytes.len() % word_bytes;
        if used != 0 {
            let tail = words[words.len() - 1];
            let pad_bits = 8 * (word_bytes - used) as u32;
            prop_assert_eq!(tail & ((1u32 << pad_bits) - 1), 0);
        }
    }
}
