//! Property-based testing for packed bit lists
//!
//! Validates the word-packed bulk operations against naive `Vec<bool>`
//! oracles, with the range generators biased to straddle word boundaries.

use bitsum::BitList;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn bools_strategy(max: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..=max)
}

/// A non-empty bit pattern plus one valid (start, length) range into it.
fn pattern_with_range(max: usize) -> impl Strategy<Value = (Vec<bool>, usize, usize)> {
    prop::collection::vec(any::<bool>(), 1..=max).prop_flat_map(|bits| {
        let n = bits.len();
        (Just(bits), 0..n).prop_flat_map(|(bits, start)| {
            let room = bits.len() - start;
            (Just(bits), Just(start), 0..=room)
        })
    })
}

/// A pattern plus two ranges of equal length, in arbitrary overlap order.
fn pattern_with_two_ranges(max: usize) -> impl Strategy<Value = (Vec<bool>, usize, usize, usize)> {
    prop::collection::vec(any::<bool>(), 1..=max).prop_flat_map(|bits| {
        let n = bits.len();
        (Just(bits), 0..n, 0..n).prop_flat_map(|(bits, a, b)| {
            let room = (bits.len() - a).min(bits.len() - b);
            (Just(bits), Just(a), Just(b), 0..=room)
        })
    })
}

fn make(bits: &[bool]) -> BitList {
    BitList::from_bools(bits).unwrap()
}

// =============================================================================
// ROUND TRIPS AND EQUIVALENCES
// =============================================================================

proptest! {
    #[test]
    fn prop_bools_round_trip(bits in bools_strategy(500)) {
        let list = make(&bits);
        prop_assert_eq!(list.len(), bits.len());
        let back: Vec<bool> = list.iter().collect();
        prop_assert_eq!(back, bits);
    }

    #[test]
    fn prop_collected_matches_constructor(bits in bools_strategy(300)) {
        let constructed = make(&bits);
        let collected: BitList = bits.iter().copied().collect();
        prop_assert_eq!(constructed, collected);
    }

    #[test]
    fn prop_get_range_set_range_round_trip((bits, start, len) in pattern_with_range(400)) {
        let original = make(&bits);
        let mut list = original.clone();
        let window = list.get_range(start, len).unwrap();
        list.set_range(start, &window).unwrap();
        prop_assert_eq!(list, original);
    }

    #[test]
    fn prop_set_range_matches_bools_form(
        (bits, start, len) in pattern_with_range(400),
        seed in any::<u64>(),
    ) {
        let source: Vec<bool> = (0..len).map(|i| (seed >> (i % 64)) & 1 == 1).collect();
        let source_list = make(&source);

        let mut packed = make(&bits);
        let mut generic = make(&bits);
        packed.set_range(start, &source_list).unwrap();
        generic.set_range_bools(start, &source).unwrap();
        prop_assert_eq!(packed, generic);
    }

    #[test]
    fn prop_small_range_matches_get_range((bits, start, len) in pattern_with_range(300)) {
        let len = len.min(64);
        let list = make(&bits);
        let packed = list.get_small_range(start, len).unwrap();
        let range = list.get_range(start, len).unwrap();
        for i in 0..len {
            prop_assert_eq!((packed >> i) & 1 == 1, range.get(i).unwrap());
        }
        // Bits above the range are zero-padded.
        if len < 64 {
            prop_assert_eq!(packed >> len, 0);
        }
    }

    #[test]
    fn prop_bytes_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let list = BitList::from_bytes(&bytes).unwrap();
        prop_assert_eq!(list.len(), bytes.len() * 8);
        prop_assert_eq!(list.to_bytes(), bytes);
    }
}

// =============================================================================
// ALIASED RANGE COPY
// =============================================================================

proptest! {
    #[test]
    fn prop_copy_within_matches_detached_oracle(
        (bits, src, dst, len) in pattern_with_two_ranges(400)
    ) {
        let mut direct = make(&bits);
        direct.copy_range_within(src, dst, len).unwrap();

        // Oracle: snapshot the source range into an independent list first,
        // so the overwrite cannot observe its own output.
        let mut oracle = make(&bits);
        let snapshot = oracle.get_range(src, len).unwrap();
        oracle.set_range(dst, &snapshot).unwrap();

        prop_assert_eq!(direct, oracle);
    }

    #[test]
    fn prop_copy_within_same_position_is_noop((bits, start, len) in pattern_with_range(300)) {
        let original = make(&bits);
        let mut list = original.clone();
        list.copy_range_within(start, start, len).unwrap();
        prop_assert_eq!(list, original);
    }
}

// =============================================================================
// SEARCH, COMPARE, EDIT
// =============================================================================

proptest! {
    #[test]
    fn prop_index_of_matches_naive(bits in bools_strategy(500), value in any::<bool>()) {
        let list = make(&bits);
        prop_assert_eq!(list.index_of(value), bits.iter().position(|&b| b == value));
        prop_assert_eq!(list.last_index_of(value), bits.iter().rposition(|&b| b == value));
        prop_assert_eq!(list.contains(value), bits.contains(&value));
    }

    #[test]
    fn prop_compare_is_common_prefix_length(
        a in bools_strategy(300),
        b in bools_strategy(300),
    ) {
        let result = make(&a).compare(&make(&b));
        let naive = a
            .iter()
            .zip(b.iter())
            .take_while(|(x, y)| x == y)
            .count();
        prop_assert_eq!(result, naive);
    }

    #[test]
    fn prop_insert_then_remove_restores(
        bits in bools_strategy(300),
        inserted in bools_strategy(100),
        at_raw in any::<usize>(),
    ) {
        let at = at_raw % (bits.len() + 1);
        let original = make(&bits);
        let mut list = original.clone();
        list.insert(at, &make(&inserted)).unwrap();
        prop_assert_eq!(list.len(), bits.len() + inserted.len());
        list.remove_range(at, inserted.len()).unwrap();
        prop_assert_eq!(list, original);
    }

    #[test]
    fn prop_reverse_matches_reversed_vec(bits in bools_strategy(400)) {
        let mut list = make(&bits);
        list.reverse();
        let mut expected = bits.clone();
        expected.reverse();
        prop_assert_eq!(list.clone(), make(&expected));

        list.reverse();
        prop_assert_eq!(list, make(&bits));
    }

    #[test]
    fn prop_set_all_matches_loop((bits, start, len) in pattern_with_range(400), value in any::<bool>()) {
        let mut bulk = make(&bits);
        bulk.set_all(value, start, len).unwrap();

        let mut looped = make(&bits);
        for i in start..start + len {
            looped.set(i, value).unwrap();
        }
        prop_assert_eq!(bulk, looped);
    }

    #[test]
    fn prop_count_ones_matches_naive(bits in bools_strategy(500)) {
        let list = make(&bits);
        let expected = bits.iter().filter(|&&b| b).count();
        prop_assert_eq!(list.count_ones(), expected);
        prop_assert_eq!(list.count_zeros(), bits.len() - expected);
    }
}

// =============================================================================
// CONCRETE SCENARIOS
// =============================================================================

/// 320-bit buffer, copy a 20-bit window from offset 72 over offset 123. Both
/// ranges straddle word boundaries and the copy crosses five words in total.
#[test]
fn test_320_bit_window_copy_scenario() {
    let mut list = BitList::new();
    list.add_series_with(320, |i| (i * 13 + 5) % 7 < 3).unwrap();
    let mut oracle: Vec<bool> = list.iter().collect();

    let window = list.get_range(72, 20).unwrap();
    list.set_range(123, &window).unwrap();

    let snapshot: Vec<bool> = oracle[72..92].to_vec();
    oracle.splice(123..143, snapshot);

    assert_eq!(list.len(), 320);
    let result: Vec<bool> = list.iter().collect();
    assert_eq!(result, oracle);
}

#[test]
fn test_large_shift_keeps_all_bits() {
    let mut list = BitList::new();
    list.add_series_with(1000, |i| i % 17 == 0).unwrap();
    let before = list.count_ones();

    let prefix = BitList::with_size(130, false).unwrap();
    list.insert(0, &prefix).unwrap();
    assert_eq!(list.count_ones(), before);
    assert_eq!(list.index_of(true), Some(130));

    list.remove_range(0, 130).unwrap();
    assert_eq!(list.count_ones(), before);
    assert_eq!(list.index_of(true), Some(0));
}
