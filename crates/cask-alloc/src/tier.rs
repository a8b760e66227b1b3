//! Numeric bounds of identifier length tiers.
//!
//! A *length tier* is the set of base-36 identifiers of one fixed character
//! length. Tier `L` covers the half-open numeric range `[36^(L-1), 36^L)`,
//! except tier 1 which starts at 1, so every value in a tier renders to
//! exactly `L` characters with no leading-zero ambiguity. Allocation always
//! draws from the current tier; growth moves to the next, 36x larger tier.

/// Maximum supported identifier length.
///
/// `36^24` still fits in a `u128`; the counter is clamped here. Reaching this
/// tier would require filling astronomically more identifiers than any
/// deployment can hold.
pub const MAX_LENGTH: u32 = 24;

/// Half-open numeric range `[lo, hi)` of the given length tier.
///
/// Lengths are clamped to `1..=MAX_LENGTH`.
pub fn bounds(length: u32) -> (u128, u128) {
    let length = length.clamp(1, MAX_LENGTH);
    let hi = 36u128.pow(length);
    let lo = if length == 1 { 1 } else { 36u128.pow(length - 1) };
    (lo, hi)
}

/// Number of identifiers in the given length tier.
pub fn capacity(length: u32) -> u128 {
    let (lo, hi) = bounds(length);
    hi - lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use cask_types::ShortId;
    use proptest::prelude::*;

    #[test]
    fn tier_one_is_single_characters() {
        assert_eq!(bounds(1), (1, 36));
        assert_eq!(capacity(1), 35);
    }

    #[test]
    fn tier_two_is_two_characters() {
        assert_eq!(bounds(2), (36, 1296));
        assert_eq!(capacity(2), 1260);
    }

    #[test]
    fn tiers_are_contiguous() {
        for length in 2..=6 {
            let (_, prev_hi) = bounds(length - 1);
            let (lo, _) = bounds(length);
            assert_eq!(prev_hi, lo);
        }
    }

    #[test]
    fn out_of_range_lengths_are_clamped() {
        assert_eq!(bounds(0), bounds(1));
        assert_eq!(bounds(MAX_LENGTH + 10), bounds(MAX_LENGTH));
    }

    proptest! {
        #[test]
        fn every_tier_value_renders_to_tier_length(length in 1u32..=8) {
            let (lo, hi) = bounds(length);
            for value in [lo, lo + 1, hi - 1] {
                let id = ShortId::from_u128(value);
                prop_assert_eq!(id.len(), length as usize);
            }
        }
    }
}
