use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use cask_types::id::ALPHABET;
use cask_types::{Category, ShortId, Timestamp};

use crate::config::{ConfigError, LengthConfig};
use crate::denylist::Denylist;
use crate::tier;

/// Draws per candidate before falling back to the deterministic construction.
const MAX_DRAWS: usize = 50;

/// Random characters appended to the timestamp in the fallback construction.
const FALLBACK_SUFFIX_LEN: usize = 4;

/// Mints candidate identifiers for the content store.
///
/// A candidate is a uniformly drawn value from the category's current length
/// tier, rendered in lowercase base-36 and screened against the denylist.
/// Candidates are **not** guaranteed unique — the content store's
/// insert-and-retry loop owns uniqueness and calls [`IdAllocator::grow`] when
/// a tier becomes too contended. `allocate` itself never fails: if no clean
/// candidate is found within [`MAX_DRAWS`] draws, a deterministic
/// timestamp-based identifier is produced instead.
pub struct IdAllocator {
    config: Arc<dyn LengthConfig>,
    denylist: Denylist,
}

impl IdAllocator {
    /// Create an allocator with the default denylist.
    pub fn new(config: Arc<dyn LengthConfig>) -> Self {
        Self::with_denylist(config, Denylist::default())
    }

    /// Create an allocator with a custom denylist.
    pub fn with_denylist(config: Arc<dyn LengthConfig>, denylist: Denylist) -> Self {
        Self { config, denylist }
    }

    /// Current identifier length for the category.
    pub fn current_length(&self, category: Category) -> u32 {
        self.config.current_length(category)
    }

    /// Advance the category to the next length tier. Returns the new length.
    pub fn grow(&self, category: Category) -> Result<u32, ConfigError> {
        let length = self.config.grow(category)?;
        debug!(category = %category, length, "identifier length grown");
        Ok(length)
    }

    /// Produce one candidate identifier at the category's current length.
    pub fn allocate(&self, category: Category) -> ShortId {
        let length = self.config.current_length(category);
        for _ in 0..MAX_DRAWS {
            let candidate = draw(length);
            if self.denylist.is_clean(candidate.as_str()) {
                return candidate;
            }
        }
        // No clean candidate in the budget. The deterministic construction
        // skips the denylist screen; see DESIGN.md.
        debug!(category = %category, length, "denylist exhausted draw budget, using fallback");
        fallback(length)
    }
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator")
            .field("denylist_len", &self.denylist.len())
            .finish()
    }
}

/// Uniform draw from the given length tier.
fn draw(length: u32) -> ShortId {
    let (lo, hi) = tier::bounds(length);
    let value = rand::thread_rng().gen_range(lo..hi);
    ShortId::from_u128(value)
}

/// Deterministic fallback: current unix-time milliseconds in base-36 plus a
/// short random suffix, tail-truncated (or zero-padded) to the tier length.
fn fallback(length: u32) -> ShortId {
    let length = length.clamp(1, tier::MAX_LENGTH) as usize;

    let mut s = ShortId::from_u128(Timestamp::now().as_millis() as u128)
        .as_str()
        .to_string();
    let mut rng = rand::thread_rng();
    for _ in 0..FALLBACK_SUFFIX_LEN {
        s.push(ALPHABET[rng.gen_range(0..36)] as char);
    }

    let s = if s.len() >= length {
        // The tail carries the fastest-varying timestamp digits and the
        // random suffix.
        s[s.len() - length..].to_string()
    } else {
        format!("{s:0>length$}")
    };
    ShortId::new(s).expect("fallback identifier is base-36")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryLengthConfig;
    use proptest::prelude::*;

    fn allocator_at(length: u32) -> IdAllocator {
        IdAllocator::new(Arc::new(InMemoryLengthConfig::starting_at(length)))
    }

    #[test]
    fn candidates_have_current_length() {
        for length in [1u32, 2, 3, 6] {
            let alloc = allocator_at(length);
            for _ in 0..50 {
                let id = alloc.allocate(Category::Metadata);
                assert_eq!(id.len(), length as usize);
            }
        }
    }

    #[test]
    fn candidates_stay_in_tier_bounds() {
        let alloc = allocator_at(2);
        let (lo, hi) = tier::bounds(2);
        for _ in 0..200 {
            let value = alloc.allocate(Category::Roles).value().unwrap();
            assert!((lo..hi).contains(&value), "{value} outside [{lo}, {hi})");
        }
    }

    #[test]
    fn growth_moves_to_next_tier() {
        let alloc = allocator_at(1);
        assert_eq!(alloc.grow(Category::Metadata).unwrap(), 2);
        let (lo, hi) = tier::bounds(2);
        for _ in 0..100 {
            let value = alloc.allocate(Category::Metadata).value().unwrap();
            assert!((lo..hi).contains(&value));
        }
        // The other category is untouched.
        assert_eq!(alloc.current_length(Category::Roles), 1);
    }

    #[test]
    fn random_path_candidates_are_clean() {
        // Length 4 is long enough for denylist entries to actually occur.
        let alloc = allocator_at(4);
        let denylist = Denylist::default();
        for _ in 0..500 {
            let id = alloc.allocate(Category::Metadata);
            assert!(denylist.is_clean(id.as_str()), "{id} is not clean");
        }
    }

    #[test]
    fn saturated_denylist_falls_back_at_tier_length() {
        // Every single character is denylisted, so no draw can succeed and
        // the fallback construction must be used. It still honors the length.
        let everything: Vec<String> = (0..36u128).map(|v| ShortId::from_u128(v).as_str().to_string()).collect();
        let config = Arc::new(InMemoryLengthConfig::starting_at(3));
        let alloc = IdAllocator::with_denylist(config, Denylist::new(&everything));

        let id = alloc.allocate(Category::Metadata);
        assert_eq!(id.len(), 3);
    }

    #[test]
    fn fallback_pads_when_tier_is_wide() {
        let everything: Vec<String> = (0..36u128).map(|v| ShortId::from_u128(v).as_str().to_string()).collect();
        let config = Arc::new(InMemoryLengthConfig::starting_at(20));
        let alloc = IdAllocator::with_denylist(config, Denylist::new(&everything));

        let id = alloc.allocate(Category::Roles);
        assert_eq!(id.len(), 20);
    }

    #[test]
    fn allocate_never_panics_at_any_length() {
        for length in 1..=8 {
            let alloc = allocator_at(length);
            let _ = alloc.allocate(Category::Metadata);
            let _ = alloc.allocate(Category::Roles);
        }
    }

    proptest! {
        #[test]
        fn allocation_is_well_formed(length in 1u32..=10) {
            let alloc = allocator_at(length);
            let id = alloc.allocate(Category::Metadata);
            prop_assert_eq!(id.len(), length as usize);
            prop_assert!(ShortId::new(id.as_str()).is_ok());
        }
    }
}
