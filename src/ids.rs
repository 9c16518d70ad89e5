//! Node identifier generation and validation.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of generated identifiers.
pub const ID_LENGTH: usize = 8;

/// Produces random alphanumeric node identifiers.
///
/// Collisions are resolved by the caller, which knows the set of live ids;
/// see [`IdGenerator::generate_unique`].
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator, for tests and reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A fresh 8-character identifier drawn from `[A-Za-z0-9]`.
    pub fn generate(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(ID_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Re-roll until `in_use` rejects the candidate.
    pub fn generate_unique<F>(&mut self, in_use: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let id = self.generate();
            if !in_use(&id) {
                return id;
            }
            log::debug!("generated id {} collides, re-rolling", id);
        }
    }
}

/// Whether `new_id` may be given to the node currently called `excluding`.
///
/// The candidate is trimmed first; it must be non-empty and must not name
/// any live node other than `excluding`.
pub fn is_valid_id<'a, I>(new_id: &str, excluding: &str, live_ids: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let candidate = new_id.trim();
    !candidate.is_empty()
        && !live_ids
            .into_iter()
            .any(|id| id == candidate && id != excluding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_generated_ids_are_alphanumeric() {
        let mut ids = IdGenerator::seeded(7);
        for _ in 0..100 {
            let id = ids.generate();
            assert_eq!(id.len(), ID_LENGTH);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "{}", id);
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = IdGenerator::seeded(42);
        let mut b = IdGenerator::seeded(42);
        assert_eq!(a.generate(), b.generate());
    }

    #[test]
    fn test_generate_unique_rerolls_on_collision() {
        let mut ids = IdGenerator::seeded(1);
        let attempts = Cell::new(0);
        let id = ids.generate_unique(|_| {
            attempts.set(attempts.get() + 1);
            attempts.get() < 3
        });
        assert_eq!(attempts.get(), 3);
        assert_eq!(id.len(), ID_LENGTH);
    }

    #[test]
    fn test_is_valid_id() {
        let live = ["a", "b"];
        assert!(is_valid_id("c", "a", live));
        assert!(is_valid_id("a", "a", live));
        assert!(is_valid_id("  c  ", "a", live));
        assert!(!is_valid_id("b", "a", live));
        assert!(!is_valid_id(" b ", "a", live));
        assert!(!is_valid_id("", "a", live));
        assert!(!is_valid_id("   ", "a", live));
    }
}
