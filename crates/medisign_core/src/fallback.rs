//! crates/medisign_core/src/fallback.rs
//!
//! Canned welcome messages used whenever the generation API does not produce one.

use rand::Rng;

const TEMPLATES: [&str; 5] = [
    "Welcome to MediSign AI, {user}! Ready to break down communication barriers?",
    "Hello {user}! MediSign AI is here to make healthcare accessible.",
    "Welcome back, {user}! Let's continue making communication easier.",
    "Great to see you, {user}! Your accessible healthcare journey starts now.",
    "Hi {user}! Together, we'll make healthcare communication seamless.",
];

/// Number of distinct fallback templates.
pub const TEMPLATE_COUNT: usize = TEMPLATES.len();

/// Returns the name portion of an email address.
///
/// Everything before the first `@`. An address without `@`, or with nothing
/// before it, yields the whole trimmed input instead.
pub fn local_part(email: &str) -> &str {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => email,
    }
}

/// Renders template `index` for `email`.
///
/// Panics if `index >= TEMPLATE_COUNT`.
pub fn fallback_at(email: &str, index: usize) -> String {
    TEMPLATES[index].replace("{user}", local_part(email))
}

/// Picks a template uniformly at random using the supplied generator.
pub fn random_fallback_with<R: Rng>(email: &str, rng: &mut R) -> String {
    fallback_at(email, rng.random_range(0..TEMPLATE_COUNT))
}

/// Picks a template uniformly at random using the thread-local generator.
pub fn random_fallback(email: &str) -> String {
    random_fallback_with(email, &mut rand::rng())
}

/// Every message `random_fallback` can produce for `email`.
pub fn fallback_candidates(email: &str) -> Vec<String> {
    (0..TEMPLATE_COUNT).map(|i| fallback_at(email, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn local_part_handles_malformed_addresses() {
        assert_eq!(local_part("alice@example.com"), "alice");
        assert_eq!(local_part("bob"), "bob");
        assert_eq!(local_part("@example.com"), "@example.com");
        assert_eq!(local_part("  carol@x.org "), "carol");
        assert_eq!(local_part("a@b@c"), "a");
    }

    #[test]
    fn every_template_interpolates_the_local_part() {
        let candidates = fallback_candidates("alice@example.com");
        assert_eq!(candidates.len(), TEMPLATE_COUNT);
        for message in &candidates {
            assert!(message.contains("alice"), "missing name in {message:?}");
            assert!(!message.contains("{user}"));
            assert!(!message.contains("example.com"));
        }
    }

    #[test]
    fn same_seed_picks_same_template() {
        let first = random_fallback_with("alice@example.com", &mut StdRng::seed_from_u64(7));
        let second = random_fallback_with("alice@example.com", &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn random_fallback_is_always_a_candidate() {
        let candidates = fallback_candidates("dana@clinic.io");
        for _ in 0..50 {
            assert!(candidates.contains(&random_fallback("dana@clinic.io")));
        }
    }

    #[test]
    fn selection_covers_the_whole_template_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates = fallback_candidates("eve@example.com");
        let mut seen = [false; TEMPLATE_COUNT];
        for _ in 0..500 {
            let message = random_fallback_with("eve@example.com", &mut rng);
            let index = candidates.iter().position(|c| *c == message).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
