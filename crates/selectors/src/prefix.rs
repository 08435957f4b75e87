use rand::Rng;

/// Chooses the disambiguating function-name prefix for each mining attempt.
///
/// The policy driving the retries is bounded and lives in the orchestrator;
/// the naming scheme is pluggable so both are testable on their own.
pub trait PrefixStrategy {
    fn prefix_for_attempt(&mut self, attempt: u32) -> String;
}

/// Deterministic `"f"` on the first attempt, then `"f"` plus a random
/// lowercase-alphanumeric suffix that grows by one char every ten attempts,
/// pushing later retries into progressively larger name spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffixPrefix;

const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

impl PrefixStrategy for RandomSuffixPrefix {
    fn prefix_for_attempt(&mut self, attempt: u32) -> String {
        if attempt == 0 {
            return "f".to_string();
        }
        let len = (attempt / 10) as usize + 1;
        let mut rng = rand::rng();
        let mut prefix = String::with_capacity(1 + len);
        prefix.push('f');
        for _ in 0..len {
            let idx = rng.random_range(0..SUFFIX_CHARS.len());
            prefix.push(SUFFIX_CHARS[idx] as char);
        }
        prefix
    }
}
