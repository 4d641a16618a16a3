use crate::combine::{CandidateSet, char_len};
use crate::config::{GeneratorConfig, Truncation};

/// Returned whenever nothing usable survives, already in sorted order.
pub const FALLBACK_WORDS: [&str; 5] = ["123456", "admin", "password", "qwerty", "welcome"];

pub struct Finalized {
    pub words: Vec<String>,
    pub truncated: bool,
    pub fallback: bool,
}

pub fn fallback_words() -> Vec<String> {
    FALLBACK_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Caps, filters and sorts the candidate set. Never returns an empty list.
pub fn finalize(pool: CandidateSet, config: &GeneratorConfig) -> Finalized {
    let total = pool.len();
    let truncated = total > config.max_size;

    let mut words: Vec<String> = match config.truncation {
        Truncation::Ranked => {
            let mut words = pool.into_ranked();
            words.truncate(config.max_size);
            words
        }
        Truncation::Arbitrary => pool.into_words().take(config.max_size).collect(),
    };

    if truncated {
        tracing::warn!(
            total,
            max_size = config.max_size,
            "wordlist too large, trimming"
        );
    }

    words.retain(|word| char_len(word) >= config.min_length);
    words.sort_unstable();

    let fallback = words.is_empty();
    if fallback {
        tracing::warn!("empty wordlist after filtering, using fallback words");
        words = fallback_words();
    }

    Finalized {
        words,
        truncated,
        fallback,
    }
}
