use crate::combine::{CandidateSet, Stage};
use crate::config::GeneratorConfig;
use std::collections::HashSet;

/// Letter substitutions, applied to the lowercased candidate.
const SUBSTITUTIONS: [(char, &[&str]); 10] = [
    ('a', &["4", "@"]),
    ('b', &["8"]),
    ('e', &["3"]),
    ('g', &["6", "9"]),
    ('i', &["1", "!"]),
    ('l', &["1"]),
    ('o', &["0"]),
    ('s', &["5", "$"]),
    ('t', &["7", "+"]),
    ('z', &["2"]),
];

const NUMERIC_PATTERNS: [&str; 4] = ["123", "1234", "12345", "123456"];

const SPECIAL_CHARS: [char; 17] = [
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '-', '_', '+', '=', '.', ',', '?',
];

const SPECIAL_COMBOS: [&str; 7] = ["!@", "!@#", "123", "123!", "!123", "!!!", "###"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub substitution: usize,
    pub substitution_limited: bool,
    pub case: usize,
    pub years: usize,
    pub special: usize,
}

/// Every substitution variant of `word`, sorted, including `word` itself.
///
/// Expands to a fixed point: each pass replaces all occurrences of one more
/// mapped letter in the previous pass's results. Variants are lowercase, and
/// since no replacement is itself a mapped letter the result is the same for
/// any table order. There are at most `prod(1 + replacements)` over the
/// letters present.
pub fn substitution_variants(word: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::from([word.to_string()]);
    let mut frontier = vec![word.to_string()];

    while !frontier.is_empty() {
        let mut next = Vec::new();

        for variant in &frontier {
            let lower = variant.to_lowercase();
            for (letter, replacements) in SUBSTITUTIONS {
                if !lower.contains(letter) {
                    continue;
                }
                for replacement in replacements {
                    let candidate = lower.replace(letter, replacement);
                    if seen.insert(candidate.clone()) {
                        next.push(candidate);
                    }
                }
            }
        }

        frontier = next;
    }

    let mut variants: Vec<String> = seen.into_iter().collect();
    variants.sort_unstable();
    variants
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
    }
}

/// Uppercases the first letter of every alphabetic run, lowercases the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_word = false;

    for c in word.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }

    out
}

pub fn case_variants(word: &str) -> Vec<String> {
    if !word.chars().any(char::is_alphabetic) {
        return vec![word.to_string()];
    }

    let mut variants = vec![
        word.to_string(),
        word.to_lowercase(),
        word.to_uppercase(),
        capitalize(word),
    ];

    if word.contains(' ') {
        variants.push(title_case(word));
    }

    variants.sort_unstable();
    variants.dedup();
    variants
}

/// Full years in `year - back ..= year + ahead`, their two-digit forms, and
/// the common numeric tails.
pub fn year_suffixes(word: &str, year: i32, back: i32, ahead: i32) -> Vec<String> {
    let years = (year - back)..=(year + ahead);
    let span = (back + ahead + 1).max(0) as usize;
    let mut variants = Vec::with_capacity(2 * span + NUMERIC_PATTERNS.len());

    for y in years.clone() {
        variants.push(format!("{}{}", word, y));
    }
    for y in years {
        variants.push(format!("{}{:02}", word, y.rem_euclid(100)));
    }
    for pattern in NUMERIC_PATTERNS {
        variants.push(format!("{}{}", word, pattern));
    }

    variants
}

pub fn special_suffixes(word: &str) -> Vec<String> {
    SPECIAL_CHARS
        .iter()
        .map(|c| format!("{}{}", word, c))
        .chain(SPECIAL_COMBOS.iter().map(|combo| format!("{}{}", word, combo)))
        .collect()
}

/// Adds substitution variants of every candidate, stopping once the pool
/// holds `limit` entries. Bases are visited in rank order, so the budget goes
/// to the earliest combinations first.
pub fn apply_substitutions(mut pool: CandidateSet, limit: usize) -> (CandidateSet, usize, bool) {
    let before = pool.len();
    let mut limited = false;

    'bases: for (word, lineage) in pool.ranked() {
        for variant in substitution_variants(&word) {
            if pool.len() >= limit {
                limited = true;
                break 'bases;
            }
            pool.insert(variant, lineage, Stage::Substitution);
        }
    }

    if limited {
        tracing::warn!(limit, "substitution expansion stopped at limit");
    }

    let added = pool.len() - before;
    (pool, added, limited)
}

pub fn apply_case_variants(mut pool: CandidateSet) -> (CandidateSet, usize) {
    let before = pool.len();

    for (word, lineage) in pool.ranked() {
        for variant in case_variants(&word) {
            pool.insert(variant, lineage, Stage::Case);
        }
    }

    let added = pool.len() - before;
    (pool, added)
}

/// Runs the four expanders in order. Year and special-character suffixes are
/// only applied to the first `transform_window` candidates in rank order, so
/// base combinations are suffixed before any of their variants.
pub fn transform(pool: CandidateSet, config: &GeneratorConfig) -> (CandidateSet, TransformStats) {
    let mut stats = TransformStats::default();

    let (pool, added, limited) = apply_substitutions(pool, config.expansion_limit);
    stats.substitution = added;
    stats.substitution_limited = limited;
    tracing::debug!(added, total = pool.len(), "substitution stage done");

    let (mut pool, added) = apply_case_variants(pool);
    stats.case = added;
    tracing::debug!(added, total = pool.len(), "case stage done");

    let mut window = pool.ranked();
    window.truncate(config.transform_window);

    let year = config.year();
    for (word, lineage) in &window {
        let variants = year_suffixes(word, year, config.years_back, config.years_ahead);
        stats.years += variants.len();
        for variant in variants {
            pool.insert(variant, *lineage, Stage::Year);
        }
    }
    for (word, lineage) in &window {
        let variants = special_suffixes(word);
        stats.special += variants.len();
        for variant in variants {
            pool.insert(variant, *lineage, Stage::Special);
        }
    }

    tracing::debug!(
        window = window.len(),
        year,
        total = pool.len(),
        "suffix stages done"
    );

    (pool, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn as_set(words: Vec<String>) -> HashSet<String> {
        words.into_iter().collect()
    }

    fn candidates(words: &[&str]) -> CandidateSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_substitution_single_letter() {
        assert_eq!(
            as_set(substitution_variants("car")),
            set(&["car", "c4r", "c@r"])
        );
    }

    #[test]
    fn test_substitution_two_letters() {
        // a: 2 choices + keep, t: 2 choices + keep.
        assert_eq!(
            as_set(substitution_variants("cat")),
            set(&["cat", "c4t", "c@t", "ca7", "ca+", "c47", "c4+", "c@7", "c@+"])
        );
    }

    #[test]
    fn test_substitution_no_mapped_letters() {
        assert_eq!(substitution_variants("xyw"), vec!["xyw"]);
        assert_eq!(substitution_variants("1990"), vec!["1990"]);
        assert_eq!(as_set(substitution_variants("xyz")), set(&["xyz", "xy2"]));
    }

    #[test]
    fn test_substitution_lowercases_variants() {
        let variants = as_set(substitution_variants("Cat"));
        assert_eq!(
            variants,
            set(&["Cat", "c4t", "c@t", "ca7", "ca+", "c47", "c4+", "c@7", "c@+"])
        );
        assert!(!variants.contains("cat"));
    }

    #[test]
    fn test_substitution_combines_letters() {
        let variants = as_set(substitution_variants("toast"));
        // t: 2 choices + keep, o: 1 + keep, a: 2 + keep, s: 2 + keep.
        assert_eq!(variants.len(), 3 * 2 * 3 * 3);
        assert!(variants.contains("70@57"));
        assert!(variants.contains("+o4s+"));
        assert!(variants.contains("toast"));
    }

    #[test]
    fn test_substitution_replaces_every_occurrence() {
        let variants = as_set(substitution_variants("anna"));
        assert!(variants.contains("4nn4"));
        assert!(variants.contains("@nn@"));
        assert!(!variants.contains("4nna"));
    }

    #[test]
    fn test_case_variants_lowercase_word() {
        assert_eq!(as_set(case_variants("abc")), set(&["abc", "ABC", "Abc"]));
    }

    #[test]
    fn test_case_variants_no_letters() {
        assert_eq!(case_variants("123"), vec!["123"]);
        assert_eq!(case_variants("!@#"), vec!["!@#"]);
    }

    #[test]
    fn test_case_variants_mixed_case() {
        assert_eq!(
            as_set(case_variants("mAx")),
            set(&["mAx", "max", "MAX", "Max"])
        );
    }

    #[test]
    fn test_case_variants_title_only_with_space() {
        assert_eq!(
            as_set(case_variants("john smith")),
            set(&["john smith", "JOHN SMITH", "John smith", "John Smith"])
        );
        assert!(!case_variants("john_smith").contains(&"John_Smith".to_string()));
    }

    #[test]
    fn test_title_case_boundaries() {
        assert_eq!(title_case("new york1990city"), "New York1990City");
        assert_eq!(title_case("o'NEIL"), "O'Neil");
    }

    #[test]
    fn test_capitalize_lowers_tail() {
        assert_eq!(capitalize("mAX"), "Max");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émile"), "Émile");
    }

    #[test]
    fn test_year_suffixes() {
        let variants = year_suffixes("x", 2024, 30, 5);

        assert_eq!(variants.len(), 36 + 36 + 4);
        assert!(variants.contains(&"x2024".to_string()));
        assert!(variants.contains(&"x24".to_string()));
        assert!(variants.contains(&"x123456".to_string()));
        assert!(variants.contains(&"x1994".to_string()));
        assert!(variants.contains(&"x2029".to_string()));
        assert!(variants.contains(&"x00".to_string()));
        assert!(!variants.contains(&"x1993".to_string()));
        assert!(!variants.contains(&"x2030".to_string()));
    }

    #[test]
    fn test_special_suffixes() {
        let variants = special_suffixes("max");

        assert_eq!(variants.len(), 17 + 7);
        assert!(variants.contains(&"max!".to_string()));
        assert!(variants.contains(&"max?".to_string()));
        assert!(variants.contains(&"max!@#".to_string()));
        assert!(variants.contains(&"max###".to_string()));
    }

    #[test]
    fn test_substitution_stage_respects_limit() {
        let (pool, added, limited) =
            apply_substitutions(candidates(&["toast", "sister", "gallows"]), 10);

        assert!(limited);
        assert_eq!(pool.len(), 10);
        assert_eq!(added, 7);
    }

    #[test]
    fn test_substitution_limit_favors_earliest_base() {
        let (pool, added, limited) = apply_substitutions(candidates(&["toast", "sister"]), 20);

        assert!(limited);
        assert_eq!(added, 18);
        // Only "sister" itself has six letters; all 18 variants come from "toast".
        assert_eq!(pool.iter().filter(|w| w.chars().count() == 6).count(), 1);
    }

    #[test]
    fn test_substitution_stage_is_deterministic_at_limit() {
        let first = apply_substitutions(candidates(&["toast", "sister", "gallows"]), 40).0;
        let second = apply_substitutions(candidates(&["toast", "sister", "gallows"]), 40).0;
        assert_eq!(first.into_ranked(), second.into_ranked());
    }

    #[test]
    fn test_transform_window_bounds_suffixes() {
        let config = GeneratorConfig {
            reference_year: Some(2024),
            transform_window: 1,
            ..GeneratorConfig::STANDARD
        };

        let (pool, stats) = transform(candidates(&["yyy", "xyx"]), &config);

        // The window is the first base, ahead of its own case variants.
        assert_eq!(stats.years, 76);
        assert_eq!(stats.special, 24);
        assert!(pool.contains("yyy2024"));
        assert!(pool.contains("yyy!"));
        assert!(!pool.contains("YYY!"));
        assert!(!pool.contains("xyx2024"));
    }

    #[test]
    fn test_window_takes_bases_before_variants() {
        let config = GeneratorConfig {
            reference_year: Some(2024),
            transform_window: 2,
            ..GeneratorConfig::STANDARD
        };

        let (pool, _) = transform(candidates(&["toast", "bella"]), &config);

        assert!(pool.contains("toast2024"));
        assert!(pool.contains("bella!"));
        assert!(!pool.contains("Toast!"));
        assert!(!pool.contains("70457!"));
    }

    #[test]
    fn test_transform_stages_feed_forward() {
        let config = GeneratorConfig {
            reference_year: Some(2024),
            ..GeneratorConfig::STANDARD
        };

        let (pool, stats) = transform(candidates(&["cat"]), &config);

        assert!(!stats.substitution_limited);
        assert_eq!(stats.substitution, 8);
        assert!(pool.contains("C4T"));
        assert!(pool.contains("C@t"));
        assert!(pool.contains("Cat2024"));
        assert!(pool.contains("c4t!@#"));
    }
}
