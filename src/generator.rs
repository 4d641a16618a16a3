use crate::combine;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::finalize;
use crate::tokens::TokenStore;
use crate::transform;
use crate::wordlist::Wordlist;

/// What each stage contributed to a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub categories: usize,
    pub tokens: usize,
    pub padded: bool,
    pub base: usize,
    pub substitution: usize,
    pub substitution_limited: bool,
    pub case: usize,
    pub years: usize,
    pub special: usize,
    pub candidates: usize,
    pub truncated: bool,
    pub fallback: bool,
    pub output: usize,
}

pub struct Generation {
    pub wordlist: Wordlist,
    pub report: GenerationReport,
}

/// Runs the whole pipeline: combine, transform, finalize.
///
/// The store is consumed; its tokens are wiped when this returns. A store
/// with no categories yields the fallback list directly.
pub fn generate(store: TokenStore, config: &GeneratorConfig) -> Result<Generation> {
    config.validate()?;

    let mut report = GenerationReport {
        categories: store.category_count(),
        ..GenerationReport::default()
    };

    if store.is_empty() {
        tracing::warn!("no personal information provided, using fallback words");
        let words = finalize::fallback_words();
        report.fallback = true;
        report.output = words.len();
        return Ok(Generation {
            wordlist: Wordlist::from_sorted(words),
            report,
        });
    }

    let pool = store.pool()?;
    report.tokens = pool.len();
    tracing::info!(
        categories = report.categories,
        tokens = report.tokens,
        "generating combinations"
    );

    let base = combine::combine(&pool, config.min_length);
    report.padded = base.padded;
    if base.padded {
        tracing::info!("added common words due to insufficient input");
    }

    // Padding guarantees at least two tokens, and separator pairs are never
    // length-filtered.
    let candidates = base.candidates;
    debug_assert!(!candidates.is_empty());
    report.base = candidates.len();
    tracing::info!(base = report.base, "generated base combinations");

    drop(pool);
    drop(store);

    let (candidates, stats) = transform::transform(candidates, config);
    report.substitution = stats.substitution;
    report.substitution_limited = stats.substitution_limited;
    report.case = stats.case;
    report.years = stats.years;
    report.special = stats.special;
    report.candidates = candidates.len();
    tracing::info!(
        substitution = stats.substitution,
        case = stats.case,
        years = stats.years,
        special = stats.special,
        total = report.candidates,
        "applied transformations"
    );

    let finalized = finalize::finalize(candidates, config);
    report.truncated = finalized.truncated;
    report.fallback = finalized.fallback;
    report.output = finalized.words.len();
    tracing::info!(words = report.output, "final wordlist ready");

    Ok(Generation {
        wordlist: Wordlist::from_sorted(finalized.words),
        report,
    })
}
