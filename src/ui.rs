use anyhow::{Context, Result};
use console::{Style, Term};
use guesslist::{Generation, GeneratorConfig, Truncation, WELL_KNOWN_CATEGORIES};
use indicatif::{ProgressBar, ProgressStyle};
use rpassword::read_password;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MIN_USEFUL_CATEGORIES: usize = 2;
pub const MAX_ANSWER_BYTES: usize = 4096;

pub struct InputInfo {
    pub categories: Vec<CategoryInfo>,
}

pub struct CategoryInfo {
    pub label: String,
    pub token_count: usize,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn status_style(ok: bool, color_support: bool) -> Style {
    match (color_support, ok) {
        (false, _) => Style::new(),
        (true, true) => Style::new().green(),
        (true, false) => Style::new().yellow(),
    }
}

fn validate_control_characters(s: &str, input_name: &str) -> Result<()> {
    let control_chars: Vec<(usize, char)> = s
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .collect();

    if !control_chars.is_empty() {
        let term = Term::stderr();

        let warning_msg = format!(
            "WARNING: {} contains {} control character(s) at position(s): {}",
            input_name,
            control_chars.len(),
            control_chars
                .iter()
                .map(|(pos, _)| pos.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        term.write_line(&warning_msg)?;
        term.write_str("Continue anyway? [y/N]: ")?;
        term.flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        let response = response.trim().to_lowercase();

        term.clear_last_lines(2)?;

        if response != "y" && response != "yes" {
            anyhow::bail!("Aborted");
        }
    }

    Ok(())
}

/// Trims, NFC-normalizes and length-checks one answer.
pub fn normalize_and_validate(s: &str, input_name: &str) -> Result<Zeroizing<String>> {
    let normalized: Zeroizing<String> = Zeroizing::new(s.trim().nfc().collect());
    validate_control_characters(&normalized, input_name)?;

    if normalized.len() > MAX_ANSWER_BYTES {
        anyhow::bail!(
            "{} too long ({} bytes, maximum is {})",
            input_name,
            normalized.len(),
            MAX_ANSWER_BYTES
        );
    }

    Ok(normalized)
}

/// Asks for every well-known category in turn. Empty answers are skipped.
pub fn prompt_categories(hide_input: bool) -> Result<Vec<(String, Zeroizing<String>)>> {
    println!("Press Enter to skip a question.\n");

    let mut answers = Vec::new();

    for (index, category) in WELL_KNOWN_CATEGORIES.iter().enumerate() {
        print!("In [{}] {}: ", index, category.prompt);
        io::stdout().flush()?;

        let raw = if hide_input {
            Zeroizing::new(read_password().context("Failed to read answer")?)
        } else {
            let mut input = Zeroizing::new(String::new());
            io::stdin()
                .read_line(&mut input)
                .context("Failed to read answer")?;
            input
        };

        let normalized = normalize_and_validate(&raw, category.label)?;
        if normalized.is_empty() {
            continue;
        }

        answers.push((category.label.to_string(), normalized));
    }

    Ok(answers)
}

pub fn show_progress<F, T>(unicode_support: bool, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    println!();

    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠋"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message("Generating wordlist...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

pub fn display_output(
    path: &Path,
    generation: &Generation,
    input_info: &InputInfo,
    config: &GeneratorConfig,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", path.display());
        return;
    }

    display_settings(input_info, config, options);
    display_stats(generation, elapsed, options);

    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let ok = !generation.report.fallback;
    let style = status_style(ok, options.color_support);

    println!(
        "\n{} Wordlist: {} {} written to {}",
        style.apply_to(format!("[{}]", if ok { check_ok } else { check_warn })),
        style.apply_to(generation.wordlist.len()),
        plural(generation.wordlist.len(), "word", "words"),
        path.display()
    );
}

fn display_settings(input_info: &InputInfo, config: &GeneratorConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last, pipe) = tree_glyphs(options.unicode_support);

    let count = input_info.categories.len();
    let categories_ok = count >= MIN_USEFUL_CATEGORIES;
    let style = status_style(categories_ok, options.color_support);

    println!("Settings:");

    println!(
        "  {} Categories {} {} {}",
        branch,
        style.apply_to(format!("[{}]", if categories_ok { check_ok } else { check_warn })),
        style.apply_to(count),
        plural(count, "category", "categories")
    );

    for (i, category) in input_info.categories.iter().enumerate() {
        let prefix = if i == count - 1 { last } else { branch };
        println!(
            "  {}  {} {} ({} {})",
            pipe,
            prefix,
            category.label,
            category.token_count,
            plural(category.token_count, "token", "tokens")
        );
    }

    let year = config.year();
    println!("  {} Length     >= {} chars", branch, config.min_length);
    println!(
        "  {} Limit      {} words ({} truncation)",
        branch,
        config.max_size,
        match config.truncation {
            Truncation::Ranked => "ranked",
            Truncation::Arbitrary => "arbitrary",
        }
    );
    println!(
        "  {} Years      {}-{}",
        branch,
        year - config.years_back,
        year + config.years_ahead
    );
    println!(
        "  {} Window     {} candidates",
        last, config.transform_window
    );

    println!();
}

fn display_stats(generation: &Generation, elapsed: Duration, options: &DisplayOptions) {
    let (_, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last, _) = tree_glyphs(options.unicode_support);
    let report = &generation.report;
    let warn = status_style(false, options.color_support);

    println!("Stats:");

    println!(
        "  {} Tokens     {}{}",
        branch,
        report.tokens,
        if report.padded { " (padded with common words)" } else { "" }
    );
    println!("  {} Base       {}", branch, report.base);

    print!("  {} Leetspeak  +{}", branch, report.substitution);
    if report.substitution_limited {
        print!(" {}", warn.apply_to(format!("[{}] limit reached", check_warn)));
    }
    println!();

    println!("  {} Case       +{}", branch, report.case);
    println!("  {} Years      +{}", branch, report.years);
    println!("  {} Specials   +{}", branch, report.special);

    print!("  {} Candidates {}", branch, report.candidates);
    if report.truncated {
        print!(" {}", warn.apply_to(format!("[{}] truncated", check_warn)));
    }
    println!();

    if report.fallback {
        println!(
            "  {} Output     {}",
            branch,
            warn.apply_to(format!("[{}] fallback words", check_warn))
        );
    } else {
        let stats = generation.wordlist.stats();
        println!(
            "  {} Length     {}-{} chars (avg {:.1})",
            branch, stats.min_length, stats.max_length, stats.avg_length
        );
        println!("  {} Charset    {}", branch, stats.charset());
    }

    println!("  {} Time       {:.1}s", last, elapsed.as_secs_f64());
}

fn tree_glyphs(unicode_support: bool) -> (&'static str, &'static str, &'static str) {
    if unicode_support {
        ("├─", "└─", "│")
    } else {
        ("|-", "`-", "|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "word", "words"), "word");
        assert_eq!(plural(0, "word", "words"), "words");
        assert_eq!(plural(7, "word", "words"), "words");
    }

    #[test]
    fn test_normalize_nfc() {
        let nfc = "Zoë";
        let nfd = "Zoe\u{0308}";

        assert_ne!(nfc.as_bytes(), nfd.as_bytes());

        let normalized_nfc = normalize_and_validate(nfc, "test").unwrap();
        let normalized_nfd = normalize_and_validate(nfd, "test").unwrap();

        assert_eq!(*normalized_nfc, *normalized_nfd);
    }

    #[test]
    fn test_trim_whitespace() {
        let cases = vec![
            ("  Max  ", "Max"),
            ("\tRex\t", "Rex"),
            ("\nBerlin\n", "Berlin"),
            ("  John Smith  ", "John Smith"),
        ];

        for (input, expected) in cases {
            let normalized = normalize_and_validate(input, "test").unwrap();
            assert_eq!(normalized.as_str(), expected);
        }
    }

    #[test]
    fn test_empty_after_trim() {
        for input in ["   ", "\t\t", "\n\n", ""] {
            let normalized = normalize_and_validate(input, "test").unwrap();
            assert!(normalized.is_empty());
        }
    }

    #[test]
    fn test_answer_too_long() {
        let input = "a".repeat(MAX_ANSWER_BYTES + 1);
        let err = normalize_and_validate(&input, "name").unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_tree_glyphs_ascii_fallback() {
        assert_eq!(tree_glyphs(false), ("|-", "`-", "|"));
    }
}
