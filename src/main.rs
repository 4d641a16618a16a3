mod ui;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use guesslist::{GeneratorConfig, TokenStore, Truncation, default_file_name};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "guesslist",
    version,
    author,
    about = "Targeted password-candidate wordlists from personal information"
)]
struct Cli {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    birthdate: Option<String>,

    #[arg(long)]
    pets: Option<String>,

    #[arg(long)]
    places: Option<String>,

    #[arg(long)]
    hobbies: Option<String>,

    #[arg(long)]
    additional: Option<String>,

    /// Extra category, e.g. --field team=Arsenal
    #[arg(long = "field", value_name = "LABEL=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print entries to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    #[arg(short, long, value_enum, default_value = "standard")]
    preset: Preset,

    #[arg(long)]
    min_length: Option<usize>,

    #[arg(long)]
    max_size: Option<usize>,

    /// Reference year for year suffixes (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    #[arg(long, value_enum, default_value = "ranked")]
    truncation: TruncationMode,

    /// Read interactive answers without echo
    #[arg(long)]
    hide_input: bool,

    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum Preset {
    Standard,
    Compact,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum TruncationMode {
    Ranked,
    Arbitrary,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (label, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=VALUE, got \"{}\"", s))?;

    let label = label.trim();
    if label.is_empty() {
        return Err("field label cannot be empty".to_string());
    }

    Ok((label.to_string(), value.to_string()))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut config = match self.preset {
            Preset::Standard => GeneratorConfig::STANDARD,
            Preset::Compact => GeneratorConfig::COMPACT,
        };

        if let Some(min_length) = self.min_length {
            config.min_length = min_length;
        }
        if let Some(max_size) = self.max_size {
            config.max_size = max_size;
            config.expansion_limit = config.expansion_limit.max(max_size);
        }
        config.reference_year = self.year;
        config.truncation = match self.truncation {
            TruncationMode::Ranked => Truncation::Ranked,
            TruncationMode::Arbitrary => Truncation::Arbitrary,
        };

        config
    }

    fn flag_answers(&self) -> Vec<(String, &str)> {
        let named = [
            ("name", &self.name),
            ("birthdate", &self.birthdate),
            ("pets", &self.pets),
            ("places", &self.places),
            ("hobbies", &self.hobbies),
            ("additional", &self.additional),
        ];

        named
            .into_iter()
            .filter_map(|(label, value)| value.as_deref().map(|v| (label.to_string(), v)))
            .chain(
                self.fields
                    .iter()
                    .map(|(label, value)| (label.clone(), value.as_str())),
            )
            .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    config.validate().context("Invalid generator settings")?;

    let flag_answers = cli.flag_answers();
    if flag_answers.is_empty() && cli.stdout {
        anyhow::bail!("--stdout needs at least one category flag");
    }

    let answers = if flag_answers.is_empty() {
        ui::prompt_categories(cli.hide_input)?
    } else {
        flag_answers
            .into_iter()
            .map(|(label, value)| -> Result<_> {
                let normalized = ui::normalize_and_validate(value, &label)?;
                Ok((label, normalized))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let mut store = TokenStore::new();
    for (label, value) in &answers {
        store
            .add(label, value)
            .with_context(|| format!("Failed to add \"{}\"", label))?;
    }
    drop(answers);

    let input_info = ui::InputInfo {
        categories: store
            .categories()
            .map(|label| ui::CategoryInfo {
                label: label.to_string(),
                token_count: store.tokens(label).map_or(0, |t| t.len()),
            })
            .collect(),
    };

    if cli.stdout {
        let generation = store.generate(&config)?;
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        generation.wordlist.write_lines(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let path = cli.output.clone().unwrap_or_else(|| {
        PathBuf::from(default_file_name(chrono::Local::now().naive_local()))
    });

    let (generation, elapsed) = ui::show_progress(options.unicode_support, || {
        store
            .generate(&config)
            .context("Wordlist generation failed")
    })?;

    generation
        .wordlist
        .write_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ui::display_output(&path, &generation, &input_info, &config, elapsed, &options);

    Ok(())
}
