use crate::error::{Error, Result};
use chrono::Datelike;

/// How the finalizer picks survivors when the candidate set exceeds `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Truncation {
    /// Keep everything derived from the earliest input tokens. Within one
    /// token, shallower stages come first. Reproducible.
    #[default]
    Ranked,
    /// Keep whatever the hash set yields first. Not reproducible across runs.
    Arbitrary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub min_length: usize,
    pub max_size: usize,
    pub transform_window: usize,
    pub years_back: i32,
    pub years_ahead: i32,
    pub reference_year: Option<i32>,
    pub expansion_limit: usize,
    pub truncation: Truncation,
}

impl GeneratorConfig {
    pub const STANDARD: Self = Self {
        min_length: 3,
        max_size: 50_000,
        transform_window: 1000,
        years_back: 30,
        years_ahead: 5,
        reference_year: None,
        expansion_limit: 250_000,
        truncation: Truncation::Ranked,
    };

    pub const COMPACT: Self = Self {
        min_length: 3,
        max_size: 10_000,
        transform_window: 250,
        years_back: 30,
        years_ahead: 5,
        reference_year: None,
        expansion_limit: 50_000,
        truncation: Truncation::Ranked,
    };

    /// Year used for suffixing; falls back to the local calendar year.
    pub fn year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err(Error::InvalidConfig("min_length must be positive".into()));
        }
        if self.max_size == 0 {
            return Err(Error::InvalidConfig("max_size must be positive".into()));
        }
        if self.transform_window == 0 {
            return Err(Error::InvalidConfig(
                "transform_window must be positive".into(),
            ));
        }
        if self.years_back < 0 || self.years_ahead < 0 {
            return Err(Error::InvalidConfig("year range must not be negative".into()));
        }
        if self.expansion_limit < self.max_size {
            return Err(Error::InvalidConfig(format!(
                "expansion_limit ({}) must be at least max_size ({})",
                self.expansion_limit, self.max_size
            )));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}
