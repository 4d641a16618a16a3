use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::generator::{self, Generation};
use zeroize::Zeroizing;

pub const MAX_CATEGORIES: usize = 16;
pub const MAX_TOKENS_PER_CATEGORY: usize = 32;
pub const MAX_POOL_TOKENS: usize = 64;

/// A category the interactive front end asks about, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const WELL_KNOWN_CATEGORIES: [Category; 6] = [
    Category {
        label: "name",
        prompt: "Name (first and/or last)",
    },
    Category {
        label: "birthdate",
        prompt: "Birth date or significant dates (DDMMYYYY, MMDDYYYY or year)",
    },
    Category {
        label: "pets",
        prompt: "Pet names",
    },
    Category {
        label: "places",
        prompt: "Significant places (hometown, favorite city, workplace)",
    },
    Category {
        label: "hobbies",
        prompt: "Hobbies or interests",
    },
    Category {
        label: "additional",
        prompt: "Anything else (family members, favorite teams)",
    },
];

type Token = Zeroizing<String>;

/// Trims and joins words with single spaces, so no token spans lines.
fn collapse_whitespace(value: &str) -> Token {
    let mut out = Zeroizing::new(String::with_capacity(value.len()));
    for word in value.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Categorized personal tokens for a single generation.
///
/// Tokens are wiped from memory when the store is dropped, and
/// [`TokenStore::generate`] consumes the store, so nothing outlives the call.
#[derive(Default)]
pub struct TokenStore {
    categories: Vec<(String, Vec<Token>)>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds free text. Each whitespace-separated word becomes a token, and so
    /// does the whole string with every whitespace run collapsed to one space.
    /// Blank input is ignored.
    pub fn add(&mut self, category: &str, value: &str) -> Result<()> {
        let words: Vec<&str> = value.split_whitespace().collect();
        if words.is_empty() {
            return Ok(());
        }

        let mut tokens: Vec<Token> = words
            .iter()
            .map(|word| Zeroizing::new(word.to_string()))
            .collect();
        tokens.push(collapse_whitespace(value));

        self.insert(category, tokens)
    }

    /// Adds pre-split values without splitting them further. Whitespace runs
    /// are collapsed to one space and blank values are dropped.
    pub fn add_list<I, S>(&mut self, category: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<Token> = values
            .into_iter()
            .map(|value| collapse_whitespace(value.as_ref()))
            .filter(|value| !value.is_empty())
            .collect();

        if tokens.is_empty() {
            return Ok(());
        }

        self.insert(category, tokens)
    }

    fn insert(&mut self, category: &str, tokens: Vec<Token>) -> Result<()> {
        if tokens.len() > MAX_TOKENS_PER_CATEGORY {
            return Err(Error::TooManyTokens {
                category: category.to_string(),
                count: tokens.len(),
                limit: MAX_TOKENS_PER_CATEGORY,
            });
        }

        // Re-adding a category replaces it without moving it.
        if let Some((_, existing)) = self
            .categories
            .iter_mut()
            .find(|(label, _)| label == category)
        {
            *existing = tokens;
            return Ok(());
        }

        if self.categories.len() >= MAX_CATEGORIES {
            return Err(Error::TooManyCategories {
                limit: MAX_CATEGORIES,
            });
        }

        tracing::debug!(category, tokens = tokens.len(), "category recorded");
        self.categories.push((category.to_string(), tokens));
        Ok(())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(label, _)| label.as_str())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn tokens(&self, category: &str) -> Option<Vec<&str>> {
        self.categories
            .iter()
            .find(|(label, _)| label == category)
            .map(|(_, tokens)| tokens.iter().map(|t| t.as_str()).collect())
    }

    /// Total number of tokens across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, tokens)| tokens.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Flattens every category, in insertion order, without deduplicating.
    pub fn pool(&self) -> Result<Vec<&str>> {
        let count = self.len();
        if count > MAX_POOL_TOKENS {
            return Err(Error::PoolTooLarge {
                count,
                limit: MAX_POOL_TOKENS,
            });
        }

        Ok(self
            .categories
            .iter()
            .flat_map(|(_, tokens)| tokens.iter().map(|t| t.as_str()))
            .collect())
    }

    pub fn generate(self, config: &GeneratorConfig) -> Result<Generation> {
        generator::generate(self, config)
    }
}
