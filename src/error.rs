use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("category \"{category}\" has too many tokens ({count}, maximum is {limit})")]
    TooManyTokens {
        category: String,
        count: usize,
        limit: usize,
    },

    #[error("too many categories (maximum is {limit})")]
    TooManyCategories { limit: usize },

    #[error("token pool too large ({count} tokens, maximum is {limit})")]
    PoolTooLarge { count: usize, limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("wordlist file is malformed at line {line}: {reason}")]
    MalformedWordlist { line: usize, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
