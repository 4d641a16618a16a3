pub mod combine;
pub mod config;
pub mod error;
pub mod finalize;
pub mod generator;
pub mod tokens;
pub mod transform;
pub mod wordlist;

pub use config::{GeneratorConfig, Truncation};
pub use error::{Error, Result};
pub use generator::{Generation, GenerationReport, generate};
pub use tokens::{Category, TokenStore, WELL_KNOWN_CATEGORIES};
pub use wordlist::{Wordlist, WordlistStats, default_file_name};
