//! Error types for scraping operations.

use thiserror::Error;

/// Errors that can occur while resolving, fetching or configuring a scrape.
///
/// A page that exists but has no section for the requested language is not an
/// error; it produces an empty [`WordEntry`](crate::WordEntry).
#[derive(Error, Debug)]
pub enum Error {
    #[error("page not found (HTTP {status}): {url}")]
    NotFound { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("no section name for language '{language}' on '{locale}' pages")]
    UnknownLanguagePair { language: String, locale: String },

    #[error("invalid locale configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// True when the document itself could not be retrieved.
    pub fn is_retrieval_failure(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
