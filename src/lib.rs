//! Wiktionary word scraper
//!
//! Reconstructs structured lexical data from Wiktionary HTML pages:
//! - Etymologies and parts of speech
//! - Definitions with usage examples and translations
//! - Synonyms, antonyms, related/derived terms, see-also lists, proverbs
//! - IPA, hyphenation and audio pronunciations
//!
//! Pages are fetched per locale site (`en.wiktionary.org`, `tr.wiktionary.org`,
//! ...) and scoped to the section of the requested source language.

pub mod error;
pub mod extractors;
pub mod ffi;
pub mod fetch;
pub mod locale;
pub mod model;
pub mod scrape;

pub use error::{Error, Result};
pub use fetch::{page_url, Fetch, HttpFetcher};
pub use locale::{LocaleConfig, LocaleRegistry};
pub use model::*;
pub use scrape::{interpret, Scraper};
