//! Document retrieval
//!
//! The interpreter only needs "markup in". [`Fetch`] is the seam; the default
//! [`HttpFetcher`] is a blocking `ureq` client against `{locale}.wiktionary.org`.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

const DEFAULT_USER_AGENT: &str = concat!("wkt_scraper/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of raw page markup for a word on a locale's site.
pub trait Fetch {
    fn fetch(&self, locale: &str, word: &str) -> Result<String>;
}

impl<F> Fetch for F
where
    F: Fn(&str, &str) -> Result<String>,
{
    fn fetch(&self, locale: &str, word: &str) -> Result<String> {
        self(locale, word)
    }
}

/// Wiktionary page URL, with `word` encoded as a single path segment.
pub fn page_url(locale: &str, word: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("https://{}.wiktionary.org/wiki/", locale))?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(word);
    }
    Ok(url)
}

/// Blocking HTTP fetcher (using ureq)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(timeout_secs)))
                .user_agent(user_agent)
                .build(),
        );
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT_SECS)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, locale: &str, word: &str) -> Result<String> {
        let url = page_url(locale, word)?;
        log::debug!("fetching {}", url);

        match self.agent.get(url.as_str()).call() {
            Ok(resp) => {
                if resp.status().is_success() {
                    Ok(resp.into_body().read_to_string()?)
                } else {
                    Err(Error::NotFound {
                        url: url.to_string(),
                        status: resp.status().as_u16(),
                    })
                }
            }
            Err(ureq::Error::StatusCode(status)) => Err(Error::NotFound {
                url: url.to_string(),
                status,
            }),
            Err(e) => Err(Error::Transport(e)),
        }
    }
}
