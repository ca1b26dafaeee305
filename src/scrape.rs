//! Scrape orchestration
//!
//! Fetches a page, scopes it to the requested language and walks the
//! section's headings in document order, dispatching each to the matching
//! extractor.

use std::collections::HashSet;

use scraper::Html;

use crate::error::Result;
use crate::extractors::{
    classify, extract_pronunciation, extract_with_etymology, extract_without_etymology,
    HeaderRole, Section,
};
use crate::fetch::{Fetch, HttpFetcher};
use crate::locale::{LocaleConfig, LocaleRegistry};
use crate::model::{Meaning, PronunciationGroup, WordEntry};

/// Scrapes words from Wiktionary sites.
///
/// ```no_run
/// use wkt_scraper::Scraper;
///
/// let entry = Scraper::new().scrape("tr", "en", "gibi")?;
/// println!("{}", entry.to_json_pretty()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scraper<F = HttpFetcher> {
    registry: LocaleRegistry,
    fetcher: F,
}

impl Scraper<HttpFetcher> {
    /// Built-in locales, fetching over HTTP.
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::default())
    }
}

impl Default for Scraper<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetch> Scraper<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self::with_registry(LocaleRegistry::shared().clone(), fetcher)
    }

    pub fn with_registry(registry: LocaleRegistry, fetcher: F) -> Self {
        Self { registry, fetcher }
    }

    /// Scrape `word` in `from_language` from the `to_language` Wiktionary.
    ///
    /// Unknown codes fail before anything is fetched. A page without a
    /// section for `from_language` yields an empty entry, not an error.
    pub fn scrape(&self, from_language: &str, to_language: &str, word: &str) -> Result<WordEntry> {
        let (config, anchor) = self.resolve(from_language, to_language)?;
        let html = self.fetcher.fetch(to_language, word)?;
        Ok(build_entry(&html, config, anchor, from_language, to_language, word))
    }

    /// Same as [`Scraper::scrape`] for markup that was already retrieved.
    pub fn scrape_html(
        &self,
        from_language: &str,
        to_language: &str,
        word: &str,
        html: &str,
    ) -> Result<WordEntry> {
        let (config, anchor) = self.resolve(from_language, to_language)?;
        Ok(build_entry(html, config, anchor, from_language, to_language, word))
    }

    fn resolve(&self, from_language: &str, to_language: &str) -> Result<(&LocaleConfig, &str)> {
        let config = self.registry.get(to_language)?;
        let anchor = self.registry.section_name(from_language, to_language)?;
        Ok((config, anchor))
    }
}

fn build_entry(
    html: &str,
    config: &LocaleConfig,
    anchor: &str,
    from_language: &str,
    to_language: &str,
    word: &str,
) -> WordEntry {
    let document = Html::parse_document(html);
    let (meanings, pronunciation) = interpret(&document, config, anchor);

    WordEntry {
        meanings,
        pronunciation,
        ..WordEntry::empty(word, from_language, to_language)
    }
}

/// Walk the section anchored at `anchor` and collect its meanings and
/// pronunciation.
pub fn interpret(
    document: &Html,
    locale: &LocaleConfig,
    anchor: &str,
) -> (Vec<Meaning>, Vec<PronunciationGroup>) {
    let mut meanings = Vec::new();
    let mut pronunciation = Vec::new();

    let Some(section) = Section::isolate(document, anchor) else {
        log::debug!("no section anchored at '{}'", anchor);
        return (meanings, pronunciation);
    };

    let mut seen: HashSet<String> = HashSet::new();

    for idx in 0..section.len() {
        let Some(node) = section.get(idx) else {
            break;
        };
        if node.value().name() == "hr" {
            break;
        }
        let Some(heading) = section.heading(idx) else {
            continue;
        };
        if heading.level != section.sub_level() {
            continue;
        }
        let Some(key) = section.key(idx) else {
            continue;
        };
        if seen.contains(&key) {
            log::trace!("skipping already processed header at {}", idx);
            continue;
        }

        match classify(&section, idx, locale) {
            HeaderRole::Pronunciation => {
                let groups = extract_pronunciation(&section, idx);
                // A later pronunciation section replaces an earlier one
                if !pronunciation.is_empty() {
                    log::warn!("second pronunciation section replaces the first");
                }
                pronunciation = groups;
            }
            HeaderRole::Etymology => {
                log::debug!("etymology header at {}", idx);
                meanings.push(extract_with_etymology(&section, idx, locale, &mut seen));
            }
            HeaderRole::PartOfSpeech => {
                log::debug!("part of speech header at {}", idx);
                meanings.push(extract_without_etymology(&section, idx, locale));
            }
            HeaderRole::Ignore => {}
        }

        seen.insert(key);
    }

    (meanings, pronunciation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Definition, Example, PronunciationValue};
    use std::cell::Cell;

    const COMPLICATED: &str = r#"
    <html><body><div class="mw-parser-output">
    <h2><span class="mw-headline" id="English">English</span></h2>
    <h3><span class="mw-headline" id="Pronunciation">Pronunciation</span></h3>
    <ul>
    <li>IPA<sup>(key)</sup>: <span class="IPA">/ˈkɑmplɪkeɪtɪd/</span></li>
    <li><table class="audiotable"><tbody><tr><td>Audio (US)<span class="ib-colon">:</span></td><td class="audiofile"><audio controls><source src="//upload.wikimedia.org/En-us-complicated.ogg" type="audio/ogg; codecs=&quot;vorbis&quot;"><source src="//upload.wikimedia.org/En-us-complicated.ogg.mp3" type="audio/mpeg"></audio></td><td class="audiometa">(file)</td></tr></tbody></table></li>
    </ul>
    <h3><span class="mw-headline" id="Adjective">Adjective</span></h3>
    <p><strong class="Latn headword">complicated</strong></p>
    <ol>
    <li>Difficult or convoluted.<dl><dd><span class="h-usage-example"><i class="e-example">It seems this complicated situation will not blow over soon.</i></span></dd></dl></li>
    <li><span class="ib-brac">(</span><span class="ib-content">biology</span><span class="ib-brac">)</span> Folded longitudinally.</li>
    </ol>
    <h4><span class="mw-headline" id="Antonyms">Antonyms</span></h4>
    <ul><li>simple</li></ul>
    <h3><span class="mw-headline" id="Verb">Verb</span></h3>
    <p><strong class="Latn headword">complicated</strong></p>
    <ol><li>simple past tense and past participle of complicate</li></ol>
    <h3><span class="mw-headline" id="Anagrams">Anagrams</span></h3>
    <ul><li>complicate'd</li></ul>
    <hr>
    <h2><span class="mw-headline" id="Spanish">Spanish</span></h2>
    <h3><span class="mw-headline" id="Adjective_2">Adjective</span></h3>
    <ol><li>should never appear</li></ol>
    </div></body></html>
    "#;

    const GIBI: &str = r#"
    <html><body><div class="mw-parser-output">
    <h2><span class="mw-headline" id="Turkish">Turkish</span></h2>
    <h3><span class="mw-headline" id="Etymology">Etymology</span></h3>
    <p>From Proto-Turkic <i>*käpä</i>.</p>
    <h3><span class="mw-headline" id="Pronunciation">Pronunciation</span></h3>
    <ul><li>IPA<sup>(key)</sup>: <span class="IPA">/ɡibi/</span></li></ul>
    <h3><span class="mw-headline" id="Postposition">Postposition</span></h3>
    <p><strong class="Latn headword">gibi</strong></p>
    <ol>
    <li>like (similar to)<dl><dd><div class="h-usage-example"><i class="e-example">Tupac bir kahraman gibi öldü.</i><dl><dd><span class="e-translation">Tupac died like a hero.</span></dd></dl></div></dd></dl></li>
    <li>as</li>
    </ol>
    </div></body></html>
    "#;

    fn fixture(html: &'static str) -> impl Fn(&str, &str) -> Result<String> {
        move |_: &str, _: &str| Ok(html.to_string())
    }

    #[test]
    fn test_two_parts_of_speech_without_etymology() {
        let scraper = Scraper::with_fetcher(fixture(COMPLICATED));
        let entry = scraper.scrape("en", "en", "complicated").unwrap();

        assert_eq!(entry.word, "complicated");
        assert_eq!(entry.from_language, "en");
        assert_eq!(entry.to_language, "en");
        assert_eq!(entry.meanings.len(), 2);

        let adjective = &entry.meanings[0];
        assert_eq!(adjective.etymology, None);
        assert_eq!(adjective.part_of_speech.as_deref(), Some("adjective"));
        assert_eq!(adjective.metadata.as_deref(), Some("complicated"));
        assert_eq!(adjective.antonyms, Some(vec!["simple".to_string()]));
        assert_eq!(
            adjective.definitions,
            vec![
                Definition {
                    text: "Difficult or convoluted.".to_string(),
                    examples: vec![Example {
                        example: "It seems this complicated situation will not blow over soon."
                            .to_string(),
                        translation: None,
                    }],
                },
                Definition {
                    text: "(biology) Folded longitudinally.".to_string(),
                    examples: vec![],
                },
            ]
        );

        let verb = &entry.meanings[1];
        assert_eq!(verb.etymology, None);
        assert_eq!(verb.part_of_speech.as_deref(), Some("verb"));
        assert_eq!(verb.antonyms, None);
        assert_eq!(verb.definitions.len(), 1);
    }

    #[test]
    fn test_pronunciation_groups() {
        let scraper = Scraper::with_fetcher(fixture(COMPLICATED));
        let entry = scraper.scrape("en", "en", "complicated").unwrap();

        assert_eq!(entry.pronunciation.len(), 2);
        assert_eq!(entry.pronunciation[0].kind, "IPA");
        assert_eq!(
            entry.pronunciation[0].values,
            vec![PronunciationValue::new("IPA", "/ˈkɑmplɪkeɪtɪd/")]
        );
        assert_eq!(entry.pronunciation[1].kind, "Audio (US)");
        assert_eq!(
            entry.pronunciation[1].values,
            vec![
                PronunciationValue::new(
                    "audio/ogg; codecs=\"vorbis\"",
                    "//upload.wikimedia.org/En-us-complicated.ogg"
                ),
                PronunciationValue::new(
                    "audio/mpeg",
                    "//upload.wikimedia.org/En-us-complicated.ogg.mp3"
                ),
            ]
        );
    }

    #[test]
    fn test_etymology_header_claims_part_of_speech_once() {
        let scraper = Scraper::with_fetcher(fixture(GIBI));
        let entry = scraper.scrape("tr", "en", "gibi").unwrap();

        assert_eq!(entry.meanings.len(), 1);
        let meaning = &entry.meanings[0];
        assert_eq!(meaning.etymology.as_deref(), Some("From Proto-Turkic *käpä."));
        assert_eq!(meaning.part_of_speech.as_deref(), Some("postposition"));
        assert_eq!(
            meaning.definitions[0].examples,
            vec![Example {
                example: "Tupac bir kahraman gibi öldü.".to_string(),
                translation: Some("Tupac died like a hero.".to_string()),
            }]
        );
        assert!(meaning.definitions[1].examples.is_empty());
        assert_eq!(
            entry.pronunciation[0].values,
            vec![PronunciationValue::new("IPA", "/ɡibi/")]
        );
    }

    #[test]
    fn test_word_absent_from_language() {
        let scraper = Scraper::with_fetcher(fixture(GIBI));
        let entry = scraper.scrape("en", "en", "gibi").unwrap();

        assert!(entry.meanings.is_empty());
        assert!(entry.pronunciation.is_empty());
    }

    #[test]
    fn test_retrieval_failure_propagates() {
        let scraper = Scraper::with_fetcher(|locale: &str, word: &str| -> Result<String> {
            Err(Error::NotFound {
                url: format!("https://{}.wiktionary.org/wiki/{}", locale, word),
                status: 404,
            })
        });

        let err = scraper.scrape("tr", "en", "foobar").unwrap_err();
        assert!(err.is_retrieval_failure());
    }

    #[test]
    fn test_unknown_codes_fail_before_fetch() {
        let calls = Cell::new(0);
        let scraper = Scraper::with_fetcher(|_: &str, _: &str| -> Result<String> {
            calls.set(calls.get() + 1);
            Ok(String::new())
        });

        assert!(matches!(
            scraper.scrape("en", "xx", "word"),
            Err(Error::UnknownLocale(_))
        ));
        assert!(matches!(
            scraper.scrape("zz", "en", "word"),
            Err(Error::UnknownLanguagePair { .. })
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_second_pronunciation_section_overwrites_first() {
        let html = r#"
        <h2><span class="mw-headline" id="English">English</span></h2>
        <h3><span class="mw-headline" id="Pronunciation">Pronunciation</span></h3>
        <ul><li>IPA: <span class="IPA">/first/</span></li></ul>
        <h3><span class="mw-headline" id="Noun">Noun</span></h3>
        <ol><li>a thing</li></ol>
        <h3><span class="mw-headline" id="Pronunciation_2">Pronunciation</span></h3>
        <ul><li>IPA: <span class="IPA">/second/</span></li></ul>
        "#;
        let entry = Scraper::with_fetcher(fixture(""))
            .scrape_html("en", "en", "thing", html)
            .unwrap();

        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(
            entry.pronunciation[0].values,
            vec![PronunciationValue::new("IPA", "/second/")]
        );
    }

    #[test]
    fn test_rule_ends_the_walk() {
        let html = r#"
        <h2><span class="mw-headline" id="English">English</span></h2>
        <h3><span class="mw-headline" id="Noun">Noun</span></h3>
        <ol><li>a thing</li></ol>
        <hr>
        <h3><span class="mw-headline" id="Verb">Verb</span></h3>
        <ol><li>to thing</li></ol>
        "#;
        let entry = Scraper::with_fetcher(fixture(""))
            .scrape_html("en", "en", "thing", html)
            .unwrap();

        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(entry.meanings[0].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(entry.meanings[0].definitions[0].text, "a thing");
    }

    #[test]
    fn test_localized_page() {
        let html = r#"
        <h2><span class="mw-headline" id="Türkçe">Türkçe</span></h2>
        <h3><span class="mw-headline" id="Köken">Köken</span></h3>
        <p>Eski Türkçe kökenli bir kelimedir.</p>
        <h3><span class="mw-headline" id="Söyleniş">Söyleniş</span></h3>
        <ul><li>IPA: <span class="IPA">aɾaˈba</span></li></ul>
        <h3><span class="mw-headline" id="Ad">Ad</span></h3>
        <ol><li>(taşıtlar) oto, otomobil<dl><dd><i>Sarhoşların araba sürmeleri sakıncalıdır.</i> - Elif Şafak</dd></dl></li></ol>
        <h4><span class="mw-headline" id="Türetilmiş_kavramlar">Türetilmiş kavramlar</span></h4>
        <ul><li>arabacı, arabalı</li></ul>
        <h3><span class="mw-headline" id="Ön_ad">Ön ad</span></h3>
        <ol><li>bir vasıtanın aldığı miktarda</li></ol>
        "#;
        let entry = Scraper::with_fetcher(fixture(""))
            .scrape_html("tr", "tr", "araba", html)
            .unwrap();

        assert_eq!(entry.meanings.len(), 2);
        assert_eq!(
            entry.meanings[0].etymology.as_deref(),
            Some("Eski Türkçe kökenli bir kelimedir.")
        );
        assert_eq!(entry.meanings[0].part_of_speech.as_deref(), Some("ad"));
        assert_eq!(
            entry.meanings[0].derived_terms,
            Some(vec!["arabacı, arabalı".to_string()])
        );
        assert_eq!(
            entry.meanings[0].definitions[0].examples[0].example,
            "Sarhoşların araba sürmeleri sakıncalıdır. - Elif Şafak"
        );
        assert_eq!(entry.meanings[1].etymology, None);
        assert_eq!(entry.meanings[1].part_of_speech.as_deref(), Some("ön ad"));
        assert_eq!(entry.meanings[1].derived_terms, None);
    }

    #[test]
    fn test_wire_format() {
        let entry = Scraper::with_fetcher(fixture(COMPLICATED))
            .scrape("en", "en", "complicated")
            .unwrap();
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["meanings"][0]["antonyms"][0], "simple");
        assert!(value["meanings"][1].get("antonyms").is_none());
        assert!(value["meanings"][1]["etymology"].is_null());
        assert_eq!(value["pronunciation"][1]["type"], "Audio (US)");
        assert_eq!(value["pronunciation"][1]["values"][1]["type"], "audio/mpeg");
    }
}
