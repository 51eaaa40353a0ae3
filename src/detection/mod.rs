pub mod urls;

use crate::lexicon::Lexicon;
use crate::normalization::normalize;
use serde::{Deserialize, Serialize};

pub use urls::{detect_urls, extract_host, is_trusted_host};

/// Everything one analysis pass found in a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub matched_suspicious: Vec<String>,
    pub matched_dangerous: Vec<String>,
    pub untrusted_urls: Vec<String>,
}

impl Evidence {
    /// Run both keyword passes and the URL pass over `text`.
    ///
    /// A phrase matched by both lexicons is reported only as dangerous, even
    /// when the caller built the lexicon by hand.
    pub fn collect(text: &str, lexicon: &Lexicon) -> Self {
        let matched_dangerous = detect_keywords(text, &lexicon.dangerous);
        let matched_suspicious: Vec<String> = detect_keywords(text, &lexicon.suspicious)
            .into_iter()
            .filter(|phrase| !matched_dangerous.contains(phrase))
            .collect();
        let untrusted_urls = detect_urls(text, &lexicon.trusted_domains);

        log::debug!(
            "Evidence: {} suspicious, {} dangerous, {} untrusted urls",
            matched_suspicious.len(),
            matched_dangerous.len(),
            untrusted_urls.len()
        );

        Self {
            matched_suspicious,
            matched_dangerous,
            untrusted_urls,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matched_suspicious.is_empty()
            && self.matched_dangerous.is_empty()
            && self.untrusted_urls.is_empty()
    }
}

/// Lexicon entries (in lexicon order) that occur anywhere in the normalized text.
///
/// This is substring containment, so "scam" also matches "scammer".
pub fn detect_keywords<S: AsRef<str>>(text: &str, lexicon: &[S]) -> Vec<String> {
    let normalized = normalize(text);
    lexicon
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|phrase| !phrase.is_empty() && normalized.contains(&phrase.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_keywords_preserves_lexicon_order() {
        let lexicon = ["prize", "winner", "click here"];
        let found = detect_keywords("Click here, WINNER, to get your prize", &lexicon);
        assert_eq!(found, vec!["prize", "winner", "click here"]);
    }

    #[test]
    fn test_detect_keywords_substring_semantics() {
        let found = detect_keywords("Beware of the scammer", &["scam"]);
        assert_eq!(found, vec!["scam"]);
    }

    #[test]
    fn test_detect_keywords_matches_across_punctuation() {
        let found = detect_keywords("free-money!!", &["freemoney", "free money"]);
        assert_eq!(found, vec!["freemoney"]);
    }

    #[test]
    fn test_detect_keywords_results_are_in_normalized_text() {
        let lexicon = Lexicon::default();
        let text = "URGENT!!! Your bank details were hacked; act now";
        let normalized = normalize(text);
        for phrase in detect_keywords(text, &lexicon.suspicious)
            .iter()
            .chain(detect_keywords(text, &lexicon.dangerous).iter())
        {
            assert!(normalized.contains(phrase.as_str()));
        }
    }

    #[test]
    fn test_detect_keywords_empty() {
        assert!(detect_keywords("", &["scam"]).is_empty());
        assert!(detect_keywords("hello", &[] as &[&str]).is_empty());
        assert!(detect_keywords("anything", &[""]).is_empty());
    }

    #[test]
    fn test_collect_keeps_categories_disjoint() {
        let lexicon = Lexicon {
            suspicious: vec!["scam".to_string(), "urgent".to_string()],
            dangerous: vec!["scam".to_string()],
            trusted_domains: Vec::new(),
        };
        let evidence = Evidence::collect("urgent scam", &lexicon);
        assert_eq!(evidence.matched_dangerous, vec!["scam"]);
        assert_eq!(evidence.matched_suspicious, vec!["urgent"]);
    }

    #[test]
    fn test_collect_empty_input() {
        let evidence = Evidence::collect("", &Lexicon::default());
        assert!(evidence.is_empty());
    }
}
