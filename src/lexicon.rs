use crate::normalization::normalize;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Phrases that often show up in spam but are not conclusive on their own.
pub const SUSPICIOUS_PHRASES: &[&str] = &[
    "urgent",
    "winner",
    "click here",
    "prize",
    "free money",
    "congratulations",
    "act now",
    "limited time",
    "claim",
    "gift card",
    "reward",
    "exclusive offer",
    "risk free",
    "lottery",
];

/// Phrases that mark a message as high risk wherever they occur.
pub const DANGEROUS_PHRASES: &[&str] = &[
    "scam",
    "fraud",
    "hacked",
    "password",
    "bank details",
    "wire transfer",
    "social security",
    "credit card",
    "bitcoin",
    "suspended",
    "locked out",
    "verify your identity",
];

/// Hosts containing any of these are never reported as untrusted links.
pub const TRUSTED_DOMAINS: &[&str] = &[
    "google.com",
    "apple.com",
    "microsoft.com",
    "amazon.com",
    "paypal.com",
    "github.com",
    "wikipedia.org",
    "youtube.com",
];

/// The three static lists the engine matches against.
///
/// Entries are lower-case ASCII. A phrase listed as both suspicious and
/// dangerous is kept only in `dangerous`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub suspicious: Vec<String>,
    #[serde(default)]
    pub dangerous: Vec<String>,
    #[serde(default)]
    pub trusted_domains: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            SUSPICIOUS_PHRASES.iter().map(|s| s.to_string()).collect(),
            DANGEROUS_PHRASES.iter().map(|s| s.to_string()).collect(),
            TRUSTED_DOMAINS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl Lexicon {
    pub fn new(
        suspicious: Vec<String>,
        dangerous: Vec<String>,
        trusted_domains: Vec<String>,
    ) -> Self {
        let dangerous = clean_phrases(dangerous);
        let trusted_domains = clean_entries(trusted_domains);
        let suspicious: Vec<String> = clean_phrases(suspicious)
            .into_iter()
            .filter(|phrase| {
                let overlaps = dangerous.contains(phrase);
                if overlaps {
                    log::warn!(
                        "Phrase '{}' is listed as both suspicious and dangerous; keeping it as dangerous",
                        phrase
                    );
                }
                !overlaps
            })
            .collect();

        Self {
            suspicious,
            dangerous,
            trusted_domains,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file: {}", path.display()))?;
        let raw: Lexicon = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse lexicon file: {}", path.display()))?;

        let lexicon = Self::new(raw.suspicious, raw.dangerous, raw.trusted_domains);
        log::info!(
            "Loaded lexicon from {} ({} suspicious, {} dangerous, {} trusted domains)",
            path.display(),
            lexicon.suspicious.len(),
            lexicon.dangerous.len(),
            lexicon.trusted_domains.len()
        );
        Ok(lexicon)
    }
}

/// Trim, lower-case and de-duplicate while keeping the first occurrence.
fn clean_entries(entries: Vec<String>) -> Vec<String> {
    dedup_non_empty(entries.into_iter().map(|entry| entry.trim().to_lowercase()))
}

/// Phrases are matched against normalized text, so they are normalized too.
/// Punctuation would otherwise make an entry unmatchable.
fn clean_phrases(entries: Vec<String>) -> Vec<String> {
    dedup_non_empty(entries.into_iter().map(|entry| {
        let phrase = normalize(&entry).trim().to_string();
        if phrase != entry.trim().to_lowercase() {
            log::warn!("Lexicon phrase '{}' normalized to '{}'", entry, phrase);
        }
        phrase
    }))
}

fn dedup_non_empty(entries: impl Iterator<Item = String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for entry in entries {
        if !entry.is_empty() && !cleaned.contains(&entry) {
            cleaned.push(entry);
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_lists_are_disjoint() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.suspicious.len(), SUSPICIOUS_PHRASES.len());
        assert_eq!(lexicon.dangerous.len(), DANGEROUS_PHRASES.len());
        for phrase in &lexicon.suspicious {
            assert!(!lexicon.dangerous.contains(phrase));
        }
    }

    #[test]
    fn test_overlap_is_kept_as_dangerous() {
        let lexicon = Lexicon::new(
            strings(&["urgent", "Scam"]),
            strings(&["scam"]),
            Vec::new(),
        );
        assert_eq!(lexicon.suspicious, strings(&["urgent"]));
        assert_eq!(lexicon.dangerous, strings(&["scam"]));
    }

    #[test]
    fn test_entries_are_cleaned() {
        let lexicon = Lexicon::new(
            strings(&["  Prize ", "", "prize", "Act Now"]),
            Vec::new(),
            strings(&["Google.com "]),
        );
        assert_eq!(lexicon.suspicious, strings(&["prize", "act now"]));
        assert_eq!(lexicon.trusted_domains, strings(&["google.com"]));
    }

    #[test]
    fn test_phrases_with_punctuation_are_normalized() {
        let lexicon = Lexicon::new(
            strings(&["Act now!", "click-here", "!!!"]),
            strings(&["scam."]),
            strings(&["my-bank.co.uk"]),
        );
        assert_eq!(lexicon.suspicious, strings(&["act now", "clickhere"]));
        assert_eq!(lexicon.dangerous, strings(&["scam"]));
        assert_eq!(lexicon.trusted_domains, strings(&["my-bank.co.uk"]));

        let text = "Please click-here and ACT NOW!";
        let found = crate::detection::detect_keywords(text, &lexicon.suspicious);
        assert_eq!(found, strings(&["act now", "clickhere"]));
    }

    #[test]
    fn test_yaml_lexicon() {
        let yaml = "suspicious:\n  - deal\ndangerous:\n  - scam\n";
        let raw: Lexicon = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(raw.suspicious, strings(&["deal"]));
        assert!(raw.trusted_domains.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Lexicon::load_from_file("/nonexistent/trusttext-lexicon.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read lexicon file"));
    }
}
