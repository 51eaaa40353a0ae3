use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way outcome of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Suspicious,
    Dangerous,
}

impl Verdict {
    /// Short label used on the wire by the scoring backend.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Suspicious => "sus",
            Verdict::Dangerous => "dangerous",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verdict::Safe => "SAFE",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::Dangerous => "DANGEROUS",
        };
        f.write_str(name)
    }
}

/// What a result card shows: either nothing analyzed yet, or a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Waiting,
    Analyzed(Verdict),
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Waiting => "waiting",
            Status::Analyzed(verdict) => verdict.label(),
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Status::Waiting => "Enter a message to check for potential fraud!",
            Status::Analyzed(_) => "Message Analyzed!",
        }
    }
}

impl From<Verdict> for Status {
    fn from(verdict: Verdict) -> Self {
        Status::Analyzed(verdict)
    }
}

/// Strict evidence priority: any dangerous phrase or untrusted link wins,
/// then any suspicious phrase, otherwise safe. Counts are never weighed.
pub fn classify<S: AsRef<str>>(suspicious: &[S], dangerous: &[S], untrusted_urls: &[S]) -> Verdict {
    if !dangerous.is_empty() || !untrusted_urls.is_empty() {
        Verdict::Dangerous
    } else if !suspicious.is_empty() {
        Verdict::Suspicious
    } else {
        Verdict::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify(NONE, NONE, NONE), Verdict::Safe);
        assert_eq!(classify(&["urgent"], NONE, NONE), Verdict::Suspicious);
        assert_eq!(classify(NONE, &["scam"], NONE), Verdict::Dangerous);
        assert_eq!(classify(NONE, NONE, &["http://x.biz"]), Verdict::Dangerous);
        assert_eq!(
            classify(&["urgent", "winner", "prize"], NONE, &["http://x.biz"]),
            Verdict::Dangerous
        );
    }

    #[test]
    fn test_classify_is_monotonic() {
        let suspicious_sets: [&[&str]; 2] = [NONE, &["urgent"]];
        for suspicious in suspicious_sets {
            let before = classify(suspicious, NONE, NONE);
            assert!(classify(suspicious, &["fraud"], NONE) >= before);
            assert!(classify(suspicious, NONE, &["www.x.biz"]) >= before);
            assert!(classify(&["claim"], NONE, NONE) >= classify(NONE, NONE, NONE));
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::default(), Status::Waiting);
        assert_eq!(Status::Waiting.label(), "waiting");
        assert_eq!(Status::from(Verdict::Suspicious).label(), "sus");
        assert_eq!(Status::Analyzed(Verdict::Safe).headline(), "Message Analyzed!");
    }

    #[test]
    fn test_verdict_display_and_serde() {
        assert_eq!(Verdict::Dangerous.to_string(), "DANGEROUS");
        assert_eq!(
            serde_json::to_string(&Verdict::Suspicious).unwrap(),
            "\"suspicious\""
        );
    }
}
