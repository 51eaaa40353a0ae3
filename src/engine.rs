use crate::annotator::{annotate, WordAnnotation};
use crate::classifier::{classify, Verdict};
use crate::detection::Evidence;
use crate::history::History;
use crate::lexicon::Lexicon;
use crate::reasons::generate_reasons;
use serde::{Deserialize, Serialize};

/// Result of running the local pipeline over one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub evidence: Evidence,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentSource {
    Local,
    Remote,
}

/// Verdict plus explanation, independent of which scorer produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub score: Option<u8>,
    pub reasons: Vec<String>,
    pub source: AssessmentSource,
}

impl Assessment {
    /// Used when a scorer could not produce an answer. Leans dangerous.
    pub fn fail_closed(detail: &str) -> Self {
        let mut reasons = vec!["Error, Please try again".to_string()];
        if !detail.is_empty() {
            reasons.push(detail.to_string());
        }
        Self {
            verdict: Verdict::Dangerous,
            score: None,
            reasons,
            source: AssessmentSource::Remote,
        }
    }
}

impl From<Analysis> for Assessment {
    fn from(analysis: Analysis) -> Self {
        Self {
            verdict: analysis.verdict,
            score: None,
            reasons: analysis.reasons,
            source: AssessmentSource::Local,
        }
    }
}

/// Local heuristic pipeline over a fixed lexicon.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    lexicon: Lexicon,
}

impl Analyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        let evidence = Evidence::collect(text, &self.lexicon);
        let verdict = classify(
            &evidence.matched_suspicious,
            &evidence.matched_dangerous,
            &evidence.untrusted_urls,
        );
        let reasons = generate_reasons(
            &evidence.matched_suspicious,
            &evidence.matched_dangerous,
            &evidence.untrusted_urls,
        );
        log::debug!("Local analysis verdict: {}", verdict);

        Analysis {
            evidence,
            verdict,
            reasons,
        }
    }

    /// Analyze and push the result onto `history`.
    pub fn analyze_and_record(&self, text: &str, history: &History) -> Analysis {
        let analysis = self.analyze(text);
        history.record(text, analysis.verdict, &analysis.reasons);
        analysis
    }

    pub fn annotate(&self, text: &str) -> Vec<WordAnnotation> {
        annotate(text, &self.lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasons::NEUTRAL_REASON;

    #[test]
    fn test_prize_message_with_untrusted_link() {
        let analyzer = Analyzer::default();
        let analysis = analyzer
            .analyze("You are the WINNER! Click here: http://scam-prize.biz to claim free money");

        assert_eq!(
            analysis.evidence.matched_suspicious,
            vec!["winner", "click here", "prize", "free money", "claim"]
        );
        // the host "scam-prize.biz" normalizes to a dangerous phrase too
        assert_eq!(analysis.evidence.matched_dangerous, vec!["scam"]);
        assert_eq!(analysis.evidence.untrusted_urls, vec!["http://scam-prize.biz"]);
        assert_eq!(analysis.verdict, Verdict::Dangerous);
        assert!(analysis.reasons.contains(
            &"Includes URLs like: http://scam-prize.biz. These might point to untrustworthy sites."
                .to_string()
        ));
        assert!(analysis
            .reasons
            .iter()
            .any(|r| r.starts_with("Suspicious words detected: winner, click here, prize, free money")));
    }

    #[test]
    fn test_trusted_link_is_safe() {
        let analyzer = Analyzer::default();
        let analysis =
            analyzer.analyze("See you at 6pm, check out https://www.google.com/maps for directions");

        assert!(analysis.evidence.is_empty());
        assert_eq!(analysis.verdict, Verdict::Safe);
        assert_eq!(analysis.reasons, vec![NEUTRAL_REASON]);
    }

    #[test]
    fn test_hacked_account_message() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze("urgent: your account was hacked, this is a scam");

        assert_eq!(analysis.evidence.matched_dangerous, vec!["scam", "hacked"]);
        assert_eq!(analysis.evidence.matched_suspicious, vec!["urgent"]);
        assert!(analysis.evidence.untrusted_urls.is_empty());
        assert_eq!(analysis.verdict, Verdict::Dangerous);
        assert_eq!(
            analysis.reasons,
            vec![
                "Contains risky words like: scam, hacked. These are common in scams or frauds.",
                "Suspicious words detected: urgent. These are frequently used in scams.",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let analysis = Analyzer::default().analyze("");
        assert!(analysis.evidence.is_empty());
        assert_eq!(analysis.verdict, Verdict::Safe);
        assert_eq!(analysis.reasons, vec![NEUTRAL_REASON]);
    }

    #[test]
    fn test_repeatable() {
        let analyzer = Analyzer::default();
        let text = "Limited time: verify your identity at www.secure-login.ru";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn test_analyze_and_record() {
        let analyzer = Analyzer::default();
        let history = History::new();
        analyzer.analyze_and_record("hello there", &history);
        let latest = analyzer.analyze_and_record("you won a lottery prize", &history);

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].input_text, "you won a lottery prize");
        assert_eq!(entries[0].verdict, latest.verdict);
        assert_eq!(entries[0].verdict, Verdict::Suspicious);
        assert_eq!(entries[1].verdict, Verdict::Safe);
    }

    #[test]
    fn test_annotation_does_not_change_verdict() {
        let analyzer = Analyzer::default();
        let text = "claim your prize";
        let before = analyzer.analyze(text);
        let _ = analyzer.annotate(text);
        assert_eq!(analyzer.analyze(text), before);
    }

    #[test]
    fn test_assessment_conversions() {
        let assessment: Assessment = Analyzer::default().analyze("act now").into();
        assert_eq!(assessment.verdict, Verdict::Suspicious);
        assert_eq!(assessment.source, AssessmentSource::Local);
        assert_eq!(assessment.score, None);

        let failed = Assessment::fail_closed("connection refused");
        assert_eq!(failed.verdict, Verdict::Dangerous);
        assert_eq!(
            failed.reasons,
            vec!["Error, Please try again", "connection refused"]
        );
    }
}
