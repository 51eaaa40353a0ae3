pub const NEUTRAL_REASON: &str = "The message seems neutral and doesn't show obvious red flags.";

/// Human-readable explanation lines, strongest evidence first.
///
/// Always returns at least one line.
pub fn generate_reasons<S: AsRef<str>>(
    suspicious: &[S],
    dangerous: &[S],
    untrusted_urls: &[S],
) -> Vec<String> {
    let mut reasons = Vec::new();

    if !dangerous.is_empty() {
        reasons.push(format!(
            "Contains risky words like: {}. These are common in scams or frauds.",
            join(dangerous)
        ));
    }

    if !untrusted_urls.is_empty() {
        reasons.push(format!(
            "Includes URLs like: {}. These might point to untrustworthy sites.",
            join(untrusted_urls)
        ));
    }

    if !suspicious.is_empty() {
        reasons.push(format!(
            "Suspicious words detected: {}. These are frequently used in scams.",
            join(suspicious)
        ));
    }

    if reasons.is_empty() {
        reasons.push(NEUTRAL_REASON.to_string());
    }

    reasons
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_neutral_when_no_evidence() {
        assert_eq!(generate_reasons(NONE, NONE, NONE), vec![NEUTRAL_REASON]);
    }

    #[test]
    fn test_fixed_order() {
        let reasons = generate_reasons(&["urgent", "prize"], &["scam"], &["http://x.biz"]);
        assert_eq!(
            reasons,
            vec![
                "Contains risky words like: scam. These are common in scams or frauds.",
                "Includes URLs like: http://x.biz. These might point to untrustworthy sites.",
                "Suspicious words detected: urgent, prize. These are frequently used in scams.",
            ]
        );
    }

    #[test]
    fn test_omits_empty_categories() {
        let reasons = generate_reasons(&["winner"], NONE, NONE);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].starts_with("Suspicious words detected: winner."));
    }
}
