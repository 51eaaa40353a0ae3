use crate::detection::{detect_keywords, urls::looks_like_url};
use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};

/// Look-alike substitutions used to render flagged words.
pub const CHARACTER_SUBSTITUTIONS: [(char, char); 10] = [
    ('a', '@'),
    ('s', '$'),
    ('i', '!'),
    ('o', '0'),
    ('e', '3'),
    ('u', 'µ'),
    ('g', '9'),
    ('l', '1'),
    ('h', '#'),
    ('c', '('),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    Plain,
    Suspicious,
    Dangerous,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnnotation {
    pub original_word: String,
    pub display_style: DisplayStyle,
    pub rendered_text: String,
}

fn substitute(c: char) -> char {
    let lower = c.to_ascii_lowercase();
    CHARACTER_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == lower)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Obfuscated rendering of a flagged word, e.g. `scam` -> `$(@m!`.
pub fn characterize(word: &str) -> String {
    let mut rendered: String = word.chars().map(substitute).collect();
    rendered.push('!');
    rendered
}

/// Display metadata for every space-separated token of the raw input.
///
/// Only used for highlighting; it never feeds back into the verdict.
pub fn annotate(text: &str, lexicon: &Lexicon) -> Vec<WordAnnotation> {
    text.split(' ')
        .map(|word| {
            let display_style = if !detect_keywords(word, &lexicon.dangerous).is_empty() {
                DisplayStyle::Dangerous
            } else if !detect_keywords(word, &lexicon.suspicious).is_empty() {
                DisplayStyle::Suspicious
            } else if looks_like_url(word) {
                DisplayStyle::Url
            } else {
                DisplayStyle::Plain
            };

            let rendered_text = match display_style {
                DisplayStyle::Dangerous | DisplayStyle::Suspicious => characterize(word),
                DisplayStyle::Url | DisplayStyle::Plain => word.to_string(),
            };

            WordAnnotation {
                original_word: word.to_string(),
                display_style,
                rendered_text,
            }
        })
        .collect()
}
