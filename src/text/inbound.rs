//! Inbound utterance cleaning.
//!
//! Video-platform transcripts arrive wrapped in structural markup and with
//! email addresses spelled as speech ("john at gmail dot com"). Every
//! inbound message passes through [`clean`] before extraction or relay,
//! regardless of conversation state.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Metadata elements the video platform injects around the transcript.
/// Dropped wholly, content included.
static METADATA_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<appearance\b[^>]*>.*?</appearance\s*>|<emotion\b[^>]*>.*?</emotion\s*>|<screen\b[^>]*>.*?</screen\s*>",
    )
    .expect("metadata element pattern")
});

/// Any remaining tag markup; inner text survives.
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("tag pattern"));

/// Spoken email: `local at domain dot tld`, with optional spoken dots in
/// either part. The final label must be TLD-shaped so phrases like
/// "arrive at 7" pass through untouched.
static SPOKEN_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([a-z0-9][a-z0-9._+-]*(?:\s+dot\s+[a-z0-9._+-]+)*)\s+at\s+([a-z0-9-]+(?:\s+dot\s+[a-z0-9-]+)*\s+dot\s+[a-z]{2,3})\b",
    )
    .expect("spoken email pattern")
});

static SPOKEN_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+dot\s+").expect("spoken dot pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Strip markup, symbolize spoken email patterns, collapse whitespace.
pub fn clean(raw: &str) -> String {
    let text = METADATA_ELEMENTS.replace_all(raw, " ");
    let text = ANY_TAG.replace_all(&text, " ");
    let text = rewrite_spoken_email(&text);
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn rewrite_spoken_email(text: &str) -> String {
    SPOKEN_EMAIL
        .replace_all(text, |caps: &Captures| {
            let local = SPOKEN_DOT.replace_all(&caps[1], ".");
            let domain = SPOKEN_DOT.replace_all(&caps[2], ".");
            format!("{local}@{domain}")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_metadata_elements() {
        let raw = "<emotion level=\"high\">cheerful</emotion> book me a table";
        assert_eq!(clean(raw), "book me a table");
    }

    #[test]
    fn test_strips_other_tags_keeps_text() {
        let raw = "<speak>I need to <em>change</em> my booking</speak>";
        assert_eq!(clean(raw), "I need to change my booking");
    }

    #[test]
    fn test_spoken_email_rewrite() {
        assert_eq!(
            clean("my email is john at gmail dot com"),
            "my email is john@gmail.com"
        );
    }

    #[test]
    fn test_spoken_email_with_spoken_local_dot() {
        assert_eq!(
            clean("it's jane dot doe at resort dot co dot uk"),
            "it's jane.doe@resort.co.uk"
        );
    }

    #[test]
    fn test_spoken_at_without_domain_untouched() {
        assert_eq!(clean("we arrive at 7 tonight"), "we arrive at 7 tonight");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean("  hello \n\n world\t! "), "hello world !");
    }

    #[test]
    fn test_runs_on_symbolic_email_unchanged() {
        assert_eq!(clean("mail me at j@x.co"), "mail me at j@x.co");
    }
}
