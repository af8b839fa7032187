//! Outbound reply normalization.
//!
//! The downstream consumer is a text-to-speech avatar that mispronounces
//! raw markdown, newlines, and curly punctuation, so every reply is
//! flattened before it reaches the wire.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder the agent backend emits in place of redacted values.
pub const REDACTION_TOKEN: &str = "[REDACTED]";

/// What the avatar says instead of the placeholder.
const REDACTION_SPOKEN: &str = "your saved details";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Collapse whitespace, straighten quotes, speak the redaction token.
pub fn sanitize(reply: &str) -> String {
    let text = reply.replace(REDACTION_TOKEN, REDACTION_SPOKEN);
    let text = text
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_quotes() {
        assert_eq!(sanitize("\"It\u{2019}s \n\nready\""), "\"It's ready\"");
    }

    #[test]
    fn test_curly_double_quotes() {
        assert_eq!(
            sanitize("table \u{201C}Luna\u{201D} is booked"),
            "table \"Luna\" is booked"
        );
    }

    #[test]
    fn test_redaction_token_spoken() {
        assert_eq!(
            sanitize("I sent the code to [REDACTED] just now."),
            "I sent the code to your saved details just now."
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(sanitize("See you at 7."), "See you at 7.");
    }
}
