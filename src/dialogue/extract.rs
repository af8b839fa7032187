//! Email and reservation-number extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w.-]+\.\w{2,}").expect("email pattern"));

/// Reservation numbers: 2-3 letters, hyphen, 4-6 digits.
static RESERVATION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[A-Z]{2,3}-\d{4,6}\b").expect("reservation pattern"));

/// Both identifiers extracted from one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPair {
    pub email: String,
    pub reservation_id: String,
}

/// Returns both identifiers iff the text contains an email-shaped token
/// and a reservation-number-shaped token. Partial matches return `None`;
/// the caller passes those utterances straight through.
pub fn extract_pair(text: &str) -> Option<ExtractedPair> {
    let email = EMAIL.find(text)?;

    // Search for the reservation number outside the email span so a local
    // part like "ab-12345@x.com" cannot satisfy both patterns at once.
    let mut scratch = String::with_capacity(text.len());
    scratch.push_str(&text[..email.start()]);
    scratch.push_str(&" ".repeat(email.len()));
    scratch.push_str(&text[email.end()..]);

    let reservation = RESERVATION_ID.find(&scratch)?;

    Some(ExtractedPair {
        email: email.as_str().to_string(),
        reservation_id: reservation.as_str().to_string(),
    })
}
