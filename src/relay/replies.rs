//! Fixed user-facing lines.
//!
//! Every failure the relay can hit resolves to one of these natural
//! language strings; the widget is a voice agent and never sees raw
//! error codes.

use crate::dialogue::spell_out;

/// Substituted when a request carries no user id.
pub const DEFAULT_USER_ID: &str = "anonymous";

pub const GREETING: &str =
    "Hi, I'm Maisie, the reservations concierge. How can I help you today?";

/// Session could not be created at all.
pub const APOLOGY_CONNECT: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Session was invalid and the one retry on a fresh session failed too.
pub const APOLOGY_RECONNECT: &str =
    "I'm sorry, I lost my connection for a moment. Could you say that again?";

/// Timeout or unknown backend failure; offers a human.
pub const APOLOGY_ESCALATE: &str =
    "I'm sorry, that's taking longer than it should. Would you like me to connect you with a member of our team?";

/// Backend failed the action without saying anything usable.
pub const APOLOGY_RETRY: &str =
    "I'm sorry, something went wrong on my end. Could you try that once more?";

/// Caller rejected the read-back.
pub const REENTER_PROMPT: &str =
    "No problem, let's try that again. Could you give me your email address and reservation number one more time?";

/// Backend escalated to a human without accompanying text.
pub const HANDOFF_NOTICE: &str =
    "Let me connect you with a member of our team who can help from here.";

/// The spelled-out read-back of both identifiers plus the yes/no question.
pub fn confirmation_prompt(email: &str, reservation_id: &str) -> String {
    format!(
        "Let me make sure I have that right. Your email address is: {}. Your reservation number is: {}. Did I get that right?",
        spell_out(email),
        spell_out(reservation_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_prompt_spells_both() {
        let prompt = confirmation_prompt("a.b@x.co", "TB-1042");
        assert!(prompt.contains("A, dot, B, at sign, X, dot, C, O"));
        assert!(prompt.contains("T, B, dash, 1, 0, 4, 2"));
        assert!(prompt.ends_with("Did I get that right?"));
    }
}
