//! Character-by-character read-back for text-to-speech.

/// Render a value as an enumerated sequence of named characters so the
/// avatar pronounces it unambiguously: letters upper-cased, digits spoken
/// as-is, symbols by name, joined with ", ".
pub fn spell_out(value: &str) -> String {
    value
        .chars()
        .map(char_name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn char_name(c: char) -> String {
    match c {
        '@' => "at sign".to_string(),
        '.' => "dot".to_string(),
        '-' => "dash".to_string(),
        '_' => "underscore".to_string(),
        c if c.is_ascii_alphabetic() => c.to_ascii_uppercase().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spells_email() {
        assert_eq!(spell_out("a.b@x.co"), "A, dot, B, at sign, X, dot, C, O");
    }

    #[test]
    fn test_spells_reservation_id() {
        assert_eq!(spell_out("TB-1042"), "T, B, dash, 1, 0, 4, 2");
    }

    #[test]
    fn test_underscore_and_case() {
        assert_eq!(spell_out("j_d"), "J, underscore, D");
    }
}
