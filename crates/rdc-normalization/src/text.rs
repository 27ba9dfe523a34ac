//! Plain text repairs.

/// Replace every occurrence of `from` with `to`. An empty `from` is a no-op.
pub fn replace_literal(value: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        value.to_string()
    } else {
        value.replace(from, to)
    }
}

/// Remove every non-digit character.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_double_at() {
        assert_eq!(replace_literal("a@@b.com", "@@", "@"), "a@b.com");
        assert_eq!(replace_literal("a@b.com", "@@", "@"), "a@b.com");
    }

    #[test]
    fn test_card_question_marks() {
        assert_eq!(replace_literal("??4971858637664481", "?", ""), "4971858637664481");
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(replace_literal("abc", "", "x"), "abc");
    }

    #[test]
    fn test_staff_numbers() {
        assert_eq!(digits_only("J78"), "78");
        assert_eq!(digits_only("3n9"), "39");
        assert_eq!(digits_only("  42 "), "42");
    }
}
