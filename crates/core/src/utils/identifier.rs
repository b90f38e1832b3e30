/// Check if a character can start a JavaScript identifier.
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphabetic()
}

/// Check if a character can be part of a JavaScript identifier.
pub fn is_identifier_part(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphanumeric()
}

/// Whether `name` can be written as a bare identifier (`obj.name`)
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_names() {
        assert!(is_identifier_name("foo"));
        assert!(is_identifier_name("$el"));
        assert!(is_identifier_name("_private2"));
        assert!(is_identifier_name("café"));
    }

    #[test]
    fn test_non_identifier_names() {
        assert!(!is_identifier_name(""));
        assert!(!is_identifier_name("2d"));
        assert!(!is_identifier_name("data-id"));
        assert!(!is_identifier_name("has space"));
    }
}
