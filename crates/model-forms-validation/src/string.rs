//! String validation functions

use regex::Regex;

/// Validates that a string has visible content
pub fn validate_not_blank(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        Err("This field is required".to_string())
    } else {
        Ok(())
    }
}

/// Validates string length, counted in characters
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if s.chars().count() >= min {
        Ok(())
    } else {
        Err(format!("Minimum length is {}", min))
    }
}

pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if s.chars().count() <= max {
        Ok(())
    } else {
        Err(format!("Maximum length is {}", max))
    }
}

/// Regex pattern matching with a caller-supplied message
pub fn validate_pattern(s: &str, pattern: &Regex, message: &str) -> Result<(), String> {
    if pattern.is_match(s) {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("a").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n").is_err());
    }

    #[test]
    fn test_length_validators() {
        assert!(validate_min_length("hello", 3).is_ok());
        assert!(validate_min_length("hi", 3).is_err());

        assert!(validate_max_length("hello", 10).is_ok());
        assert!(validate_max_length("verylongstring", 5).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(validate_max_length("ワークアウ", 5).is_ok());
        assert!(validate_min_length("ワークアウ", 6).is_err());
    }

    #[test]
    fn test_pattern() {
        let phone = Regex::new(r"^\d{3}-\d{4}$").unwrap();
        assert!(validate_pattern("555-1234", &phone, "bad phone").is_ok());
        assert_eq!(
            validate_pattern("5551234", &phone, "bad phone"),
            Err("bad phone".to_string())
        );
    }
}
