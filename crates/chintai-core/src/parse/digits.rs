//! Numeric substring extraction shared by the other parsers.

use super::patterns::{INTEGER, NUMBER};
use super::Field;

/// Extract the first numeric substring (`[0-9.]+`) as a float.
///
/// A run that is not a valid number, like a lone `.` or `1.2.3`, counts as
/// missing.
pub fn extract_digit(text: &str) -> Field<f64> {
    NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .into()
}

/// Whether the text contains at least one ASCII digit.
pub fn contains_digit(text: &str) -> bool {
    INTEGER.is_match(text)
}

/// All integer runs in order of appearance.
pub fn extract_integers(text: &str) -> Vec<u32> {
    INTEGER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_number() {
        assert_eq!(extract_digit("築12年"), Field::Parsed(12.0));
        assert_eq!(extract_digit("25.5m2"), Field::Parsed(25.5));
        assert_eq!(extract_digit("3.5万円 / 2万円"), Field::Parsed(3.5));
    }

    #[test]
    fn test_extract_digit_missing() {
        assert_eq!(extract_digit("-"), Field::Missing);
        assert_eq!(extract_digit(""), Field::Missing);
        assert_eq!(extract_digit("."), Field::Missing);
    }

    #[test]
    fn test_contains_digit() {
        assert!(contains_digit("5000円"));
        assert!(!contains_digit("-"));
        assert!(!contains_digit("."));
    }

    #[test]
    fn test_extract_integers() {
        assert_eq!(extract_integers("3-4階"), vec![3, 4]);
        assert_eq!(extract_integers("B1"), vec![1]);
        assert!(extract_integers("階").is_empty());
    }
}
