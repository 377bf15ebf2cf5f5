//! Building age parsing ("新築", "築12年").

use super::digits::extract_digit;
use super::patterns::NEW_BUILD;
use super::Field;

/// Parse the building age in whole years. A new build is age 0.
pub fn parse_age(text: &str) -> Field<u32> {
    if text.trim() == NEW_BUILD {
        return Field::Parsed(0);
    }
    extract_digit(text).map(|years| years as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("築12年"), Field::Parsed(12));
        assert_eq!(parse_age("築1年"), Field::Parsed(1));
    }

    #[test]
    fn test_new_build() {
        assert_eq!(parse_age("新築"), Field::Parsed(0));
        assert_eq!(parse_age(" 新築 "), Field::Parsed(0));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_age("不詳"), Field::Missing);
    }
}
