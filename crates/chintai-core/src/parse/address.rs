//! Address splitting around the district name.

use serde::Serialize;

use super::Field;

/// An address split into the part before the district and the part after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressParts {
    /// Text preceding the district, usually the prefecture ("東京都").
    pub prefecture: Field<String>,
    /// Text following the district ("白金台3").
    pub rest: String,
}

/// Split a full address on the first occurrence of `district`.
///
/// When the district does not occur in the address the prefecture is missing
/// and the address is kept whole.
pub fn split_address(address: &str, district: &str) -> AddressParts {
    if district.is_empty() {
        return AddressParts {
            prefecture: Field::Missing,
            rest: address.to_string(),
        };
    }

    match address.find(district) {
        Some(i) => AddressParts {
            prefecture: Field::Parsed(address[..i].to_string()),
            rest: address[i + district.len()..].to_string(),
        },
        None => AddressParts {
            prefecture: Field::Missing,
            rest: address.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_address() {
        let parts = split_address("東京都港区白金台3", "港区");
        assert_eq!(parts.prefecture, Field::Parsed("東京都".to_string()));
        assert_eq!(parts.rest, "白金台3");
    }

    #[test]
    fn test_split_uses_first_occurrence() {
        let parts = split_address("東京都北区北区役所前", "北区");
        assert_eq!(parts.prefecture, Field::Parsed("東京都".to_string()));
        assert_eq!(parts.rest, "北区役所前");
    }

    #[test]
    fn test_district_absent() {
        let parts = split_address("神奈川県川崎市", "港区");
        assert_eq!(parts.prefecture, Field::Missing);
        assert_eq!(parts.rest, "神奈川県川崎市");
    }

    #[test]
    fn test_empty_district() {
        let parts = split_address("東京都港区", "");
        assert_eq!(parts.prefecture, Field::Missing);
        assert_eq!(parts.rest, "東京都港区");
    }
}
