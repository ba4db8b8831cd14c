use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Identity of a chunk, extracted from the placeholder position of a filename
///
/// Keys that parse entirely as integers order numerically, so `2` sorts before
/// `10`, whatever their width; all other keys order lexicographically and come
/// after every numeric key. Numeric keys compare by value: `3` and `03` are the
/// same chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ChunkKey {
    /// Key made only of an (optionally signed) integer
    Numeric(Integer),
    /// Any other key
    Text(String),
}

/// An integer of any width, kept as its decimal digits
///
/// Leading zeros are dropped and zero is never negative, so equal values have
/// equal representations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    negative: bool,
    digits: String,
}

impl Integer {
    /// Parse an optional `+`/`-` sign followed by one or more ASCII digits
    pub fn parse(raw: &str) -> Option<Self> {
        let (negative, digits) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Some(Self::from(0));
        }
        Some(Self {
            negative,
            digits: digits.to_string(),
        })
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The value, when it fits in an `i64`
    pub fn to_i64(&self) -> Option<i64> {
        self.to_string().parse().ok()
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude_cmp(other),
            (true, true) => other.magnitude_cmp(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self {
            negative: value < 0,
            digits: value.unsigned_abs().to_string(),
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

impl Serialize for Integer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_i64() {
            Some(value) => serializer.serialize_i64(value),
            None => serializer.collect_str(self),
        }
    }
}

impl ChunkKey {
    /// Classify a raw placeholder match
    pub fn parse(raw: &str) -> Self {
        match Integer::parse(raw) {
            Some(value) => Self::Numeric(value),
            None => Self::Text(raw.to_string()),
        }
    }

    /// Whether the key orders numerically
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => fmt::Display::fmt(value, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ChunkKey {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<i64> for ChunkKey {
    fn from(value: i64) -> Self {
        Self::Numeric(Integer::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(raw: &[&str]) -> Vec<String> {
        let mut keys: Vec<ChunkKey> = raw.iter().map(|r| ChunkKey::parse(r)).collect();
        keys.sort();
        keys.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(sorted(&["2", "10", "1"]), vec!["1", "2", "10"]);
    }

    #[test]
    fn test_text_order_is_lexicographic() {
        assert_eq!(sorted(&["b", "a10", "a2"]), vec!["a10", "a2", "b"]);
    }

    #[test]
    fn test_numeric_before_text() {
        assert_eq!(sorted(&["x", "100", "-4"]), vec!["-4", "100", "x"]);
    }

    #[test]
    fn test_leading_zeros_compare_by_value() {
        assert_eq!(ChunkKey::parse("03"), ChunkKey::parse("3"));
        assert!(ChunkKey::parse("03").is_numeric());
    }

    #[test]
    fn test_partial_digits_are_text() {
        assert_eq!(ChunkKey::parse("3a"), ChunkKey::Text("3a".to_string()));
        assert_eq!(ChunkKey::parse(" 3"), ChunkKey::Text(" 3".to_string()));
    }

    #[test]
    fn test_wide_integers_stay_numeric() {
        let forty = format!("9{}", "0".repeat(39));
        let forty_one = format!("1{}", "0".repeat(40));
        assert!(ChunkKey::parse(&forty_one).is_numeric());
        assert_eq!(
            sorted(&[forty_one.as_str(), forty.as_str(), "-5", format!("-{}", forty).as_str()]),
            vec![format!("-{}", forty), "-5".to_string(), forty, forty_one]
        );
    }

    #[test]
    fn test_signs_and_zero() {
        assert_eq!(ChunkKey::parse("-0"), ChunkKey::from(0));
        assert_eq!(ChunkKey::parse("+007"), ChunkKey::from(7));
        assert_eq!(sorted(&["-10", "-9", "0", "-0010"]), vec!["-10", "-10", "-9", "0"]);
        assert!(!ChunkKey::parse("-").is_numeric());
        assert!(!ChunkKey::parse("+").is_numeric());
        assert!(!ChunkKey::parse("--1").is_numeric());
    }

    #[test]
    fn test_serializes_small_integers_as_numbers() {
        assert_eq!(serde_json::to_string(&ChunkKey::parse("042")).unwrap(), "42");
        let wide = "1".repeat(30);
        assert_eq!(
            serde_json::to_string(&ChunkKey::parse(&wide)).unwrap(),
            format!("\"{}\"", wide)
        );
        assert_eq!(serde_json::to_string(&ChunkKey::parse("a1")).unwrap(), "\"a1\"");
    }
}
