//! Block identifiers compatible with Umbraco UDIs
//!
//! A UDI wraps a random version-4 UUID and renders as
//! `umb://element/<32 lowercase hex digits>` (no hyphens).

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::{Builder, Uuid};

/// URI prefix for element (block) UDIs
pub const URI_PREFIX: &str = "umb://element/";

/// Errors that can occur when parsing a UDI
#[derive(Error, Debug, PartialEq)]
pub enum UdiError {
    #[error("Invalid UDI format: {0}")]
    InvalidUri(String),

    #[error("Invalid UDI hex part: expected 32 hex digits, got {0:?}")]
    InvalidHex(String),
}

/// Identifier of a block inside a block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Udi(Uuid);

impl Udi {
    /// Generate a new identifier from the given randomness source.
    ///
    /// Version and variant bits are forced, so the canonical hyphenated form
    /// always has `4` as its 13th hex digit and one of `8`, `9`, `a`, `b` as
    /// its 17th.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        Self(Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Canonical hyphenated form, e.g. `3f2b...-....-4...-a...-............`
    pub fn to_hyphenated(&self) -> String {
        self.0.hyphenated().to_string()
    }

    /// Full URI form (`umb://element/<hex>`)
    pub fn to_uri(&self) -> String {
        format!("{}{}", URI_PREFIX, self.0.simple())
    }

    /// Parse from the URI form.
    pub fn parse(uri: &str) -> Result<Self, UdiError> {
        let hex = uri
            .strip_prefix(URI_PREFIX)
            .ok_or_else(|| UdiError::InvalidUri(uri.to_string()))?;

        if hex.len() != 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(UdiError::InvalidHex(hex.to_string()));
        }

        Uuid::try_parse(hex)
            .map(Self)
            .map_err(|_| UdiError::InvalidHex(hex.to_string()))
    }
}

impl std::fmt::Display for Udi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}

impl std::str::FromStr for Udi {
    type Err = UdiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Udi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_uri())
    }
}

impl<'de> Deserialize<'de> for Udi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Uuid> for Udi {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Udi::generate(&mut rng);
        let b = Udi::generate(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = Udi::generate(&mut StdRng::seed_from_u64(42));
        let b = Udi::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_uri_has_no_hyphens() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let uri = Udi::generate(&mut rng).to_uri();
            assert!(uri.starts_with("umb://element/"));
            assert!(!uri.contains('-'));
            assert_eq!(uri.len(), URI_PREFIX.len() + 32);
        }
    }

    #[test]
    fn test_version_and_variant_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let udi = Udi::generate(&mut rng);
            let hex: Vec<char> = udi.to_hyphenated().chars().filter(|c| *c != '-').collect();
            assert_eq!(hex[12], '4');
            assert!(matches!(hex[16], '8' | '9' | 'a' | 'b'));

            // URI form is the hyphenated form with hyphens stripped
            let stripped: String = hex.iter().collect();
            assert_eq!(udi.to_uri(), format!("{}{}", URI_PREFIX, stripped));
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        let udi = Udi::generate(&mut StdRng::seed_from_u64(3));
        assert_eq!(Udi::parse(&udi.to_uri()).unwrap(), udi);
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        assert!(matches!(
            Udi::parse("umb://document/0123456789abcdef0123456789abcdef"),
            Err(UdiError::InvalidUri(_))
        ));
        assert!(matches!(
            Udi::parse("umb://element/0123-4567"),
            Err(UdiError::InvalidHex(_))
        ));
        assert!(matches!(
            Udi::parse("umb://element/01234567-89ab-4def-8123-456789abcdef"),
            Err(UdiError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let udi = Udi::generate(&mut StdRng::seed_from_u64(9));
        let json = serde_json::to_string(&udi).unwrap();
        assert_eq!(json, format!("\"{}\"", udi.to_uri()));
        let parsed: Udi = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, udi);
    }
}
