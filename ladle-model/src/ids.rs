use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{ModelError, Result};

/// Strongly typed ID for recipes.
///
/// The store works with the native [`Uuid`]; everything outside the store
/// sees the canonical lowercase hyphenated string. Conversion happens only
/// through [`RecipeID::parse`] and [`Display`](fmt::Display), never
/// implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecipeID(pub Uuid);

impl Default for RecipeID {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeID {
    pub fn new() -> Self {
        RecipeID(Uuid::now_v7())
    }

    /// Parse an identifier received at the API boundary.
    ///
    /// Fails with [`ModelError::InvalidIdentifier`] when the input is not a
    /// UUID. A successful parse says nothing about whether a recipe with this
    /// id exists.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ModelError::InvalidIdentifier(raw.to_string()));
        }

        Uuid::parse_str(raw)
            .map(RecipeID)
            .map_err(|_| ModelError::InvalidIdentifier(raw.to_string()))
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for RecipeID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RecipeID {
    fn from(value: Uuid) -> Self {
        RecipeID(value)
    }
}

impl FromStr for RecipeID {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecipeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for RecipeID {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecipeID {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RecipeID::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_canonical_form_and_renders_it_back() {
        let raw = "0190f3c4-7b1e-7cc2-9a51-3f2d6a1b9e40";
        let id = RecipeID::parse(raw).unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn parse_normalizes_alternate_uuid_spellings() {
        let id = RecipeID::parse("0190F3C47B1E7CC29A513F2D6A1B9E40").unwrap();
        assert_eq!(id.to_string(), "0190f3c4-7b1e-7cc2-9a51-3f2d6a1b9e40");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for raw in ["", "not-an-id", "64b7f0c2e13a4d2f9c8b1a7e", "1234", " "] {
            assert_eq!(
                RecipeID::parse(raw),
                Err(ModelError::InvalidIdentifier(raw.to_string())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn serde_uses_the_string_form() {
        let id = RecipeID::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: RecipeID = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<RecipeID>("\"nope\"").is_err());
    }
}
