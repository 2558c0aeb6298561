//! Domain types shared by the API clients, the favourites core and the UI.
//!
//! Identifiers arrive in two shapes: the catalog sends `idCategory` as a
//! string-encoded integer while the backend sends `item_id` as a number (or
//! sometimes a string). [`ItemId`] accepts both and compares as `i64`, so the
//! two sides can be matched directly. Integral floats (`2.0`) and zero-padded
//! strings (`"02"`) normalize to the same integer.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Identifiers
// ============================================================================

/// Normalized item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(i64);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid item id: {0:?}")]
pub struct InvalidItemId(pub String);

impl ItemId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ItemId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for ItemId {
    type Err = InvalidItemId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidItemId(s.to_string()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Either wire shape of an identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n
                .as_i64()
                .or_else(|| integral_f64(&n))
                .map(ItemId)
                .ok_or_else(|| serde::de::Error::custom(InvalidItemId(n.to_string()))),
            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// `2.0` names the same item as `2`; `2.5` names nothing.
fn integral_f64(n: &serde_json::Number) -> Option<i64> {
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

// ============================================================================
// Catalog and Favourites
// ============================================================================

/// A meal category from the external catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory")]
    pub id: ItemId,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail_url: String,
}

/// A user's saved reference to a catalog category.
///
/// The backend attaches ownership metadata to each record; only the id is
/// read here, everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FavouriteRecord {
    pub item_id: ItemId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_from_string_and_number_compare_equal() {
        let from_text: ItemId = serde_json::from_str("\"2\"").unwrap();
        let from_number: ItemId = serde_json::from_str("2").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(from_text.get(), 2);
    }

    #[test]
    fn test_item_id_tolerates_whitespace() {
        let id: ItemId = serde_json::from_str("\" 14 \"").unwrap();
        assert_eq!(id, ItemId::new(14));
    }

    #[test]
    fn test_item_id_integral_float_matches_integer() {
        let from_float: ItemId = serde_json::from_str("2.0").unwrap();
        let from_text: ItemId = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(from_float, from_text);

        let record: FavouriteRecord = serde_json::from_str(r#"{"item_id": 7.0}"#).unwrap();
        assert_eq!(record.item_id, ItemId::new(7));
    }

    #[test]
    fn test_item_id_leading_zero_is_same_integer() {
        let padded: ItemId = serde_json::from_str("\"02\"").unwrap();
        assert_eq!(padded, ItemId::new(2));
    }

    #[test]
    fn test_item_id_rejects_non_numeric() {
        assert!(serde_json::from_str::<ItemId>("\"beef\"").is_err());
        assert!(serde_json::from_str::<ItemId>("2.5").is_err());
        assert!(serde_json::from_str::<ItemId>("1e300").is_err());
        assert!(serde_json::from_str::<ItemId>("true").is_err());
        assert_eq!(
            "x1".parse::<ItemId>(),
            Err(InvalidItemId("x1".to_string()))
        );
    }

    #[test]
    fn test_category_from_catalog_json() {
        let json = r#"{
            "idCategory": "1",
            "strCategory": "Beef",
            "strCategoryThumb": "https://www.themealdb.com/images/category/beef.png",
            "strCategoryDescription": "Beef is the culinary name for meat from cattle."
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, ItemId::new(1));
        assert_eq!(category.name, "Beef");
        assert!(category.thumbnail_url.ends_with("beef.png"));
    }

    #[test]
    fn test_favourite_record_ignores_ownership_fields() {
        let json = r#"{"item_id": 7, "user_id": 99, "name": "Lamb", "_id": "abc"}"#;
        let record: FavouriteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.item_id, ItemId::new(7));
    }

    #[test]
    fn test_item_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ItemId::new(3)).unwrap(), "3");
    }
}
