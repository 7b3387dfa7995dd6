//! Menu Entry Model (food items and drinks)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which public list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum MenuSection {
    Food,
    Drink,
}

impl MenuSection {
    /// Singular resource label used in messages
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "Menu item",
            Self::Drink => "Drink",
        }
    }
}

/// Menu item or drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: Option<i64>,
    pub available: bool,
    pub sort_order: Option<i32>,
}

/// Create menu entry payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntryCreate {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub available: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Update menu entry payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub available: Option<bool>,
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_price_optional() {
        let create: MenuEntryCreate =
            serde_json::from_str(r#"{"name": "Tarte Tatin", "price": 9.5}"#).unwrap();
        assert_eq!(create.price, Some(Decimal::new(95, 1)));

        let create: MenuEntryCreate = serde_json::from_str(r#"{"name": "Tarte Tatin"}"#).unwrap();
        assert!(create.price.is_none());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = MenuEntry {
            id: 4,
            name: "Espresso".into(),
            description: None,
            price: Decimal::new(250, 2),
            category_id: None,
            available: true,
            sort_order: Some(2),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["price"], 2.5);
        assert_eq!(json["sortOrder"], 2);
        assert!(json["categoryId"].is_null());
    }
}
