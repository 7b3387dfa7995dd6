//! Wine Model
//!
//! A wine is a catalog entry owning zero or more serving variants
//! (volume + container + price). The four enumerations below are the single
//! source of truth for the accepted values: serde uses them at the API edge
//! and sqlx uses them (backed by SQL `CHECK` constraints) in storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Country (or region group) a wine comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum WineOrigin {
    France,
    Italie,
    Espagne,
    Portugal,
    Allemagne,
    Autriche,
    Autre,
}

impl WineOrigin {
    pub const ALL: [WineOrigin; 7] = [
        Self::France,
        Self::Italie,
        Self::Espagne,
        Self::Portugal,
        Self::Allemagne,
        Self::Autriche,
        Self::Autre,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::France => "France",
            Self::Italie => "Italie",
            Self::Espagne => "Espagne",
            Self::Portugal => "Portugal",
            Self::Allemagne => "Allemagne",
            Self::Autriche => "Autriche",
            Self::Autre => "Autre",
        }
    }
}

/// Wine style, as printed in the wine list section headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum WineType {
    #[serde(rename = "VINS ROUGE")]
    #[cfg_attr(feature = "db", sqlx(rename = "VINS ROUGE"))]
    Red,
    /// Accepts the accented spelling on input, always stored unaccented
    #[serde(rename = "VINS ROSE", alias = "VINS ROSÉ")]
    #[cfg_attr(feature = "db", sqlx(rename = "VINS ROSE"))]
    Rose,
    #[serde(rename = "VINS BLANC")]
    #[cfg_attr(feature = "db", sqlx(rename = "VINS BLANC"))]
    White,
    #[serde(rename = "CHAMPAGNE")]
    #[cfg_attr(feature = "db", sqlx(rename = "CHAMPAGNE"))]
    Champagne,
    #[serde(rename = "VINS PETILLANT")]
    #[cfg_attr(feature = "db", sqlx(rename = "VINS PETILLANT"))]
    Sparkling,
}

impl WineType {
    pub const ALL: [WineType; 5] = [
        Self::Red,
        Self::Rose,
        Self::White,
        Self::Champagne,
        Self::Sparkling,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "VINS ROUGE",
            Self::Rose => "VINS ROSE",
            Self::White => "VINS BLANC",
            Self::Champagne => "CHAMPAGNE",
            Self::Sparkling => "VINS PETILLANT",
        }
    }
}

/// Pour or bottle size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Volume {
    #[serde(rename = "12cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "12cl"))]
    Cl12,
    #[serde(rename = "14cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "14cl"))]
    Cl14,
    #[serde(rename = "25cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "25cl"))]
    Cl25,
    #[serde(rename = "37.5cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "37.5cl"))]
    Cl37_5,
    #[serde(rename = "50cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "50cl"))]
    Cl50,
    #[serde(rename = "75cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "75cl"))]
    Cl75,
    #[serde(rename = "150cl")]
    #[cfg_attr(feature = "db", sqlx(rename = "150cl"))]
    Cl150,
}

impl Volume {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cl12 => "12cl",
            Self::Cl14 => "14cl",
            Self::Cl25 => "25cl",
            Self::Cl37_5 => "37.5cl",
            Self::Cl50 => "50cl",
            Self::Cl75 => "75cl",
            Self::Cl150 => "150cl",
        }
    }
}

/// How a variant is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Container {
    Verre,
    Carafe,
    Bouteille,
}

impl Container {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Verre => "Verre",
            Self::Carafe => "Carafe",
            Self::Bouteille => "Bouteille",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(WineOrigin, WineType, Volume, Container);

/// Priced serving option of a wine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: i64,
    pub volume: Volume,
    pub container: Container,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Wine entity with its variants embedded in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wine {
    pub id: i64,
    pub name: String,
    pub origin: WineOrigin,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub available: bool,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// Variant as submitted by a client (no id, the server assigns it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub volume: Volume,
    pub container: Container,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&Variant> for VariantInput {
    fn from(v: &Variant) -> Self {
        Self {
            volume: v.volume,
            container: v.container,
            price: v.price,
        }
    }
}

/// Create / full-replace wine payload
///
/// `origin` and `type` are optional at the serde level so that a missing
/// field is reported as a domain validation error rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineCreate {
    #[serde(default)]
    pub name: String,
    pub origin: Option<WineOrigin>,
    #[serde(rename = "type")]
    pub wine_type: Option<WineType>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub available: Option<bool>,
    #[serde(default)]
    pub variants: Vec<VariantInput>,
}

/// Partial wine update payload; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineUpdate {
    pub name: Option<String>,
    pub origin: Option<WineOrigin>,
    #[serde(rename = "type")]
    pub wine_type: Option<WineType>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub available: Option<bool>,
    pub variants: Option<Vec<VariantInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_string(&WineOrigin::Italie).unwrap(), "\"Italie\"");
        assert_eq!(serde_json::to_string(&WineType::White).unwrap(), "\"VINS BLANC\"");
        assert_eq!(serde_json::to_string(&Volume::Cl37_5).unwrap(), "\"37.5cl\"");
        assert_eq!(serde_json::to_string(&Container::Bouteille).unwrap(), "\"Bouteille\"");
        for origin in WineOrigin::ALL {
            let json = serde_json::to_string(&origin).unwrap();
            assert_eq!(json, format!("\"{}\"", origin.as_str()));
        }
        for wine_type in WineType::ALL {
            assert_eq!(wine_type.to_string(), wine_type.as_str());
        }
    }

    #[test]
    fn test_rose_accepts_accented_alias() {
        let t: WineType = serde_json::from_str("\"VINS ROSÉ\"").unwrap();
        assert_eq!(t, WineType::Rose);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"VINS ROSE\"");
    }

    #[test]
    fn test_free_text_values_rejected() {
        assert!(serde_json::from_str::<WineOrigin>("\"Italy\"").is_err());
        assert!(serde_json::from_str::<WineOrigin>("\"\"").is_err());
        assert!(serde_json::from_str::<WineType>("\"Red\"").is_err());
        assert!(serde_json::from_str::<Volume>("\"70cl\"").is_err());
        assert!(serde_json::from_str::<Container>("\"verre\"").is_err());
    }

    #[test]
    fn test_create_payload_from_json() {
        let body = r#"{
            "name": "Pinot Grigio",
            "origin": "Italie",
            "type": "VINS BLANC",
            "variants": [{"volume": "75cl", "container": "Bouteille", "price": 28.0}]
        }"#;
        let create: WineCreate = serde_json::from_str(body).unwrap();
        assert_eq!(create.name, "Pinot Grigio");
        assert_eq!(create.origin, Some(WineOrigin::Italie));
        assert_eq!(create.wine_type, Some(WineType::White));
        assert_eq!(create.variants.len(), 1);
        assert_eq!(create.variants[0].price, Decimal::new(28, 0));
        assert!(create.available.is_none());
    }

    #[test]
    fn test_missing_origin_is_none_not_error() {
        let create: WineCreate =
            serde_json::from_str(r#"{"name": "Chablis", "type": "VINS BLANC"}"#).unwrap();
        assert!(create.origin.is_none());
        assert!(create.variants.is_empty());
    }

    #[test]
    fn test_wine_serializes_camel_case_with_numeric_price() {
        let wine = Wine {
            id: 1,
            name: "Chablis".into(),
            origin: WineOrigin::France,
            wine_type: WineType::White,
            description: None,
            category_id: Some(3),
            available: true,
            variants: vec![Variant {
                id: 7,
                volume: Volume::Cl12,
                container: Container::Verre,
                price: Decimal::new(850, 2),
            }],
        };
        let json = serde_json::to_value(&wine).unwrap();
        assert_eq!(json["type"], "VINS BLANC");
        assert_eq!(json["categoryId"], 3);
        assert_eq!(json["variants"][0]["price"], 8.5);
        assert_eq!(json["variants"][0]["volume"], "12cl");
    }
}
