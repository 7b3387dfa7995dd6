//! Catalog data-quality check
//!
//! Read-only scan for records the schema accepts but a guest should never
//! see: wines nobody can order, free bottles, wines filed nowhere.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use shared::error::AppResult;
use shared::models::{CategoryKind, Wine};
use sqlx::SqlitePool;

use crate::db::repository::{category, wine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NoVariants,
    ZeroPrice,
    NoCategory,
    WrongCategoryKind,
    OrphanVariants,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogIssue {
    pub kind: IssueKind,
    pub wine_id: Option<i64>,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wine_id {
            Some(id) => write!(f, "[{:?}] wine {}: {}", self.kind, id, self.message),
            None => write!(f, "[{:?}] {}", self.kind, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub wines_checked: usize,
    pub issues: Vec<CatalogIssue>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

pub async fn check_catalog(pool: &SqlitePool) -> AppResult<QualityReport> {
    let wines = wine::find_all(pool).await?;
    let kinds: HashMap<i64, CategoryKind> = category::find_all(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect();
    let stored_variants = wine::count_variants(pool).await?;

    let mut report = inspect_wines(&wines, &kinds);

    let attached: i64 = wines.iter().map(|w| w.variants.len() as i64).sum();
    if stored_variants > attached {
        report.issues.push(CatalogIssue {
            kind: IssueKind::OrphanVariants,
            wine_id: None,
            message: format!("{} variant rows have no wine", stored_variants - attached),
        });
    }

    tracing::info!(
        wines = report.wines_checked,
        issues = report.issues.len(),
        "Catalog check finished"
    );
    Ok(report)
}

fn inspect_wines(wines: &[Wine], kinds: &HashMap<i64, CategoryKind>) -> QualityReport {
    let mut issues = Vec::new();

    for wine in wines {
        if wine.variants.is_empty() {
            issues.push(CatalogIssue {
                kind: IssueKind::NoVariants,
                wine_id: Some(wine.id),
                message: format!("'{}' has no variants", wine.name),
            });
        }

        for variant in wine.variants.iter().filter(|v| v.price.is_zero()) {
            issues.push(CatalogIssue {
                kind: IssueKind::ZeroPrice,
                wine_id: Some(wine.id),
                message: format!(
                    "'{}' {} {} costs 0",
                    wine.name, variant.volume, variant.container
                ),
            });
        }

        match wine.category_id {
            None if wine.available => issues.push(CatalogIssue {
                kind: IssueKind::NoCategory,
                wine_id: Some(wine.id),
                message: format!("'{}' is available but has no category", wine.name),
            }),
            Some(id) if kinds.get(&id).is_some_and(|k| *k != CategoryKind::Wine) => {
                issues.push(CatalogIssue {
                    kind: IssueKind::WrongCategoryKind,
                    wine_id: Some(wine.id),
                    message: format!("'{}' is filed under non-wine category {}", wine.name, id),
                })
            }
            _ => {}
        }
    }

    QualityReport {
        wines_checked: wines.len(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{Container, Variant, Volume, WineOrigin, WineType};

    fn wine(id: i64, category_id: Option<i64>, prices: &[i64]) -> Wine {
        Wine {
            id,
            name: format!("Wine {id}"),
            origin: WineOrigin::France,
            wine_type: WineType::Red,
            description: None,
            category_id,
            available: true,
            variants: prices
                .iter()
                .enumerate()
                .map(|(i, cents)| Variant {
                    id: i as i64 + 1,
                    volume: if i == 0 { Volume::Cl75 } else { Volume::Cl12 },
                    container: if i == 0 {
                        Container::Bouteille
                    } else {
                        Container::Verre
                    },
                    price: Decimal::new(*cents, 2),
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_catalog() {
        let kinds = HashMap::from([(1, CategoryKind::Wine)]);
        let report = inspect_wines(&[wine(1, Some(1), &[2800, 650])], &kinds);
        assert!(report.is_clean());
        assert_eq!(report.wines_checked, 1);
    }

    #[test]
    fn test_reports_each_problem() {
        let kinds = HashMap::from([(1, CategoryKind::Wine), (2, CategoryKind::Menu)]);
        let wines = vec![
            wine(1, Some(1), &[]),
            wine(2, Some(1), &[2800, 0]),
            wine(3, None, &[1500]),
            wine(4, Some(2), &[1500]),
        ];
        let report = inspect_wines(&wines, &kinds);
        let kinds: Vec<_> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::NoVariants,
                IssueKind::ZeroPrice,
                IssueKind::NoCategory,
                IssueKind::WrongCategoryKind
            ]
        );
    }

    #[test]
    fn test_unavailable_wine_without_category_is_fine() {
        let mut w = wine(1, None, &[1000]);
        w.available = false;
        assert!(inspect_wines(&[w], &HashMap::new()).is_clean());
    }
}
