//! Wine Repository
//!
//! A wine row plus its ordered variant rows. Variants are only ever written
//! together with their wine, inside one transaction.

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use shared::models::{Container, Variant, Volume, Wine, WineOrigin, WineType};
use shared::util::{cents_to_price, now_millis};
use sqlx::{Sqlite, SqlitePool, Transaction};

const WINE_COLUMNS: &str =
    "id, name, origin, wine_type, description, category_id, available";

#[derive(Debug, sqlx::FromRow)]
struct WineRow {
    id: i64,
    name: String,
    origin: WineOrigin,
    wine_type: WineType,
    description: Option<String>,
    category_id: Option<i64>,
    available: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: i64,
    wine_id: i64,
    volume: Volume,
    container: Container,
    price_cents: i64,
}

impl From<VariantRow> for Variant {
    fn from(row: VariantRow) -> Self {
        Self {
            id: row.id,
            volume: row.volume,
            container: row.container,
            price: cents_to_price(row.price_cents),
        }
    }
}

impl WineRow {
    fn into_wine(self, variants: Vec<Variant>) -> Wine {
        Wine {
            id: self.id,
            name: self.name,
            origin: self.origin,
            wine_type: self.wine_type,
            description: self.description,
            category_id: self.category_id,
            available: self.available,
            variants,
        }
    }
}

/// Validated wine ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct WineDraft {
    pub name: String,
    pub origin: WineOrigin,
    pub wine_type: WineType,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub available: bool,
    pub variants: Vec<VariantDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDraft {
    pub volume: Volume,
    pub container: Container,
    pub price_cents: i64,
}

/// All wines ordered by name, each with its variants in submitted order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Wine>> {
    let rows = sqlx::query_as::<_, WineRow>(&format!(
        "SELECT {WINE_COLUMNS} FROM wine ORDER BY name COLLATE NOCASE, id"
    ))
    .fetch_all(pool)
    .await?;

    let variant_rows = sqlx::query_as::<_, VariantRow>(
        "SELECT id, wine_id, volume, container, price_cents FROM wine_variant ORDER BY wine_id, position, id",
    )
    .fetch_all(pool)
    .await?;

    let mut variants_by_wine: HashMap<i64, Vec<Variant>> = HashMap::new();
    for row in variant_rows {
        variants_by_wine
            .entry(row.wine_id)
            .or_default()
            .push(row.into());
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let variants = variants_by_wine.remove(&row.id).unwrap_or_default();
            row.into_wine(variants)
        })
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Wine>> {
    let row = sqlx::query_as::<_, WineRow>(&format!("SELECT {WINE_COLUMNS} FROM wine WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let variants = find_variants(pool, row.id).await?;
            Ok(Some(row.into_wine(variants)))
        }
        None => Ok(None),
    }
}

/// Exact-name lookup
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Wine>> {
    let row = sqlx::query_as::<_, WineRow>(&format!(
        "SELECT {WINE_COLUMNS} FROM wine WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let variants = find_variants(pool, row.id).await?;
            Ok(Some(row.into_wine(variants)))
        }
        None => Ok(None),
    }
}

async fn find_variants(pool: &SqlitePool, wine_id: i64) -> RepoResult<Vec<Variant>> {
    let rows = sqlx::query_as::<_, VariantRow>(
        "SELECT id, wine_id, volume, container, price_cents FROM wine_variant WHERE wine_id = ? ORDER BY position, id",
    )
    .bind(wine_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Variant::from).collect())
}

/// Insert a wine and its variants atomically
pub async fn create(pool: &SqlitePool, draft: &WineDraft) -> RepoResult<Wine> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO wine (name, origin, wine_type, description, category_id, available, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) RETURNING id",
    )
    .bind(&draft.name)
    .bind(draft.origin)
    .bind(draft.wine_type)
    .bind(&draft.description)
    .bind(draft.category_id)
    .bind(draft.available)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    insert_variants(&mut tx, id, &draft.variants).await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create wine".into()))
}

/// Overwrite the wine row; with `replace_variants` the variant set is
/// deleted and re-inserted from the draft, otherwise left untouched
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    draft: &WineDraft,
    replace_variants: bool,
) -> RepoResult<Wine> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE wine SET name = ?1, origin = ?2, wine_type = ?3, description = ?4, category_id = ?5, \
         available = ?6, updated_at = ?7 WHERE id = ?8",
    )
    .bind(&draft.name)
    .bind(draft.origin)
    .bind(draft.wine_type)
    .bind(&draft.description)
    .bind(draft.category_id)
    .bind(draft.available)
    .bind(now_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Wine {id} not found")));
    }

    if replace_variants {
        sqlx::query("DELETE FROM wine_variant WHERE wine_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_variants(&mut tx, id, &draft.variants).await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Wine {id} not found")))
}

async fn insert_variants(
    tx: &mut Transaction<'_, Sqlite>,
    wine_id: i64,
    variants: &[VariantDraft],
) -> RepoResult<()> {
    for (position, variant) in variants.iter().enumerate() {
        sqlx::query(
            "INSERT INTO wine_variant (wine_id, volume, container, price_cents, position) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(wine_id)
        .bind(variant.volume)
        .bind(variant.container)
        .bind(variant.price_cents)
        .bind(position as i64)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Delete a wine; its variants go with it (`ON DELETE CASCADE`)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM wine WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Wine {id} not found")));
    }
    Ok(true)
}

/// Number of variant rows, orphans included
pub async fn count_variants(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM wine_variant")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
