//! Menu Entry Repository
//!
//! Food items and drinks share the `menu_entry` table; every query is
//! scoped to one [`MenuSection`].

use super::{RepoError, RepoResult};
use shared::models::{MenuEntry, MenuSection};
use shared::util::{cents_to_price, now_millis};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, price_cents, category_id, available, sort_order";

#[derive(Debug, sqlx::FromRow)]
struct MenuEntryRow {
    id: i64,
    name: String,
    description: Option<String>,
    price_cents: i64,
    category_id: Option<i64>,
    available: bool,
    sort_order: Option<i32>,
}

impl From<MenuEntryRow> for MenuEntry {
    fn from(row: MenuEntryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: cents_to_price(row.price_cents),
            category_id: row.category_id,
            available: row.available,
            sort_order: row.sort_order,
        }
    }
}

/// Validated entry for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntryDraft {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub category_id: Option<i64>,
    pub available: bool,
    pub sort_order: Option<i32>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuEntryPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub category_id: Option<i64>,
    pub available: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Entries of a section; explicit sort order first, then insertion order
pub async fn find_all(pool: &SqlitePool, section: MenuSection) -> RepoResult<Vec<MenuEntry>> {
    let rows = sqlx::query_as::<_, MenuEntryRow>(&format!(
        "SELECT {COLUMNS} FROM menu_entry WHERE section = ? ORDER BY sort_order IS NULL, sort_order, id"
    ))
    .bind(section)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(MenuEntry::from).collect())
}

pub async fn find_by_id(
    pool: &SqlitePool,
    section: MenuSection,
    id: i64,
) -> RepoResult<Option<MenuEntry>> {
    let row = sqlx::query_as::<_, MenuEntryRow>(&format!(
        "SELECT {COLUMNS} FROM menu_entry WHERE section = ? AND id = ?"
    ))
    .bind(section)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(MenuEntry::from))
}

pub async fn create(
    pool: &SqlitePool,
    section: MenuSection,
    draft: &MenuEntryDraft,
) -> RepoResult<MenuEntry> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_entry (section, name, description, price_cents, category_id, available, sort_order, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) RETURNING id",
    )
    .bind(section)
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.price_cents)
    .bind(draft.category_id)
    .bind(draft.available)
    .bind(draft.sort_order)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, section, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to create {}", section.label())))
}

pub async fn update(
    pool: &SqlitePool,
    section: MenuSection,
    id: i64,
    patch: &MenuEntryPatch,
) -> RepoResult<MenuEntry> {
    let rows = sqlx::query(
        "UPDATE menu_entry SET name = COALESCE(?1, name), \
         description = CASE WHEN ?2 THEN ?3 ELSE description END, \
         price_cents = COALESCE(?4, price_cents), category_id = COALESCE(?5, category_id), \
         available = COALESCE(?6, available), sort_order = COALESCE(?7, sort_order), updated_at = ?8 \
         WHERE id = ?9 AND section = ?10",
    )
    .bind(&patch.name)
    .bind(patch.description.is_some())
    .bind(patch.description.as_ref().and_then(|d| d.as_deref()))
    .bind(patch.price_cents)
    .bind(patch.category_id)
    .bind(patch.available)
    .bind(patch.sort_order)
    .bind(now_millis())
    .bind(id)
    .bind(section)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("{} {id} not found", section.label())));
    }
    find_by_id(pool, section, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("{} {id} not found", section.label())))
}

pub async fn delete(pool: &SqlitePool, section: MenuSection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_entry WHERE id = ? AND section = ?")
        .bind(id)
        .bind(section)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("{} {id} not found", section.label())));
    }
    Ok(true)
}
