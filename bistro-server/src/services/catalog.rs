//! Wine catalog service

use std::collections::HashSet;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{VariantInput, Wine, WineCreate, WineUpdate};
use shared::util::price_to_cents;
use sqlx::SqlitePool;

use crate::db::repository::wine::{self, VariantDraft, WineDraft};
use crate::db::repository::{RepoError, category};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, normalize_optional_text, validate_optional_text,
    validate_required_text,
};

pub async fn list_wines(pool: &SqlitePool) -> AppResult<Vec<Wine>> {
    Ok(wine::find_all(pool).await?)
}

pub async fn get_wine_by_name(pool: &SqlitePool, name: &str) -> AppResult<Wine> {
    wine::find_by_name(pool, name)
        .await?
        .ok_or_else(|| wine_not_found(name))
}

pub async fn create_wine(pool: &SqlitePool, data: WineCreate) -> AppResult<Wine> {
    let draft = validate_wine(data)?;
    ensure_category(pool, draft.category_id).await?;

    let created = wine::create(pool, &draft)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;
    tracing::info!(wine_id = created.id, name = %created.name, variants = created.variants.len(), "Wine created");
    Ok(created)
}

/// Desired-state replace: every field and the whole variant set
pub async fn replace_wine(pool: &SqlitePool, id: i64, data: WineCreate) -> AppResult<Wine> {
    let draft = validate_wine(data)?;
    ensure_category(pool, draft.category_id).await?;

    let updated = wine::update(pool, id, &draft, true)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;
    tracing::info!(wine_id = id, variants = updated.variants.len(), "Wine replaced");
    Ok(updated)
}

/// Update only the supplied fields; variants are kept unless supplied
///
/// An empty `description` clears it. `categoryId` can be changed but not
/// cleared through a patch.
pub async fn patch_wine(pool: &SqlitePool, id: i64, data: WineUpdate) -> AppResult<Wine> {
    let existing = wine::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::WineNotFound).with_detail("id", id))?;

    let replace_variants = data.variants.is_some();
    let merged = WineCreate {
        name: data.name.unwrap_or(existing.name),
        origin: Some(data.origin.unwrap_or(existing.origin)),
        wine_type: Some(data.wine_type.unwrap_or(existing.wine_type)),
        description: match data.description {
            Some(description) => Some(description),
            None => existing.description,
        },
        category_id: data.category_id.or(existing.category_id),
        available: Some(data.available.unwrap_or(existing.available)),
        variants: data
            .variants
            .unwrap_or_else(|| existing.variants.iter().map(VariantInput::from).collect()),
    };

    let draft = validate_wine(merged)?;
    ensure_category(pool, draft.category_id).await?;

    let updated = wine::update(pool, id, &draft, replace_variants)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;
    tracing::info!(wine_id = id, replace_variants, "Wine updated");
    Ok(updated)
}

pub async fn delete_wine(pool: &SqlitePool, id: i64) -> AppResult<()> {
    wine::delete(pool, id).await.map_err(|e| match e {
        RepoError::NotFound(_) => AppError::new(ErrorCode::WineNotFound).with_detail("id", id),
        other => other.into(),
    })?;
    tracing::info!(wine_id = id, "Wine deleted");
    Ok(())
}

/// Check a wine payload and turn it into a storable draft
pub fn validate_wine(data: WineCreate) -> AppResult<WineDraft> {
    let name = data.name.trim().to_string();
    validate_required_text(&name, "name", MAX_NAME_LEN)?;

    let origin = data.origin.ok_or_else(|| AppError::required("origin"))?;
    let wine_type = data.wine_type.ok_or_else(|| AppError::required("type"))?;

    let description = normalize_optional_text(data.description);
    validate_optional_text(&description, "description", MAX_DESCRIPTION_LEN)?;

    Ok(WineDraft {
        name,
        origin,
        wine_type,
        description,
        category_id: data.category_id,
        available: data.available.unwrap_or(true),
        variants: validate_variants(&data.variants)?,
    })
}

fn validate_variants(variants: &[VariantInput]) -> AppResult<Vec<VariantDraft>> {
    let mut seen = HashSet::with_capacity(variants.len());
    variants
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let price_cents = price_to_cents(&v.price).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvalidPrice,
                    format!("Invalid price {}: must be >= 0 with at most two decimals", v.price),
                )
                .with_detail("field", format!("variants[{i}].price"))
            })?;

            if !seen.insert((v.volume, v.container)) {
                return Err(AppError::with_message(
                    ErrorCode::VariantDuplicate,
                    format!("Duplicate variant {} {}", v.volume, v.container),
                )
                .with_detail("field", format!("variants[{i}]")));
            }

            Ok(VariantDraft {
                volume: v.volume,
                container: v.container,
                price_cents,
            })
        })
        .collect()
}

/// Unknown category references are a client error, not a missing resource
pub(crate) async fn ensure_category(pool: &SqlitePool, category_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = category_id
        && !category::exists(pool, id).await?
    {
        return Err(AppError::validation(format!("Unknown category {id}"))
            .with_detail("field", "categoryId"));
    }
    Ok(())
}

fn wine_not_found(name: &str) -> AppError {
    AppError::with_message(ErrorCode::WineNotFound, format!("Wine '{name}' not found"))
        .with_detail("name", name)
}

fn map_write_error(err: RepoError, name: &str) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::WineNameExists,
            format!("A wine named '{name}' already exists"),
        )
        .with_detail("field", "name"),
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::WineNotFound, msg),
        other => other.into(),
    }
}
