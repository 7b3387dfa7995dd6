//! Menu items and drinks
//!
//! Both sections go through the same operations; the section only changes
//! which rows are visible and which not-found code is reported.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuEntry, MenuEntryCreate, MenuEntryUpdate, MenuSection};
use shared::util::price_to_cents;
use sqlx::SqlitePool;

use crate::db::repository::RepoError;
use crate::db::repository::menu_entry::{self, MenuEntryDraft, MenuEntryPatch};
use crate::services::catalog::ensure_category;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, normalize_optional_text, validate_optional_text,
    validate_required_text,
};

pub async fn list_entries(pool: &SqlitePool, section: MenuSection) -> AppResult<Vec<MenuEntry>> {
    Ok(menu_entry::find_all(pool, section).await?)
}

pub async fn create_entry(
    pool: &SqlitePool,
    section: MenuSection,
    data: MenuEntryCreate,
) -> AppResult<MenuEntry> {
    let name = data.name.trim().to_string();
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    let price = data.price.ok_or_else(|| AppError::required("price"))?;
    let price_cents = checked_cents(&price)?;

    let description = normalize_optional_text(data.description);
    validate_optional_text(&description, "description", MAX_DESCRIPTION_LEN)?;
    ensure_category(pool, data.category_id).await?;

    let draft = MenuEntryDraft {
        name,
        description,
        price_cents,
        category_id: data.category_id,
        available: data.available.unwrap_or(true),
        sort_order: data.sort_order,
    };
    let created = menu_entry::create(pool, section, &draft).await?;
    tracing::info!(section = ?section, id = created.id, name = %created.name, "Menu entry created");
    Ok(created)
}

/// Partial update: omitted fields keep their stored value, an empty
/// description clears it
pub async fn update_entry(
    pool: &SqlitePool,
    section: MenuSection,
    id: i64,
    data: MenuEntryUpdate,
) -> AppResult<MenuEntry> {
    let name = data.name.map(|n| n.trim().to_string());
    if let Some(name) = &name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let description = data.description.map(|d| normalize_optional_text(Some(d)));
    if let Some(description) = &description {
        validate_optional_text(description, "description", MAX_DESCRIPTION_LEN)?;
    }
    let price_cents = data.price.as_ref().map(checked_cents).transpose()?;
    ensure_category(pool, data.category_id).await?;

    let patch = MenuEntryPatch {
        name,
        description,
        price_cents,
        category_id: data.category_id,
        available: data.available,
        sort_order: data.sort_order,
    };
    let updated = menu_entry::update(pool, section, id, &patch)
        .await
        .map_err(|e| map_not_found(e, section, id))?;
    tracing::info!(section = ?section, id, "Menu entry updated");
    Ok(updated)
}

pub async fn delete_entry(pool: &SqlitePool, section: MenuSection, id: i64) -> AppResult<()> {
    menu_entry::delete(pool, section, id)
        .await
        .map_err(|e| map_not_found(e, section, id))?;
    tracing::info!(section = ?section, id, "Menu entry deleted");
    Ok(())
}

fn checked_cents(price: &Decimal) -> AppResult<i64> {
    price_to_cents(price).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("Invalid price {price}: must be >= 0 with at most two decimals"),
        )
        .with_detail("field", "price")
    })
}

fn map_not_found(err: RepoError, section: MenuSection, id: i64) -> AppError {
    match err {
        RepoError::NotFound(msg) => {
            let code = match section {
                MenuSection::Food => ErrorCode::MenuItemNotFound,
                MenuSection::Drink => ErrorCode::DrinkNotFound,
            };
            AppError::with_message(code, msg).with_detail("id", id)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_checked_cents() {
        assert_eq!(checked_cents(&Decimal::from_str("9.50").unwrap()).unwrap(), 950);
        let err = checked_cents(&Decimal::from_str("9.555").unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_not_found_code_follows_section() {
        let err = map_not_found(RepoError::NotFound("x".into()), MenuSection::Drink, 3);
        assert_eq!(err.code, ErrorCode::DrinkNotFound);
        let err = map_not_found(RepoError::NotFound("x".into()), MenuSection::Food, 3);
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
    }
}
