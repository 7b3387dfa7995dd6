//! Reservation admission check against the stored configuration

use shared::error::AppResult;
use shared::reservation::{Admission, ReservationRequest, check_request};
use sqlx::SqlitePool;

use crate::services::settings;

pub async fn check(
    pool: &SqlitePool,
    default_capacity: u32,
    request: &ReservationRequest,
) -> AppResult<Admission> {
    let config = settings::get_configuration(pool, default_capacity).await?;
    let admission = check_request(&config, request);
    tracing::debug!(
        date = %request.date,
        accepted = admission.accepted,
        rejections = admission.rejections.len(),
        "Reservation checked"
    );
    Ok(admission)
}
