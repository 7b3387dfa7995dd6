//! Reservation API Handlers

use axum::{Json, extract::State};
use shared::error::AppResult;
use shared::reservation::{Admission, ReservationRequest};

use crate::core::ServerState;
use crate::services::reservation;
use crate::utils::AppJson;

/// POST /api/reservations/check
///
/// Always 200 for a well-formed request; a refusal is `accepted: false`.
pub async fn check(
    State(state): State<ServerState>,
    AppJson(request): AppJson<ReservationRequest>,
) -> AppResult<Json<Admission>> {
    let admission =
        reservation::check(&state.pool, state.config.default_capacity, &request).await?;
    Ok(Json(admission))
}
