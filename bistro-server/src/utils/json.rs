//! JSON body extractor
//!
//! Same as `axum::Json`, but rejections (malformed JSON, unknown enum values,
//! wrong content type) are returned in the `AppError` envelope with a 400.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use shared::error::{AppError, ErrorCode};

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let detail = rejection.body_text();
    match rejection {
        JsonRejection::JsonDataError(_) => AppError::validation(detail),
        JsonRejection::JsonSyntaxError(_) => AppError::with_message(ErrorCode::InvalidFormat, detail),
        _ => AppError::invalid_request(detail),
    }
}
