use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::utils::error::AppError;

pub mod drivers;
pub mod users;

#[derive(Serialize)]
pub struct HealthPayload {
    ok: bool,
}

pub async fn health_check() -> Json<HealthPayload> {
    Json(HealthPayload { ok: true })
}

/// Parses a path id. A malformed id cannot name any record, so it reports
/// as NotFound rather than a bare extractor rejection, keeping the error
/// body `{error}`-shaped.
pub(crate) fn parse_id(raw: &str, resource: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} not found", resource)))
}

/// Presence check shared by both create endpoints. Missing or blank
/// name/phone/email is a validation error; no further format checks.
pub(crate) fn required_fields(
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
) -> Result<(String, String, String), AppError> {
    match (name, phone, email) {
        (Some(name), Some(phone), Some(email))
            if !name.trim().is_empty()
                && !phone.trim().is_empty()
                && !email.trim().is_empty() =>
        {
            Ok((name, phone, email))
        }
        _ => Err(AppError::Validation(
            "name, phone and email are required".to_string(),
        )),
    }
}
