use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::query::Resource;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: Option<String>,
    pub license: Option<String>,
    pub aadhar: Option<String>,
    pub pan: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource for Driver {
    const NAME: &'static str = "Driver";

    const TABLE: &'static str = "drivers";

    const COLUMNS: &'static str =
        "id, name, phone, email, city, license, aadhar, pan, status, created_at, updated_at";

    const SORTABLE: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("name", "name"),
        ("phone", "phone"),
        ("email", "email"),
        ("city", "city"),
        ("license", "license"),
        ("aadhar", "aadhar"),
        ("pan", "pan"),
        ("status", "status"),
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
    ];
}

/// Creation payload. Required fields are `Option` so a missing field
/// surfaces as a 400 validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateDriver {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub license: Option<String>,
    pub aadhar: Option<String>,
    pub pan: Option<String>,
    pub status: Option<String>,
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateDriver {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub license: Option<String>,
    pub aadhar: Option<String>,
    pub pan: Option<String>,
    pub status: Option<String>,
}
