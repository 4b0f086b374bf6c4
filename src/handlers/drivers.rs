use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::{PgPool, QueryBuilder};

use crate::handlers::{parse_id, required_fields};
use crate::models::{CreateDriver, Driver, UpdateDriver};
use crate::query::{self, ListParams, Page, Resource};
use crate::utils::error::AppError;

pub async fn list_drivers(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Driver>>, AppError> {
    let page = query::fetch_page::<Driver>(&pool, &params).await?;
    Ok(Json(page))
}

pub async fn get_driver(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    let id = parse_id(&id, Driver::NAME)?;
    let driver = query::find_by_id::<Driver>(&pool, id).await?;
    Ok(Json(driver))
}

pub async fn create_driver(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateDriver>,
) -> Result<impl IntoResponse, AppError> {
    let (name, phone, email) = required_fields(payload.name, payload.phone, payload.email)?;

    let sql = format!(
        "INSERT INTO drivers (name, phone, email, city, license, aadhar, pan, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
        Driver::COLUMNS
    );
    let driver = sqlx::query_as::<_, Driver>(&sql)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(payload.city)
        .bind(payload.license)
        .bind(payload.aadhar)
        .bind(payload.pan)
        .bind(payload.status)
        .fetch_one(&pool)
        .await?;

    Ok((StatusCode::CREATED, Json(driver)))
}

pub async fn update_driver(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateDriver>,
) -> Result<Json<Driver>, AppError> {
    let id = parse_id(&id, Driver::NAME)?;

    // updated_at refreshes on every mutation, even an empty payload
    let mut qb = QueryBuilder::new("UPDATE drivers SET updated_at = now()");
    if let Some(name) = payload.name {
        qb.push(", name = ").push_bind(name);
    }
    if let Some(phone) = payload.phone {
        qb.push(", phone = ").push_bind(phone);
    }
    if let Some(email) = payload.email {
        qb.push(", email = ").push_bind(email);
    }
    if let Some(city) = payload.city {
        qb.push(", city = ").push_bind(city);
    }
    if let Some(license) = payload.license {
        qb.push(", license = ").push_bind(license);
    }
    if let Some(aadhar) = payload.aadhar {
        qb.push(", aadhar = ").push_bind(aadhar);
    }
    if let Some(pan) = payload.pan {
        qb.push(", pan = ").push_bind(pan);
    }
    if let Some(status) = payload.status {
        qb.push(", status = ").push_bind(status);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(format!(" RETURNING {}", Driver::COLUMNS));

    // A store-side rejection of the data shape reports as NotFound, the
    // same as an unknown id
    let updated = qb
        .build_query_as::<Driver>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(_) => {
                AppError::NotFound("Driver not found or invalid data".to_string())
            }
            other => AppError::Database(other),
        })?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Driver not found or invalid data".to_string()))
}

pub async fn delete_driver(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Driver::NAME)?;
    query::delete_by_id::<Driver>(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
