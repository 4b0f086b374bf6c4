use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::{PgPool, QueryBuilder};

use crate::handlers::{parse_id, required_fields};
use crate::models::{CreateUser, UpdateUser, User};
use crate::query::{self, ListParams, Page, Resource};
use crate::utils::error::AppError;

pub async fn list_users(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<User>>, AppError> {
    let page = query::fetch_page::<User>(&pool, &params).await?;
    Ok(Json(page))
}

pub async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id, User::NAME)?;
    let user = query::find_by_id::<User>(&pool, id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let (name, phone, email) = required_fields(payload.name, payload.phone, payload.email)?;

    let sql = format!(
        "INSERT INTO users (name, phone, email, city, status) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        User::COLUMNS
    );
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(payload.city)
        .bind(payload.status)
        .fetch_one(&pool)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id, User::NAME)?;

    // updated_at refreshes on every mutation, even an empty payload
    let mut qb = QueryBuilder::new("UPDATE users SET updated_at = now()");
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
    if let Some(status) = payload.status {
        qb.push(", status = ").push_bind(status);
    }
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(format!(" RETURNING {}", User::COLUMNS));

    // A store-side rejection of the data shape reports as NotFound, the
    // same as an unknown id
    let updated = qb
        .build_query_as::<User>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(_) => {
                AppError::NotFound("User not found or invalid data".to_string())
            }
            other => AppError::Database(other),
        })?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found or invalid data".to_string()))
}

pub async fn delete_user(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, User::NAME)?;
    query::delete_by_id::<User>(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
