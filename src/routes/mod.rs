use axum::routing::get;
use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{drivers, health_check, users};

pub fn create_routes(pool: PgPool) -> Router {
    Router::new()
        .nest("/api/drivers", driver_routes())
        .nest("/api/users", user_routes())
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(pool)
}

fn driver_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(drivers::list_drivers).post(drivers::create_driver))
        .route(
            "/:id",
            get(drivers::get_driver)
                .put(drivers::update_driver)
                .delete(drivers::delete_driver),
        )
}

fn user_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
