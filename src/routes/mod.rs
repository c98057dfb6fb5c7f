/// Takes a pooled connection or returns the 500 envelope from the handler.
macro_rules! db_conn {
    ($state:expr) => {
        match $state.db.get() {
            Ok(conn) => conn,
            Err(err) => {
                tracing::error!("Failed to get DB connection: {}", err);
                let response = $crate::db::models::api::ApiResponse::<()>::internal_error(
                    "Database connection failed",
                );
                return (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(response),
                )
                    .into_response();
            }
        }
    };
}
pub(crate) use db_conn;

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod news;
pub mod papers;
pub mod portfolio;
pub mod profiles;
pub mod projects;
pub mod resources;
pub mod users;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Every route lives under `/api`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        // auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // users & profiles
        .route("/users", get(users::list_users))
        .route("/users/:user_id", axum::routing::patch(users::update_user))
        .route("/profiles", get(profiles::list_profiles))
        .route("/profiles/me", put(profiles::update_my_profile))
        .route("/profiles/:user_id", get(profiles::get_profile))
        // publications
        .route("/papers", get(papers::list_papers).post(papers::create_paper))
        .route(
            "/papers/:paper_id",
            get(papers::get_paper)
                .put(papers::replace_paper)
                .patch(papers::patch_paper)
                .delete(papers::delete_paper),
        )
        // projects
        .route("/projects", get(projects::list_projects).post(projects::create_project))
        .route("/projects/slug/:slug", get(projects::get_project_by_slug))
        .route(
            "/projects/:project_id",
            get(projects::get_project)
                .put(projects::replace_project)
                .patch(projects::patch_project)
                .delete(projects::delete_project),
        )
        // news
        .route("/news", get(news::list_posts).post(news::create_post))
        .route("/news/slug/:slug", get(news::get_post_by_slug))
        .route(
            "/news/:post_id",
            get(news::get_post)
                .put(news::replace_post)
                .patch(news::patch_post)
                .delete(news::delete_post),
        )
        // announcements
        .route(
            "/announcements",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route(
            "/announcements/:announcement_id",
            put(announcements::replace_announcement).delete(announcements::delete_announcement),
        )
        // bookings are registered before `/resources/:resource_id`
        .route(
            "/resources/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/resources/bookings/:booking_id",
            get(bookings::get_booking).patch(bookings::update_booking_status),
        )
        .route(
            "/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route(
            "/resources/:resource_id",
            get(resources::get_resource)
                .put(resources::replace_resource)
                .delete(resources::delete_resource),
        )
        .route(
            "/resources/:resource_id/availability",
            get(resources::get_availability),
        )
        // portfolio
        .route("/portfolio/:user_id", get(portfolio::get_portfolio))
        .route("/portfolio/educations", post(portfolio::educations::create))
        .route(
            "/portfolio/educations/:entry_id",
            put(portfolio::educations::replace).delete(portfolio::educations::delete),
        )
        .route("/portfolio/awards", post(portfolio::awards::create))
        .route(
            "/portfolio/awards/:entry_id",
            put(portfolio::awards::replace).delete(portfolio::awards::delete),
        )
        .route("/portfolio/experiences", post(portfolio::experiences::create))
        .route(
            "/portfolio/experiences/:entry_id",
            put(portfolio::experiences::replace).delete(portfolio::experiences::delete),
        )
        .route("/portfolio/skills", post(portfolio::skills::create))
        .route(
            "/portfolio/skills/:entry_id",
            put(portfolio::skills::replace).delete(portfolio::skills::delete),
        )
        .route("/portfolio/languages", post(portfolio::languages::create))
        .route(
            "/portfolio/languages/:entry_id",
            put(portfolio::languages::replace).delete(portfolio::languages::delete),
        )
        // admin
        .route("/admin/stats", get(admin::dashboard_stats))
        .with_state(state);

    Router::new().nest("/api", api).fallback(fallback)
}

async fn fallback() -> impl axum::response::IntoResponse {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(ApiResponse::<()>::not_found("Route not found")),
    )
}
