use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use super::db_conn;
use crate::{
    AppState,
    db::models::{api::ApiResponse, auth::MaybeAuthUser},
    services::{ProfilesService, context::RequestContext},
    validation::{ApiJson, ApiPath},
};

pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    MaybeAuthUser(viewer): MaybeAuthUser,
) -> impl IntoResponse {
    let mut conn = db_conn!(state);
    let ctx = viewer.as_ref().map(RequestContext::from);

    match ProfilesService::portfolio(&mut conn, ctx.as_ref(), user_id) {
        Ok(portfolio) => {
            let response = ApiResponse::success(portfolio, "Portfolio retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Create, replace and delete handlers for one portfolio section.
macro_rules! section_handlers {
    ($module:ident, $service:ident, $input:ident, $label:literal) => {
        pub mod $module {
            use super::*;
            use crate::db::models::auth::AuthUser;
            use crate::routes::db_conn;
            use crate::db::models::portfolio::$input;
            use crate::services::portfolio_service::$service;

            pub async fn create(
                State(state): State<Arc<AppState>>,
                auth_user: AuthUser,
                ApiJson(payload): ApiJson<$input>,
            ) -> impl IntoResponse {
                let mut conn = db_conn!(state);
                let ctx = RequestContext::from(&auth_user);

                match $service::create(&mut conn, &ctx, &payload) {
                    Ok(entry) => {
                        let message = concat!($label, " created successfully");
                        let response = ApiResponse::created(entry, message);
                        (StatusCode::CREATED, Json(response)).into_response()
                    }
                    Err(err) => err.into_response(),
                }
            }

            pub async fn replace(
                State(state): State<Arc<AppState>>,
                ApiPath(entry_id): ApiPath<Uuid>,
                auth_user: AuthUser,
                ApiJson(payload): ApiJson<$input>,
            ) -> impl IntoResponse {
                let mut conn = db_conn!(state);
                let ctx = RequestContext::from(&auth_user);

                match $service::replace(&mut conn, &ctx, entry_id, &payload) {
                    Ok(entry) => {
                        let message = concat!($label, " updated successfully");
                        let response = ApiResponse::success(entry, message);
                        (StatusCode::OK, Json(response)).into_response()
                    }
                    Err(err) => err.into_response(),
                }
            }

            pub async fn delete(
                State(state): State<Arc<AppState>>,
                ApiPath(entry_id): ApiPath<Uuid>,
                auth_user: AuthUser,
            ) -> impl IntoResponse {
                let mut conn = db_conn!(state);
                let ctx = RequestContext::from(&auth_user);

                match $service::delete(&mut conn, &ctx, entry_id) {
                    Ok(()) => {
                        let message = concat!($label, " deleted successfully");
                        let response = ApiResponse::<()>::ok(message);
                        (StatusCode::OK, Json(response)).into_response()
                    }
                    Err(err) => err.into_response(),
                }
            }
        }
    };
}

section_handlers!(educations, EducationsService, EducationInput, "Education");
section_handlers!(awards, AwardsService, AwardInput, "Award");
section_handlers!(experiences, ExperiencesService, ExperienceInput, "Experience");
section_handlers!(skills, SkillsService, SkillInput, "Skill");
section_handlers!(languages, LanguagesService, LanguageInput, "Language");
