//! Handlers for meetup endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::meetup::{MeetupDto, MeetupFindParams, MeetupRequest};
use crate::api::dto::pagination::PageResponse;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::entities::Meetup;
use crate::error::AppError;
use crate::state::AppState;

fn meetup_not_found(id: i32) -> AppError {
    AppError::not_found("meetup id doesn't exist", json!({"id": id}))
}

/// Loads a meetup or fails with 404.
async fn load_meetup(state: &AppState, id: i32) -> Result<Meetup, AppError> {
    state
        .meetup_service
        .get_meetup_by_id(id)
        .await?
        .ok_or_else(|| meetup_not_found(id))
}

/// Creates a meetup.
///
/// # Endpoint
///
/// `POST /api/meetup`
///
/// # Errors
///
/// Returns 400 if `event`, `organizer` or `meetupDate` is missing or empty,
/// or if the body is not valid JSON for a meetup.
pub async fn create_meetup_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MeetupRequest>,
) -> Result<(StatusCode, Json<MeetupDto>), AppError> {
    payload.validate()?;

    let meetup = state.meetup_service.save(payload.into_meetup()).await?;

    Ok((StatusCode::CREATED, Json(meetup.into())))
}

/// Fetches one meetup.
///
/// # Endpoint
///
/// `GET /api/meetup/{id}`
///
/// # Errors
///
/// Returns 404 if the meetup does not exist.
pub async fn get_meetup_handler(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<MeetupDto>, AppError> {
    let meetup = load_meetup(&state, id).await?;
    Ok(Json(meetup.into()))
}

/// Replaces the fields of a meetup.
///
/// # Endpoint
///
/// `PUT /api/meetup/{id}`
///
/// # Errors
///
/// Returns 400 if required fields are missing or mistyped.
/// Returns 404 if the meetup does not exist.
pub async fn update_meetup_handler(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MeetupRequest>,
) -> Result<Json<MeetupDto>, AppError> {
    payload.validate()?;

    if !state.meetup_service.exists(id).await? {
        return Err(meetup_not_found(id));
    }

    let updated = state
        .meetup_service
        .update(payload.into_meetup().with_id(id))
        .await?;

    Ok(Json(updated.into()))
}

/// Deletes a meetup together with its registrations.
///
/// # Endpoint
///
/// `DELETE /api/meetup/{id}`
///
/// # Errors
///
/// Returns 404 if the meetup does not exist.
pub async fn delete_meetup_handler(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let meetup = load_meetup(&state, id).await?;
    state.meetup_service.delete(&meetup).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Searches meetups by example.
///
/// # Endpoint
///
/// `GET /api/meetup/find`
///
/// # Query Parameters
///
/// - `event`, `description`, `organizer`, `meetupDate`, `address` (optional):
///   case-insensitive substring match; absent fields are ignored
/// - `page` (optional): 0-based page number (default: 0)
/// - `size` (optional): items per page (default: 20, max: 1000)
pub async fn find_meetups_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MeetupFindParams>,
) -> Result<Json<PageResponse<MeetupDto>>, AppError> {
    let page = params.page.to_page_request()?;

    let result = state
        .meetup_service
        .find(params.to_filter(), page)
        .await?;

    Ok(Json(result.into()))
}

/// Lists every meetup without paging.
///
/// # Endpoint
///
/// `GET /api/meetup`
pub async fn list_meetups_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MeetupDto>>, AppError> {
    Ok(Json(state.meetup_service.get_all().await?))
}
