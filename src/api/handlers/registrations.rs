//! Handlers for registration endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::PageResponse;
use crate::api::dto::registration::{
    MeetupRegistrationsParams, RegistrationDto, RegistrationFindParams, RegistrationRequest,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::entities::{Meetup, Registration};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the meetup referenced by a registration body.
///
/// An absent or unknown meetup id is a client error (400), not a 404: the
/// resource being addressed is the registration.
async fn resolve_meetup(
    state: &AppState,
    payload: &RegistrationRequest,
) -> Result<Meetup, AppError> {
    let meetup_id = payload.meetup_id().ok_or_else(|| {
        AppError::bad_request("meetup id must be provided", json!({"field": "meetup.id"}))
    })?;

    state
        .meetup_service
        .get_meetup_by_id(meetup_id)
        .await?
        .ok_or_else(|| {
            AppError::bad_request("meetup id doesn't exist", json!({"meetup_id": meetup_id}))
        })
}

fn registration_not_found(id: i32) -> AppError {
    AppError::not_found("registration id doesn't exist", json!({"id": id}))
}

async fn load_registration(state: &AppState, id: i32) -> Result<Registration, AppError> {
    state
        .registration_service
        .get_registration_by_id(id)
        .await?
        .ok_or_else(|| registration_not_found(id))
}

/// Registers a person for a meetup.
///
/// # Endpoint
///
/// `POST /api/registration`
///
/// # Request Body
///
/// ```json
/// {
///   "personName": "Mariela Fernandez",
///   "email": "email@gmail.com",
///   "dateOfRegistration": "01/04/2022",
///   "registered": true,
///   "meetup": { "id": 11 }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if a required field or `meetup.id` is missing, or a field has
/// the wrong type.
/// Returns 400 if the meetup does not exist.
/// Returns 400 `{"errors": ["Registration already created"]}` if the email is
/// already registered for the meetup.
pub async fn create_registration_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationDto>), AppError> {
    payload.validate()?;

    let meetup = resolve_meetup(&state, &payload).await?;
    let registration = state
        .registration_service
        .save(payload.into_registration(meetup))
        .await?;

    Ok((StatusCode::CREATED, Json(registration.into())))
}

/// Fetches one registration.
///
/// # Endpoint
///
/// `GET /api/registration/{id}`
///
/// # Errors
///
/// Returns 404 if the registration does not exist.
pub async fn get_registration_handler(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<RegistrationDto>, AppError> {
    let registration = load_registration(&state, id).await?;
    Ok(Json(registration.into()))
}

/// Replaces the fields of a registration.
///
/// # Endpoint
///
/// `PUT /api/registration/{id}`
///
/// The referenced meetup is resolved before the registration is loaded, so an
/// unknown meetup id never mutates anything.
///
/// # Errors
///
/// Returns 400 if required fields are missing or the meetup does not exist.
/// Returns 400 if the new `(email, meetup)` pair is already registered.
/// Returns 404 if the registration does not exist.
pub async fn update_registration_handler(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegistrationRequest>,
) -> Result<Json<RegistrationDto>, AppError> {
    payload.validate()?;

    let meetup = resolve_meetup(&state, &payload).await?;
    if !state.registration_service.exists(id).await? {
        return Err(registration_not_found(id));
    }

    let updated = state
        .registration_service
        .update(payload.into_registration(meetup).with_id(id))
        .await?;

    Ok(Json(updated.into()))
}

/// Deletes a registration.
///
/// # Endpoint
///
/// `DELETE /api/registration/{id}`
///
/// # Errors
///
/// Returns 404 if the registration does not exist.
pub async fn delete_registration_handler(
    ApiPath(id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let registration = load_registration(&state, id).await?;
    state.registration_service.delete(&registration).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Searches registrations by example.
///
/// # Endpoint
///
/// `GET /api/registration/find`
///
/// # Query Parameters
///
/// - `personName`, `email`, `dateOfRegistration` (optional): case-insensitive substring match
/// - `registered`, `meetupId` (optional): exact match
/// - `page`, `size` (optional): paging (defaults 0 and 20)
pub async fn find_registrations_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RegistrationFindParams>,
) -> Result<Json<PageResponse<RegistrationDto>>, AppError> {
    let page = params.page.to_page_request()?;

    let result = state
        .registration_service
        .find(params.to_filter(), page)
        .await?;

    Ok(Json(result.into()))
}

/// Lists every registration without paging.
///
/// # Endpoint
///
/// `GET /api/registration`
pub async fn list_registrations_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegistrationDto>>, AppError> {
    Ok(Json(state.registration_service.get_all().await?))
}

/// Lists the registrations of one meetup.
///
/// # Endpoint
///
/// `GET /api/registration/meetup-registrations?meetupId={id}`
///
/// # Errors
///
/// Returns 404 if the meetup does not exist.
pub async fn meetup_registrations_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<MeetupRegistrationsParams>,
) -> Result<Json<PageResponse<RegistrationDto>>, AppError> {
    let page = params.page.to_page_request()?;

    let meetup = state
        .meetup_service
        .get_meetup_by_id(params.meetup_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("meetup id doesn't exist", json!({"id": params.meetup_id}))
        })?;

    let result = state
        .registration_service
        .get_registrations_by_meetup(&meetup, page)
        .await?;

    Ok(Json(result.into()))
}
