//! API route configuration.

use crate::api::handlers::{
    create_meetup_handler, create_registration_handler, delete_meetup_handler,
    delete_registration_handler, find_meetups_handler, find_registrations_handler,
    get_meetup_handler, get_registration_handler, list_meetups_handler,
    list_registrations_handler, meetup_registrations_handler, update_meetup_handler,
    update_registration_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /meetup`                            - List all meetups
/// - `POST   /meetup`                            - Create a meetup
/// - `GET    /meetup/find`                       - Search meetups (paginated)
/// - `GET    /meetup/{id}`                       - Fetch a meetup
/// - `PUT    /meetup/{id}`                       - Update a meetup
/// - `DELETE /meetup/{id}`                       - Delete a meetup and its registrations
/// - `GET    /registration`                      - List all registrations
/// - `POST   /registration`                      - Register for a meetup
/// - `GET    /registration/find`                 - Search registrations (paginated)
/// - `GET    /registration/meetup-registrations` - Registrations of one meetup (paginated)
/// - `GET    /registration/{id}`                 - Fetch a registration
/// - `PUT    /registration/{id}`                 - Update a registration
/// - `DELETE /registration/{id}`                 - Delete a registration
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/meetup",
            get(list_meetups_handler).post(create_meetup_handler),
        )
        .route("/meetup/find", get(find_meetups_handler))
        .route(
            "/meetup/{id}",
            get(get_meetup_handler)
                .put(update_meetup_handler)
                .delete(delete_meetup_handler),
        )
        .route(
            "/registration",
            get(list_registrations_handler).post(create_registration_handler),
        )
        .route("/registration/find", get(find_registrations_handler))
        .route(
            "/registration/meetup-registrations",
            get(meetup_registrations_handler),
        )
        .route(
            "/registration/{id}",
            get(get_registration_handler)
                .put(update_registration_handler)
                .delete(delete_registration_handler),
        )
}
