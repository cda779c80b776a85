//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{MeetupService, RegistrationService};
use crate::infrastructure::persistence::{PgMeetupRepository, PgRegistrationRepository};

#[derive(Clone)]
pub struct AppState {
    pub meetup_service: Arc<MeetupService<PgMeetupRepository>>,
    pub registration_service: Arc<RegistrationService<PgRegistrationRepository>>,
    pub pool: Arc<PgPool>,
}

impl AppState {
    /// Wires repositories and services over a single connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        let meetup_repository = Arc::new(PgMeetupRepository::new(pool.clone()));
        let registration_repository = Arc::new(PgRegistrationRepository::new(pool.clone()));

        Self {
            meetup_service: Arc::new(MeetupService::new(meetup_repository)),
            registration_service: Arc::new(RegistrationService::new(registration_repository)),
            pool,
        }
    }
}
