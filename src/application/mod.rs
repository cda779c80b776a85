//! Application layer services implementing business logic.
//!
//! Services consume repository traits, enforce business rules and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::meetup_service::MeetupService`] - Meetup CRUD, search and listing
//! - [`services::registration_service::RegistrationService`] - Registrations with
//!   the one-per-email-per-meetup rule

pub mod services;
