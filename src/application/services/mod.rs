//! Business logic services for the application layer.

pub mod meetup_service;
pub mod registration_service;

pub use meetup_service::MeetupService;
pub use registration_service::RegistrationService;
