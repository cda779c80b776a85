//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`MeetupRepository`] - Meetup CRUD and example-matching search
//! - [`RegistrationRepository`] - Registration CRUD, uniqueness lookup and per-meetup listing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod meetup_repository;
pub mod registration_repository;

pub use meetup_repository::MeetupRepository;
pub use registration_repository::RegistrationRepository;

#[cfg(test)]
pub use meetup_repository::MockMeetupRepository;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
