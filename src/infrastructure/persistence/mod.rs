//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` rows.
//!
//! # Repositories
//!
//! - [`PgMeetupRepository`] - Meetup storage and example-matching search
//! - [`PgRegistrationRepository`] - Registration storage, uniqueness and per-meetup listing

pub mod pg_meetup_repository;
pub mod pg_registration_repository;

pub use pg_meetup_repository::PgMeetupRepository;
pub use pg_registration_repository::PgRegistrationRepository;
