//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Meetup`] - An event people can sign up for
//! - [`Registration`] - A sign-up bound to exactly one meetup
//!
//! An entity whose `id` is `None` has not been persisted yet.

pub mod meetup;
pub mod registration;

pub use meetup::Meetup;
pub use registration::Registration;
