//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod health;
pub mod meetups;
pub mod registrations;

pub use health::health_handler;
pub use meetups::{
    create_meetup_handler, delete_meetup_handler, find_meetups_handler, get_meetup_handler,
    list_meetups_handler, update_meetup_handler,
};
pub use registrations::{
    create_registration_handler, delete_registration_handler, find_registrations_handler,
    get_registration_handler, list_registrations_handler, meetup_registrations_handler,
    update_registration_handler,
};
