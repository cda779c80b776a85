//! Domain entity representing a sign-up for a meetup.

use super::Meetup;

/// A person's registration for exactly one [`Meetup`].
///
/// No two registrations may share the same `(email, meetup)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: Option<i32>,
    pub person_name: String,
    pub email: String,
    pub date_of_registration: String,
    pub registered: Option<bool>,
    pub meetup: Meetup,
}

impl Registration {
    /// Creates an unsaved registration for `meetup`.
    pub fn new(
        person_name: String,
        email: String,
        date_of_registration: String,
        registered: Option<bool>,
        meetup: Meetup,
    ) -> Self {
        Self {
            id: None,
            person_name,
            email,
            date_of_registration,
            registered,
            meetup,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Id of the meetup this registration belongs to, if that meetup is persisted.
    pub fn meetup_id(&self) -> Option<i32> {
        self.meetup.id
    }
}
