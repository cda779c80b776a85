//! Domain entity representing a meetup event.

/// A meetup event, the "one" side of the meetup/registration relation.
///
/// `id` is `None` until the meetup has been persisted. `meetup_date` is a
/// free-form string and is not interpreted as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meetup {
    pub id: Option<i32>,
    pub event: String,
    pub description: Option<String>,
    pub organizer: String,
    pub meetup_date: String,
    pub address: Option<String>,
}

impl Meetup {
    /// Creates an unsaved meetup.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let meetup = Meetup::new(
    ///     "Womakerscode Dados".to_string(),
    ///     None,
    ///     "organizadora".to_string(),
    ///     "10/10/2021".to_string(),
    ///     Some("sao paulo".to_string()),
    /// );
    /// assert!(meetup.id.is_none());
    /// ```
    pub fn new(
        event: String,
        description: Option<String>,
        organizer: String,
        meetup_date: String,
        address: Option<String>,
    ) -> Self {
        Self {
            id: None,
            event,
            description,
            organizer,
            meetup_date,
            address,
        }
    }

    /// Returns the same meetup bound to a persisted id.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}
