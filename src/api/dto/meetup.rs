//! DTOs for meetup endpoints.

use crate::api::dto::pagination::PageParams;
use crate::domain::entities::Meetup;
use crate::domain::query::MeetupFilter;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Meetup as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetupDto {
    pub id: Option<i32>,
    pub event: String,
    pub description: Option<String>,
    pub organizer: String,
    pub meetup_date: String,
    pub address: Option<String>,
}

impl From<Meetup> for MeetupDto {
    fn from(m: Meetup) -> Self {
        Self {
            id: m.id,
            event: m.event,
            description: m.description,
            organizer: m.organizer,
            meetup_date: m.meetup_date,
            address: m.address,
        }
    }
}

/// Body of `POST /api/meetup` and `PUT /api/meetup/{id}`.
///
/// Missing required fields deserialize as empty strings so that they are
/// reported by validation (400) rather than by the JSON extractor.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MeetupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "event must not be empty"))]
    pub event: String,

    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "organizer must not be empty"))]
    pub organizer: String,

    #[serde(default, alias = "date")]
    #[validate(length(min = 1, message = "meetupDate must not be empty"))]
    pub meetup_date: String,

    pub address: Option<String>,
}

impl MeetupRequest {
    /// Builds an unsaved meetup from the request.
    pub fn into_meetup(self) -> Meetup {
        Meetup::new(
            self.event,
            self.description,
            self.organizer,
            self.meetup_date,
            self.address,
        )
    }
}

/// Query parameters of `GET /api/meetup/find`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetupFindParams {
    pub event: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    #[serde(alias = "date")]
    pub meetup_date: Option<String>,
    pub address: Option<String>,

    #[serde(flatten)]
    pub page: PageParams,
}

impl MeetupFindParams {
    pub fn to_filter(&self) -> MeetupFilter {
        MeetupFilter {
            event: self.event.clone(),
            description: self.description.clone(),
            organizer: self.organizer.clone(),
            meetup_date: self.meetup_date.clone(),
            address: self.address.clone(),
        }
    }
}
