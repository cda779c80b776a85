//! DTOs for registration endpoints.

use crate::api::dto::meetup::MeetupDto;
use crate::api::dto::pagination::PageParams;
use crate::domain::entities::{Meetup, Registration};
use crate::domain::query::RegistrationFilter;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Registration as returned by the API, with its meetup embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    pub id: Option<i32>,
    pub person_name: String,
    pub email: String,
    pub date_of_registration: String,
    pub registered: Option<bool>,
    pub meetup: MeetupDto,
}

impl From<Registration> for RegistrationDto {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            person_name: r.person_name,
            email: r.email,
            date_of_registration: r.date_of_registration,
            registered: r.registered,
            meetup: r.meetup.into(),
        }
    }
}

/// Reference to an existing meetup inside a registration body.
///
/// Clients may send the full meetup object; only `id` is read.
#[derive(Debug, Default, Deserialize)]
pub struct MeetupRef {
    pub id: Option<i32>,
}

/// Body of `POST /api/registration` and `PUT /api/registration/{id}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "personName must not be empty"))]
    pub person_name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "dateOfRegistration must not be empty"))]
    pub date_of_registration: String,

    pub registered: Option<bool>,

    pub meetup: Option<MeetupRef>,
}

impl RegistrationRequest {
    /// Id of the referenced meetup, if the body carries one.
    pub fn meetup_id(&self) -> Option<i32> {
        self.meetup.as_ref().and_then(|m| m.id)
    }

    /// Builds an unsaved registration bound to `meetup`.
    pub fn into_registration(self, meetup: Meetup) -> Registration {
        Registration::new(
            self.person_name,
            self.email,
            self.date_of_registration,
            self.registered,
            meetup,
        )
    }
}

/// Query parameters of `GET /api/registration/find`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFindParams {
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_registration: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub registered: Option<bool>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub meetup_id: Option<i32>,

    #[serde(flatten)]
    pub page: PageParams,
}

impl RegistrationFindParams {
    pub fn to_filter(&self) -> RegistrationFilter {
        RegistrationFilter {
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            date_of_registration: self.date_of_registration.clone(),
            registered: self.registered,
            meetup_id: self.meetup_id,
        }
    }
}

/// Query parameters of `GET /api/registration/meetup-registrations`.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetupRegistrationsParams {
    #[serde_as(as = "DisplayFromStr")]
    pub meetup_id: i32,

    #[serde(flatten)]
    pub page: PageParams,
}
