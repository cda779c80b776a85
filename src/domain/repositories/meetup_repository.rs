//! Repository trait for meetups.

use crate::domain::entities::Meetup;
use crate::domain::query::{MeetupFilter, Page, PageRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for meetup persistence.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMeetupRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_meetup.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetupRepository: Send + Sync {
    /// Inserts a meetup and returns it with its generated id.
    ///
    /// Any id already set on `meetup` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, meetup: Meetup) -> Result<Meetup, AppError>;

    /// Overwrites every field of the stored meetup with the values in `meetup`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if `meetup.id` is `None`.
    /// Returns [`AppError::NotFound`] if no meetup has that id.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, meetup: Meetup) -> Result<Meetup, AppError>;

    /// Finds a meetup by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i32) -> Result<Option<Meetup>, AppError>;

    /// Checks whether a meetup with this id exists.
    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError>;

    /// Deletes a meetup (and, through the foreign key, its registrations).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no meetup has that id.
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Returns one page of meetups matching `filter`, ordered by id.
    async fn find(&self, filter: MeetupFilter, page: PageRequest)
    -> Result<Page<Meetup>, AppError>;

    /// Returns every meetup, ordered by id.
    async fn find_all(&self) -> Result<Vec<Meetup>, AppError>;

    /// Counts all meetups.
    async fn count(&self) -> Result<i64, AppError>;
}
