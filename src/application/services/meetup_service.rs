//! Meetup management service.

use crate::domain::entities::Meetup;
use crate::domain::query::{MeetupFilter, Page, PageRequest};
use crate::domain::repositories::MeetupRepository;
use crate::error::AppError;
use std::sync::Arc;

/// Service for creating, querying and mutating meetups.
///
/// Update and delete refuse meetups that have not been persisted (no id).
pub struct MeetupService<R: MeetupRepository> {
    repository: Arc<R>,
}

impl<R: MeetupRepository> MeetupService<R> {
    /// Creates a new meetup service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persists a new meetup and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn save(&self, meetup: Meetup) -> Result<Meetup, AppError> {
        let saved = self.repository.insert(meetup).await?;
        tracing::info!(meetup_id = ?saved.id, event = %saved.event, "Meetup created");
        Ok(saved)
    }

    pub async fn get_meetup_by_id(&self, id: i32) -> Result<Option<Meetup>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        self.repository.exists_by_id(id).await
    }

    /// Writes every field of `meetup` back to storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if `meetup.id` is `None`.
    /// Returns [`AppError::NotFound`] if the meetup no longer exists.
    pub async fn update(&self, meetup: Meetup) -> Result<Meetup, AppError> {
        if meetup.id.is_none() {
            return Err(AppError::invalid_argument("Meetup id cannot be null"));
        }

        self.repository.update(meetup).await
    }

    /// Removes a meetup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if `meetup.id` is `None`; the
    /// repository is not called in that case.
    /// Returns [`AppError::NotFound`] if the meetup does not exist.
    pub async fn delete(&self, meetup: &Meetup) -> Result<(), AppError> {
        let Some(id) = meetup.id else {
            return Err(AppError::invalid_argument("Meetup id cannot be null"));
        };

        self.repository.delete(id).await?;
        tracing::info!(meetup_id = id, "Meetup deleted");
        Ok(())
    }

    /// Returns one page of meetups whose non-empty filter fields all match
    /// case-insensitively as substrings.
    pub async fn find(
        &self,
        filter: MeetupFilter,
        page: PageRequest,
    ) -> Result<Page<Meetup>, AppError> {
        tracing::debug!(
            unfiltered = filter.is_empty(),
            page = page.page,
            size = page.size,
            "Searching meetups"
        );
        self.repository.find(filter, page).await
    }

    /// Returns every meetup converted into `T`, e.g. a transport DTO.
    pub async fn get_all<T: From<Meetup>>(&self) -> Result<Vec<T>, AppError> {
        let meetups = self.repository.find_all().await?;
        Ok(meetups.into_iter().map(T::from).collect())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
