//! Repository trait for registrations.

use crate::domain::entities::Registration;
use crate::domain::query::{Page, PageRequest, RegistrationFilter};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registration persistence.
///
/// Registrations are always loaded together with their meetup.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRegistrationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Inserts a registration and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if the meetup has no id.
    /// Returns [`AppError::BusinessRule`] if the `(email, meetup)` pair is
    /// already registered (unique index violation).
    /// Returns [`AppError::Validation`] if the meetup does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, registration: Registration) -> Result<Registration, AppError>;

    /// Overwrites every field of the stored registration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::insert`], plus [`AppError::NotFound`] if no
    /// registration has that id.
    async fn update(&self, registration: Registration) -> Result<Registration, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Registration>, AppError>;

    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError>;

    /// Checks whether `email` is already registered for the meetup.
    async fn exists_by_email_and_meetup(
        &self,
        email: &str,
        meetup_id: i32,
    ) -> Result<bool, AppError>;

    /// Deletes a registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no registration has that id.
    async fn delete(&self, id: i32) -> Result<(), AppError>;

    /// Returns one page of registrations matching `filter`, ordered by id.
    async fn find(
        &self,
        filter: RegistrationFilter,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError>;

    async fn find_all(&self) -> Result<Vec<Registration>, AppError>;

    /// Returns one page of the registrations belonging to a meetup.
    async fn find_by_meetup(
        &self,
        meetup_id: i32,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
