//! Registration management service.

use crate::domain::entities::{Meetup, Registration};
use crate::domain::query::{Page, PageRequest, RegistrationFilter};
use crate::domain::repositories::RegistrationRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Service for meetup sign-ups.
///
/// Enforces one registration per `(email, meetup)` pair and refuses to update
/// or delete registrations that have not been persisted.
pub struct RegistrationService<R: RegistrationRepository> {
    repository: Arc<R>,
}

impl<R: RegistrationRepository> RegistrationService<R> {
    /// Creates a new registration service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persists a new registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if the meetup has no id.
    /// Returns [`AppError::BusinessRule`] ("Registration already created") if
    /// the email is already registered for this meetup; nothing is written.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn save(&self, registration: Registration) -> Result<Registration, AppError> {
        let meetup_id = registration
            .meetup_id()
            .ok_or_else(|| AppError::invalid_argument("Meetup id cannot be null"))?;

        if self
            .repository
            .exists_by_email_and_meetup(&registration.email, meetup_id)
            .await?
        {
            tracing::warn!(meetup_id, "Duplicate registration rejected");
            return Err(AppError::business_rule(
                "Registration already created",
                json!({"meetup_id": meetup_id}),
            ));
        }

        let saved = self.repository.insert(registration).await?;
        tracing::info!(registration_id = ?saved.id, meetup_id, "Registration created");
        Ok(saved)
    }

    pub async fn get_registration_by_id(&self, id: i32) -> Result<Option<Registration>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        self.repository.exists_by_id(id).await
    }

    /// Removes a registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if `registration.id` is `None`;
    /// the repository is not called in that case.
    pub async fn delete(&self, registration: &Registration) -> Result<(), AppError> {
        let Some(id) = registration.id else {
            return Err(AppError::invalid_argument("Registration id cannot be null"));
        };

        self.repository.delete(id).await?;
        tracing::info!(registration_id = id, "Registration deleted");
        Ok(())
    }

    /// Writes every field of `registration` back to storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if `registration.id` is `None`.
    /// Returns [`AppError::BusinessRule`] if the new `(email, meetup)` pair
    /// collides with another registration.
    pub async fn update(&self, registration: Registration) -> Result<Registration, AppError> {
        if registration.id.is_none() {
            return Err(AppError::invalid_argument("Registration id cannot be null"));
        }

        self.repository.update(registration).await
    }

    /// Returns one page of registrations matching the example filter.
    pub async fn find(
        &self,
        filter: RegistrationFilter,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError> {
        self.repository.find(filter, page).await
    }

    /// Returns every registration, each with its meetup, converted into `T`.
    pub async fn get_all<T: From<Registration>>(&self) -> Result<Vec<T>, AppError> {
        let registrations = self.repository.find_all().await?;
        Ok(registrations.into_iter().map(T::from).collect())
    }

    /// Returns one page of the registrations for `meetup`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] if the meetup has no id.
    pub async fn get_registrations_by_meetup(
        &self,
        meetup: &Meetup,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError> {
        let Some(meetup_id) = meetup.id else {
            return Err(AppError::invalid_argument("Meetup id cannot be null"));
        };

        self.repository.find_by_meetup(meetup_id, page).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRegistrationRepository;

    fn create_test_meetup(id: Option<i32>) -> Meetup {
        Meetup {
            id,
            event: "Womakerscode Dados".to_string(),
            description: None,
            organizer: "organizadora".to_string(),
            meetup_date: "10/10/2021".to_string(),
            address: Some("sao paulo".to_string()),
        }
    }

    fn create_test_registration(id: Option<i32>) -> Registration {
        Registration {
            id,
            person_name: "Mariela Fernandez".to_string(),
            email: "email@gmail.com".to_string(),
            date_of_registration: "01/04/2022".to_string(),
            registered: Some(true),
            meetup: create_test_meetup(Some(11)),
        }
    }

    #[tokio::test]
    async fn test_save_registration() {
        let mut mock_repo = MockRegistrationRepository::new();

        mock_repo
            .expect_exists_by_email_and_meetup()
            .withf(|email, meetup_id| email == "email@gmail.com" && *meetup_id == 11)
            .times(1)
            .returning(|_, _| Ok(false));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|r| Ok(r.with_id(101)));

        let service = RegistrationService::new(Arc::new(mock_repo));

        let saved = service.save(create_test_registration(None)).await.unwrap();

        assert_eq!(saved.id, Some(101));
        assert_eq!(saved.person_name, "Mariela Fernandez");
        assert_eq!(saved.email, "email@gmail.com");
        assert_eq!(saved.date_of_registration, "01/04/2022");
        assert_eq!(saved.registered, Some(true));
        assert_eq!(saved.meetup, create_test_meetup(Some(11)));
    }

    #[tokio::test]
    async fn test_save_duplicate_registration_is_rejected() {
        let mut mock_repo = MockRegistrationRepository::new();

        mock_repo
            .expect_exists_by_email_and_meetup()
            .times(1)
            .returning(|_, _| Ok(true));
        mock_repo.expect_insert().never();

        let service = RegistrationService::new(Arc::new(mock_repo));

        let err = service
            .save(create_test_registration(None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BusinessRule { .. }));
        assert_eq!(err.to_string(), "Registration already created");
    }

    #[tokio::test]
    async fn test_save_registration_for_unsaved_meetup_is_invalid() {
        let mut mock_repo = MockRegistrationRepository::new();
        mock_repo.expect_exists_by_email_and_meetup().never();
        mock_repo.expect_insert().never();

        let service = RegistrationService::new(Arc::new(mock_repo));

        let mut registration = create_test_registration(None);
        registration.meetup.id = None;

        let result = service.save(registration).await;

        assert!(matches!(result, Err(AppError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_get_registration_by_id() {
        let mut mock_repo = MockRegistrationRepository::new();

        let stored = create_test_registration(Some(101));
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 101)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = RegistrationService::new(Arc::new(mock_repo));

        let found = service.get_registration_by_id(101).await.unwrap().unwrap();

        assert_eq!(found, create_test_registration(Some(101)));
    }

    #[tokio::test]
    async fn test_registration_not_found_by_id() {
        let mut mock_repo = MockRegistrationRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = RegistrationService::new(Arc::new(mock_repo));

        assert!(service.get_registration_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_registration() {
        let mut mock_repo = MockRegistrationRepository::new();

        mock_repo
            .expect_delete()
            .withf(|id| *id == 101)
            .times(1)
            .returning(|_| Ok(()));

        let service = RegistrationService::new(Arc::new(mock_repo));

        assert!(
            service
                .delete(&create_test_registration(Some(101)))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_invalid_registration() {
        let mut mock_repo = MockRegistrationRepository::new();
        mock_repo.expect_delete().never();

        let service = RegistrationService::new(Arc::new(mock_repo));

        let result = service.delete(&create_test_registration(None)).await;

        assert!(matches!(result, Err(AppError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_update_registration() {
        let mut mock_repo = MockRegistrationRepository::new();

        mock_repo
            .expect_update()
            .withf(|r| r.id == Some(101) && r.person_name == "Mariela F.")
            .times(1)
            .returning(Ok);

        let service = RegistrationService::new(Arc::new(mock_repo));

        let mut registration = create_test_registration(Some(101));
        registration.person_name = "Mariela F.".to_string();

        let updated = service.update(registration).await.unwrap();

        assert_eq!(updated.id, Some(101));
        assert_eq!(updated.person_name, "Mariela F.");
        assert_eq!(updated.meetup.id, Some(11));
    }

    #[tokio::test]
    async fn test_update_invalid_registration() {
        let mut mock_repo = MockRegistrationRepository::new();
        mock_repo.expect_update().never();

        let service = RegistrationService::new(Arc::new(mock_repo));

        let result = service.update(create_test_registration(None)).await;

        assert!(matches!(result, Err(AppError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_find_registrations() {
        let mut mock_repo = MockRegistrationRepository::new();

        let stored = create_test_registration(Some(101));
        mock_repo
            .expect_find()
            .withf(|filter, _| filter.person_name.as_deref() == Some("mariela"))
            .times(1)
            .returning(move |_, page| Ok(Page::new(vec![stored.clone()], page, 1)));

        let service = RegistrationService::new(Arc::new(mock_repo));

        let page = service
            .find(
                RegistrationFilter::new().with_person_name("mariela"),
                PageRequest::new(0, 10),
            )
            .await
            .unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, Some(101));
    }

    #[tokio::test]
    async fn test_get_all_includes_nested_meetup() {
        let mut mock_repo = MockRegistrationRepository::new();

        let stored = vec![create_test_registration(Some(101))];
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(move || Ok(stored.clone()));

        let service = RegistrationService::new(Arc::new(mock_repo));

        let all: Vec<Registration> = service.get_all().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, Some(101));
        assert_eq!(all[0].meetup.id, Some(11));
        assert_eq!(all[0].meetup.event, "Womakerscode Dados");
    }

    #[tokio::test]
    async fn test_get_registrations_by_meetup() {
        let mut mock_repo = MockRegistrationRepository::new();

        let stored = create_test_registration(Some(101));
        mock_repo
            .expect_find_by_meetup()
            .withf(|meetup_id, _| *meetup_id == 11)
            .times(1)
            .returning(move |_, page| Ok(Page::new(vec![stored.clone()], page, 1)));

        let service = RegistrationService::new(Arc::new(mock_repo));

        let page = service
            .get_registrations_by_meetup(&create_test_meetup(Some(11)), PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_get_registrations_by_unsaved_meetup_is_invalid() {
        let mut mock_repo = MockRegistrationRepository::new();
        mock_repo.expect_find_by_meetup().never();

        let service = RegistrationService::new(Arc::new(mock_repo));

        let result = service
            .get_registrations_by_meetup(&create_test_meetup(None), PageRequest::default())
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_exists_delegates_to_repository() {
        let mut mock_repo = MockRegistrationRepository::new();

        mock_repo
            .expect_exists_by_id()
            .withf(|id| *id == 101)
            .times(1)
            .returning(|_| Ok(true));

        let service = RegistrationService::new(Arc::new(mock_repo));

        assert!(service.exists(101).await.unwrap());
    }
}
