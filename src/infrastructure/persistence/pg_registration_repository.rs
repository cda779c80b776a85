//! PostgreSQL implementation of registration repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Meetup, Registration};
use crate::domain::query::{Page, PageRequest, RegistrationFilter};
use crate::domain::repositories::RegistrationRepository;
use crate::error::AppError;
use crate::utils::db_error::{is_foreign_key_violation, is_unique_violation_on};

/// Unique index backing the one-registration-per-email-per-meetup rule.
pub const EMAIL_MEETUP_CONSTRAINT: &str = "registrations_email_meetup_key";

/// Registration columns joined with the owning meetup, selected from `r` and `m`.
const JOINED_COLUMNS: &str = r#"
    r.id, r.person_name, r.email, r.date_of_registration, r.registered,
    m.id AS meetup_id, m.event, m.description, m.organizer, m.meetup_date, m.address
"#;

/// Binds `$1..$5`: name/email/date patterns, `registered`, `meetup_id`.
const FILTER_WHERE: &str = r#"
    WHERE ($1::TEXT IS NULL OR r.person_name ILIKE $1)
      AND ($2::TEXT IS NULL OR r.email ILIKE $2)
      AND ($3::TEXT IS NULL OR r.date_of_registration ILIKE $3)
      AND ($4::BOOLEAN IS NULL OR r.registered = $4)
      AND ($5::INTEGER IS NULL OR r.meetup_id = $5)
"#;

#[derive(sqlx::FromRow)]
struct RegistrationRow {
    id: i32,
    person_name: String,
    email: String,
    date_of_registration: String,
    registered: Option<bool>,
    meetup_id: i32,
    event: String,
    description: Option<String>,
    organizer: String,
    meetup_date: String,
    address: Option<String>,
}

impl From<RegistrationRow> for Registration {
    fn from(r: RegistrationRow) -> Self {
        let meetup = Meetup::new(r.event, r.description, r.organizer, r.meetup_date, r.address)
            .with_id(r.meetup_id);

        Registration::new(
            r.person_name,
            r.email,
            r.date_of_registration,
            r.registered,
            meetup,
        )
        .with_id(r.id)
    }
}

/// Maps write failures to business errors.
///
/// The unique index is the source of truth for duplicate registrations; the
/// service-level existence check only avoids the round trip in the common case.
fn map_write_error(e: sqlx::Error, meetup_id: i32) -> AppError {
    if is_unique_violation_on(&e, EMAIL_MEETUP_CONSTRAINT) {
        return AppError::business_rule(
            "Registration already created",
            json!({"meetup_id": meetup_id}),
        );
    }

    if is_foreign_key_violation(&e) {
        return AppError::bad_request("meetup id doesn't exist", json!({"meetup_id": meetup_id}));
    }

    e.into()
}

fn require_meetup_id(registration: &Registration) -> Result<i32, AppError> {
    registration
        .meetup_id()
        .ok_or_else(|| AppError::invalid_argument("Meetup id cannot be null"))
}

/// PostgreSQL repository for registrations.
pub struct PgRegistrationRepository {
    pool: Arc<PgPool>,
}

impl PgRegistrationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        filter: RegistrationFilter,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError> {
        let [person_name, email, date_of_registration] = filter.patterns();

        let select_sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM registrations r
            JOIN meetups m ON m.id = r.meetup_id
            {FILTER_WHERE}
            ORDER BY r.id
            LIMIT $6 OFFSET $7
            "#
        );
        let count_sql = format!("SELECT COUNT(*) FROM registrations r {FILTER_WHERE}");

        let rows_query = sqlx::query_as::<_, RegistrationRow>(&select_sql)
            .bind(person_name.clone())
            .bind(email.clone())
            .bind(date_of_registration.clone())
            .bind(filter.registered)
            .bind(filter.meetup_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool.as_ref());

        let count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(person_name)
            .bind(email)
            .bind(date_of_registration)
            .bind(filter.registered)
            .bind(filter.meetup_id)
            .fetch_one(self.pool.as_ref());

        let (rows, total) = tokio::try_join!(rows_query, count_query)?;

        Ok(Page::new(
            rows.into_iter().map(Registration::from).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn insert(&self, registration: Registration) -> Result<Registration, AppError> {
        let meetup_id = require_meetup_id(&registration)?;

        let sql = format!(
            r#"
            WITH r AS (
                INSERT INTO registrations
                    (person_name, email, date_of_registration, registered, meetup_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {JOINED_COLUMNS}
            FROM r
            JOIN meetups m ON m.id = r.meetup_id
            "#
        );

        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(registration.person_name)
            .bind(registration.email)
            .bind(registration.date_of_registration)
            .bind(registration.registered)
            .bind(meetup_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_write_error(e, meetup_id))?;

        Ok(row.into())
    }

    async fn update(&self, registration: Registration) -> Result<Registration, AppError> {
        let id = registration
            .id
            .ok_or_else(|| AppError::invalid_argument("Registration id cannot be null"))?;
        let meetup_id = require_meetup_id(&registration)?;

        let sql = format!(
            r#"
            WITH r AS (
                UPDATE registrations SET
                    person_name          = $2,
                    email                = $3,
                    date_of_registration = $4,
                    registered           = $5,
                    meetup_id            = $6
                WHERE id = $1
                RETURNING *
            )
            SELECT {JOINED_COLUMNS}
            FROM r
            JOIN meetups m ON m.id = r.meetup_id
            "#
        );

        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(id)
            .bind(registration.person_name)
            .bind(registration.email)
            .bind(registration.date_of_registration)
            .bind(registration.registered)
            .bind(meetup_id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_write_error(e, meetup_id))?;

        row.map(Registration::from).ok_or_else(|| {
            AppError::not_found("registration id doesn't exist", json!({"id": id}))
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Registration>, AppError> {
        let sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM registrations r
            JOIN meetups m ON m.id = r.meetup_id
            WHERE r.id = $1
            "#
        );

        let row = sqlx::query_as::<_, RegistrationRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Registration::from))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn exists_by_email_and_meetup(
        &self,
        email: &str,
        meetup_id: i32,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE email = $1 AND meetup_id = $2)",
        )
        .bind(email)
        .bind(meetup_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "registration id doesn't exist",
                json!({"id": id}),
            ));
        }

        Ok(())
    }

    async fn find(
        &self,
        filter: RegistrationFilter,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError> {
        self.fetch_page(filter, page).await
    }

    async fn find_all(&self) -> Result<Vec<Registration>, AppError> {
        let sql = format!(
            r#"
            SELECT {JOINED_COLUMNS}
            FROM registrations r
            JOIN meetups m ON m.id = r.meetup_id
            ORDER BY r.id
            "#
        );

        let rows = sqlx::query_as::<_, RegistrationRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn find_by_meetup(
        &self,
        meetup_id: i32,
        page: PageRequest,
    ) -> Result<Page<Registration>, AppError> {
        self.fetch_page(RegistrationFilter::new().with_meetup(meetup_id), page)
            .await
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
