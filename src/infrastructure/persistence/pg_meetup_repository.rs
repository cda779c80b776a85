//! PostgreSQL implementation of meetup repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Meetup;
use crate::domain::query::{MeetupFilter, Page, PageRequest};
use crate::domain::repositories::MeetupRepository;
use crate::error::AppError;

/// `WHERE` clause shared by the filtered page query and its count.
///
/// Binds `$1..$5` to the containment patterns of [`MeetupFilter::patterns`];
/// a `NULL` pattern disables its predicate.
const FILTER_WHERE: &str = r#"
    WHERE ($1::TEXT IS NULL OR event ILIKE $1)
      AND ($2::TEXT IS NULL OR description ILIKE $2)
      AND ($3::TEXT IS NULL OR organizer ILIKE $3)
      AND ($4::TEXT IS NULL OR meetup_date ILIKE $4)
      AND ($5::TEXT IS NULL OR address ILIKE $5)
"#;

#[derive(sqlx::FromRow)]
struct MeetupRow {
    id: i32,
    event: String,
    description: Option<String>,
    organizer: String,
    meetup_date: String,
    address: Option<String>,
}

impl From<MeetupRow> for Meetup {
    fn from(r: MeetupRow) -> Self {
        Meetup::new(r.event, r.description, r.organizer, r.meetup_date, r.address).with_id(r.id)
    }
}

/// PostgreSQL repository for meetups.
pub struct PgMeetupRepository {
    pool: Arc<PgPool>,
}

impl PgMeetupRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetupRepository for PgMeetupRepository {
    async fn insert(&self, meetup: Meetup) -> Result<Meetup, AppError> {
        let row = sqlx::query_as::<_, MeetupRow>(
            r#"
            INSERT INTO meetups (event, description, organizer, meetup_date, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event, description, organizer, meetup_date, address
            "#,
        )
        .bind(meetup.event)
        .bind(meetup.description)
        .bind(meetup.organizer)
        .bind(meetup.meetup_date)
        .bind(meetup.address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, meetup: Meetup) -> Result<Meetup, AppError> {
        let id = meetup
            .id
            .ok_or_else(|| AppError::invalid_argument("Meetup id cannot be null"))?;

        let row = sqlx::query_as::<_, MeetupRow>(
            r#"
            UPDATE meetups SET
                event       = $2,
                description = $3,
                organizer   = $4,
                meetup_date = $5,
                address     = $6
            WHERE id = $1
            RETURNING id, event, description, organizer, meetup_date, address
            "#,
        )
        .bind(id)
        .bind(meetup.event)
        .bind(meetup.description)
        .bind(meetup.organizer)
        .bind(meetup.meetup_date)
        .bind(meetup.address)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Meetup::from)
            .ok_or_else(|| AppError::not_found("meetup id doesn't exist", json!({"id": id})))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Meetup>, AppError> {
        let row = sqlx::query_as::<_, MeetupRow>(
            r#"
            SELECT id, event, description, organizer, meetup_date, address
            FROM meetups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Meetup::from))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM meetups WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM meetups WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "meetup id doesn't exist",
                json!({"id": id}),
            ));
        }

        Ok(())
    }

    async fn find(
        &self,
        filter: MeetupFilter,
        page: PageRequest,
    ) -> Result<Page<Meetup>, AppError> {
        let [event, description, organizer, meetup_date, address] = filter.patterns();

        let select_sql = format!(
            r#"
            SELECT id, event, description, organizer, meetup_date, address
            FROM meetups
            {FILTER_WHERE}
            ORDER BY id
            LIMIT $6 OFFSET $7
            "#
        );
        let count_sql = format!("SELECT COUNT(*) FROM meetups {FILTER_WHERE}");

        let rows_query = sqlx::query_as::<_, MeetupRow>(&select_sql)
            .bind(event.clone())
            .bind(description.clone())
            .bind(organizer.clone())
            .bind(meetup_date.clone())
            .bind(address.clone())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool.as_ref());

        let count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(event)
            .bind(description)
            .bind(organizer)
            .bind(meetup_date)
            .bind(address)
            .fetch_one(self.pool.as_ref());

        let (rows, total) = tokio::try_join!(rows_query, count_query)?;

        Ok(Page::new(
            rows.into_iter().map(Meetup::from).collect(),
            page,
            total,
        ))
    }

    async fn find_all(&self) -> Result<Vec<Meetup>, AppError> {
        let rows = sqlx::query_as::<_, MeetupRow>(
            r#"
            SELECT id, event, description, organizer, meetup_date, address
            FROM meetups
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Meetup::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM meetups")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
