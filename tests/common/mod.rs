#![allow(dead_code)]

use axum_test::TestServer;
use meetup_service::routes::router;
use meetup_service::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_meetup(pool: &PgPool, event: &str, organizer: &str, date: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO meetups (event, organizer, meetup_date) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(event)
    .bind(organizer)
    .bind(date)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_registration(
    pool: &PgPool,
    meetup_id: i32,
    person_name: &str,
    email: &str,
) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO registrations (person_name, email, date_of_registration, registered, meetup_id)
        VALUES ($1, $2, '01/04/2022', TRUE, $3)
        RETURNING id
        "#,
    )
    .bind(person_name)
    .bind(email)
    .bind(meetup_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_registrations(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool))
}

pub fn create_test_server(pool: PgPool) -> TestServer {
    TestServer::new(router(create_test_state(pool))).unwrap()
}
