mod common;

use meetup_service::domain::entities::Meetup;
use meetup_service::domain::query::{MeetupFilter, PageRequest};
use meetup_service::domain::repositories::MeetupRepository;
use meetup_service::error::AppError;
use meetup_service::infrastructure::persistence::PgMeetupRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn repository(pool: PgPool) -> PgMeetupRepository {
    PgMeetupRepository::new(Arc::new(pool))
}

fn new_meetup(event: &str, organizer: &str, address: Option<&str>) -> Meetup {
    Meetup::new(
        event.to_string(),
        None,
        organizer.to_string(),
        "10/10/2021".to_string(),
        address.map(str::to_string),
    )
}

#[sqlx::test]
async fn test_insert_assigns_id(pool: PgPool) {
    let repo = repository(pool);

    let saved = repo
        .insert(new_meetup("Womakerscode Dados", "organizadora", Some("sao paulo")))
        .await
        .unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.event, "Womakerscode Dados");
    assert_eq!(saved.address.as_deref(), Some("sao paulo"));
}

#[sqlx::test]
async fn test_find_by_id(pool: PgPool) {
    let id = common::create_test_meetup(&pool, "Rust Night", "rustaceans", "01/02/2023").await;
    let repo = repository(pool);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.organizer, "rustaceans");

    assert!(repo.find_by_id(id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_exists_by_id(pool: PgPool) {
    let id = common::create_test_meetup(&pool, "Rust Night", "rustaceans", "01/02/2023").await;
    let repo = repository(pool);

    assert!(repo.exists_by_id(id).await.unwrap());
    assert!(!repo.exists_by_id(id + 1000).await.unwrap());
}

#[sqlx::test]
async fn test_update_missing_meetup(pool: PgPool) {
    let repo = repository(pool);

    let result = repo
        .update(new_meetup("Ghost", "nobody", None).with_id(4242))
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_update_without_id(pool: PgPool) {
    let repo = repository(pool);

    let result = repo.update(new_meetup("Ghost", "nobody", None)).await;

    assert!(matches!(result, Err(AppError::InvalidArgument { .. })));
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let id = common::create_test_meetup(&pool, "Rust Night", "rustaceans", "01/02/2023").await;
    let repo = repository(pool);

    repo.delete(id).await.unwrap();

    assert!(!repo.exists_by_id(id).await.unwrap());
    assert!(matches!(
        repo.delete(id).await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test]
async fn test_find_combines_filters(pool: PgPool) {
    let repo = repository(pool);
    repo.insert(new_meetup("Womakerscode Dados", "organizadora", Some("sao paulo")))
        .await
        .unwrap();
    repo.insert(new_meetup("Womakerscode Java", "organizadora", Some("recife")))
        .await
        .unwrap();
    repo.insert(new_meetup("Rust Night", "rustaceans", Some("sao paulo")))
        .await
        .unwrap();

    let page = repo
        .find(
            MeetupFilter::new()
                .with_organizer("ORGANIZ")
                .with_address("paulo"),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].event, "Womakerscode Dados");
}

#[sqlx::test]
async fn test_find_skips_null_columns_only_when_filtered(pool: PgPool) {
    let repo = repository(pool);
    repo.insert(new_meetup("With address", "org", Some("recife")))
        .await
        .unwrap();
    repo.insert(new_meetup("No address", "org", None))
        .await
        .unwrap();

    let all = repo
        .find(MeetupFilter::new(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total_elements, 2);

    let filtered = repo
        .find(
            MeetupFilter::new().with_address("recife"),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(filtered.total_elements, 1);
    assert_eq!(filtered.content[0].event, "With address");
}

#[sqlx::test]
async fn test_find_all_and_count(pool: PgPool) {
    common::create_test_meetup(&pool, "First", "a", "01/01/2021").await;
    common::create_test_meetup(&pool, "Second", "b", "02/01/2021").await;
    let repo = repository(pool);

    let all = repo.find_all().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].event, "First");
    assert_eq!(repo.count().await.unwrap(), 2);
}
