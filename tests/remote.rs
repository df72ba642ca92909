use std::collections::HashSet;

use client_roster::domain::types::{PageNumber, PageSize};
use client_roster::repository::errors::RepositoryError;
use client_roster::repository::{
    ClientListQuery, ClientReader, QueryCache, QueryState, RandomUserRepository,
};
use client_roster::table::column::ColumnKey;
use client_roster::table::sort::{SortDirection, SortSpec};

mod common;

use common::{Behavior, StubSource, refused_url};

fn first_page(size: u32) -> ClientListQuery {
    ClientListQuery::new(PageNumber::FIRST, PageSize::new(size).unwrap())
}

#[actix_web::test]
async fn fetch_returns_full_page_with_unique_ids() {
    let stub = StubSource::start(Behavior::Healthy);
    let repo = stub.repository();

    let page = repo.fetch_clients(&first_page(10)).await.unwrap();

    assert_eq!(page.clients.len(), 10);
    assert!(page.total >= 10);
    assert_eq!(page.fetched, 10);
    let ids: HashSet<_> = page.clients.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), 10);

    let first = &page.clients[0];
    assert_eq!(first.id, "u1-0");
    assert_eq!(first.name.first, "Ana0");
    assert_eq!(first.location.city, "Porto");
    assert_eq!(first.picture.thumbnail, "https://img.test/thumb/1-0.jpg");

    stub.stop().await;
}

#[actix_web::test]
async fn same_request_yields_same_records() {
    let stub = StubSource::start(Behavior::Healthy);
    let repo = stub.repository();
    let query = first_page(20);

    let first = repo.fetch_clients(&query).await.unwrap();
    let second = repo.fetch_clients(&query).await.unwrap();

    assert_eq!(first.clients, second.clients);
    stub.stop().await;
}

#[actix_web::test]
async fn search_filters_fetched_page_but_keeps_total() {
    let stub = StubSource::start(Behavior::Healthy);
    let repo = stub.repository();

    let hit = repo
        .fetch_clients(&first_page(10).search("ANA3"))
        .await
        .unwrap();
    assert_eq!(hit.clients.len(), 1);
    assert_eq!(hit.clients[0].id, "u1-3");
    assert_eq!(hit.total, 10);
    assert_eq!(hit.fetched, 10);

    let miss = repo
        .fetch_clients(&first_page(10).search("nonexistent-xyz"))
        .await
        .unwrap();
    assert!(miss.clients.is_empty());
    assert_eq!(miss.total, 10);

    stub.stop().await;
}

#[actix_web::test]
async fn oversized_response_is_truncated_to_page_size() {
    let stub = StubSource::start(Behavior::Oversized);
    let repo = stub.repository();

    let page = repo.fetch_clients(&first_page(10)).await.unwrap();

    assert_eq!(page.clients.len(), 10);
    stub.stop().await;
}

#[actix_web::test]
async fn malformed_records_are_dropped() {
    let stub = StubSource::start(Behavior::Malformed);
    let repo = stub.repository();

    let page = repo.fetch_clients(&first_page(10)).await.unwrap();

    // records 0, 3, 6 and 9 have no email
    let ids: Vec<_> = page.clients.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["u1-1", "u1-2", "u1-4", "u1-5", "u1-7", "u1-8"]);
    stub.stop().await;
}

#[actix_web::test]
async fn server_error_is_remote_error() {
    let stub = StubSource::start(Behavior::ServerError);
    let repo = stub.repository();

    let err = repo.fetch_clients(&first_page(10)).await.unwrap_err();

    assert!(matches!(err, RepositoryError::RemoteError { status: 500, .. }));
    stub.stop().await;
}

#[actix_web::test]
async fn error_field_is_remote_error() {
    let stub = StubSource::start(Behavior::ErrorField);
    let repo = stub.repository();

    let err = repo.fetch_clients(&first_page(10)).await.unwrap_err();

    match err {
        RepositoryError::RemoteError { message, .. } => {
            assert!(message.contains("something has gone wrong"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    stub.stop().await;
}

#[actix_web::test]
async fn unreachable_source_is_network_unavailable() {
    let repo = RandomUserRepository::new(
        refused_url(),
        "test-seed",
        std::time::Duration::from_secs(2),
    )
    .unwrap();

    let err = repo.fetch_clients(&first_page(10)).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NetworkUnavailable(_)));
    assert!(err.is_retryable());
}

#[actix_web::test]
async fn cache_serves_repeat_and_sorted_requests_from_one_fetch() {
    let stub = StubSource::start(Behavior::Healthy);
    let cache = QueryCache::new(stub.repository());
    let query = first_page(10);
    let sorted = query.clone().sort(Some(SortSpec {
        column: ColumnKey::LastName,
        direction: SortDirection::Descending,
    }));

    let first = cache.get(&query).await.unwrap();
    let again = cache.get(&query).await.unwrap();
    let resorted = cache.get(&sorted).await.unwrap();

    assert_eq!(first, again);
    assert_eq!(first, resorted);
    assert_eq!(stub.hits(), 1);
    assert_eq!(cache.state(&query), QueryState::Fresh);

    cache.get(&first_page(20)).await.unwrap();
    assert_eq!(stub.hits(), 2);

    stub.stop().await;
}

#[actix_web::test]
async fn cache_retries_transient_failure_once() {
    let stub = StubSource::start(Behavior::FailFirst(1));
    let cache = QueryCache::new(stub.repository());

    let page = cache.get(&first_page(10)).await.unwrap();

    assert_eq!(page.clients.len(), 10);
    assert_eq!(stub.hits(), 2);
    stub.stop().await;
}

#[actix_web::test]
async fn cache_gives_up_after_retry_budget() {
    let stub = StubSource::start(Behavior::FailFirst(5));
    let cache = QueryCache::new(stub.repository());
    let query = first_page(10);

    let err = cache.get(&query).await.unwrap_err();

    assert!(matches!(err, RepositoryError::RemoteError { status: 503, .. }));
    assert_eq!(stub.hits(), 2);
    assert!(matches!(cache.state(&query), QueryState::Failed(_)));
    stub.stop().await;
}
