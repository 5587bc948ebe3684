use std::time::Duration;

use hallbook_api::middleware::session::{SessionStore, DEFAULT_SESSION_TTL};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_resolve() {
    let store = SessionStore::new();
    let token = store.create("staff1").await;

    assert_eq!(store.resolve(token).await.as_deref(), Some("staff1"));
    assert_eq!(store.resolve(Uuid::new_v4()).await, None);
}

#[tokio::test]
async fn test_revoke_ends_one_session() {
    let store = SessionStore::new();
    let laptop = store.create("staff1").await;
    let phone = store.create("staff1").await;

    assert_eq!(store.revoke(laptop).await.as_deref(), Some("staff1"));
    assert_eq!(store.resolve(laptop).await, None);
    assert_eq!(store.resolve(phone).await.as_deref(), Some("staff1"));
    assert_eq!(store.revoke(laptop).await, None);
}

#[tokio::test]
async fn test_revoke_user_ends_all_their_sessions() {
    let store = SessionStore::new();
    store.create("staff1").await;
    store.create("staff1").await;
    let other = store.create("staff2").await;

    assert_eq!(store.revoke_user("staff1").await, 2);
    assert_eq!(store.resolve(other).await.as_deref(), Some("staff2"));
}

#[test]
fn test_tokens_are_unique_per_login() {
    let store = SessionStore::new();

    let (first, second) = tokio_test::block_on(async {
        (store.create("staff1").await, store.create("staff1").await)
    });

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_dropped() {
    let store = SessionStore::with_ttl(Duration::ZERO);
    let token = store.create("staff1").await;

    assert_eq!(store.resolve(token).await, None);
    assert_eq!(store.session_count().await, 0);
}

#[tokio::test]
async fn test_new_login_sweeps_expired_sessions() {
    let store = SessionStore::with_ttl(Duration::ZERO);
    for _ in 0..5 {
        store.create("staff1").await;
    }

    // Each login clears the ones before it, so only the newest is held.
    assert_eq!(store.session_count().await, 1);
}

#[tokio::test]
async fn test_default_ttl_keeps_fresh_sessions() {
    let store = SessionStore::new();
    let token = store.create("staff1").await;

    assert_eq!(DEFAULT_SESSION_TTL, Duration::from_secs(12 * 60 * 60));
    assert_eq!(store.resolve(token).await.as_deref(), Some("staff1"));
    assert_eq!(store.session_count().await, 1);
}
