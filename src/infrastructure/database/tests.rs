use super::*;
use crate::domain::{Booking, BookingStatus, RecordId, Repository, RepositoryPtr, ServiceRecord};
use serde_json::json;

// Initialize tracing once for all tests
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

fn init_tracing() {
    // ---
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_ansi(false) // No colorization, makes logs easier to read.
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn booking(email: &str) -> Booking {
    // ---
    Booking {
        id: RecordId::new(),
        email: email.to_string(),
        service_ref: "brake-check".to_string(),
        status: BookingStatus::default(),
        details: json!({ "customerName": "Bilbo", "price": 80 })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    }
}

fn service(title: &str) -> ServiceRecord {
    // ---
    ServiceRecord {
        id: RecordId::new(),
        title: title.to_string(),
        details: Default::default(),
    }
}

/// Behaviour every backend must share.
async fn exercise_bookings(repo: RepositoryPtr) {
    // ---
    let owner = format!("owner-{}@x.com", RecordId::new());
    let other = format!("other-{}@x.com", RecordId::new());

    let mine = booking(&owner);
    let theirs = booking(&other);
    repo.insert_booking(mine.clone()).await.expect("insert mine");
    repo.insert_booking(theirs.clone()).await.expect("insert theirs");

    // Owner filter returns exactly the owner's bookings.
    let listed = repo.list_bookings(Some(&owner)).await.expect("list by owner");
    assert_eq!(listed, vec![mine.clone()]);

    // Unfiltered listing includes both.
    let all = repo.list_bookings(None).await.expect("list all");
    assert!(all.iter().any(|b| b.id == mine.id));
    assert!(all.iter().any(|b| b.id == theirs.id));

    // Replace keeps extra fields and changes status.
    let mut updated = mine.clone();
    updated.status = BookingStatus::parse("confirmed").unwrap();
    assert!(repo.replace_booking(&updated).await.expect("replace"));
    let stored = repo.get_booking(mine.id).await.expect("get").expect("present");
    assert_eq!(stored.status.as_str(), "confirmed");
    assert_eq!(stored.details["customerName"], "Bilbo");

    // Replace of an unknown id writes nothing.
    assert!(!repo.replace_booking(&booking(&owner)).await.expect("replace unknown"));

    // Delete removes the document and its index entries.
    assert_eq!(repo.delete_booking(mine.id).await.expect("delete"), 1);
    assert_eq!(repo.delete_booking(mine.id).await.expect("delete again"), 0);
    assert!(repo.get_booking(mine.id).await.expect("get").is_none());
    assert!(repo.list_bookings(Some(&owner)).await.expect("list").is_empty());

    repo.delete_booking(theirs.id).await.expect("cleanup");
}

async fn exercise_services(repo: RepositoryPtr) {
    // ---
    let mut oil = service("Oil Change");
    repo.upsert_service(oil.clone()).await.expect("upsert");

    oil.title = "Full Oil Change".to_string();
    repo.upsert_service(oil.clone()).await.expect("upsert again");

    let found = repo.get_service(oil.id).await.expect("get").expect("present");
    assert_eq!(found.title, "Full Oil Change");

    let listed = repo.list_services().await.expect("list");
    assert_eq!(listed.iter().filter(|s| s.id == oil.id).count(), 1);

    assert!(repo.get_service(RecordId::new()).await.expect("get").is_none());
}

#[tokio::test]
async fn memory_repository_bookings() {
    // ---
    init_tracing();
    exercise_bookings(create_memory_repository()).await;
}

#[tokio::test]
async fn memory_repository_services() {
    // ---
    init_tracing();
    exercise_services(create_memory_repository()).await;
}

#[tokio::test]
async fn memory_repository_lists_in_insertion_order() {
    // ---
    let repo = create_memory_repository();
    let first = booking("a@x.com");
    let second = booking("a@x.com");
    repo.insert_booking(first.clone()).await.unwrap();
    repo.insert_booking(second.clone()).await.unwrap();

    let ids: Vec<RecordId> = repo
        .list_bookings(Some("a@x.com"))
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn memory_repository_rejects_duplicate_ids() {
    // ---
    let repo = create_memory_repository();
    let original = booking("a@x.com");
    repo.insert_booking(original.clone()).await.unwrap();
    assert!(repo.insert_booking(original).await.is_err());
}

#[tokio::test]
async fn seed_loads_services_idempotently() {
    // ---
    let repo = create_memory_repository();
    let id = RecordId::new();
    let path = std::env::temp_dir().join(format!("car-doctor-seed-{id}.json"));
    let seed = json!([
        { "id": id, "title": "Engine Diagnostic", "price": "150.00", "facility": [] }
    ]);
    std::fs::write(&path, seed.to_string()).unwrap();

    assert_eq!(seed_services(repo.as_ref(), &path).await.unwrap(), 1);
    assert_eq!(seed_services(repo.as_ref(), &path).await.unwrap(), 1);

    let services = repo.list_services().await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].title, "Engine Diagnostic");
    assert_eq!(services[0].details["price"], "150.00");

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn seed_reports_missing_file() {
    // ---
    let repo = create_memory_repository();
    let err = seed_services(repo.as_ref(), std::path::Path::new("/nonexistent/seed.json"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read services seed"));
}

// ---
// Redis-backed tests need a live server at CAR_DOCTOR_REDIS_URL.
// Run with `cargo test -- --ignored`.

fn redis_repo() -> RepositoryPtr {
    // ---
    let url = std::env::var("CAR_DOCTOR_REDIS_URL")
        .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    create_redis_repository(&url).expect("repository creation failed")
}

#[tokio::test]
#[ignore]
async fn redis_repository_bookings() {
    // ---
    init_tracing();
    let repo = redis_repo();
    repo.ping().await.expect("redis unreachable");
    exercise_bookings(repo).await;
}

#[tokio::test]
#[ignore]
async fn redis_repository_services() {
    // ---
    init_tracing();
    exercise_services(redis_repo()).await;
}

#[tokio::test]
async fn redis_connection_failure_is_an_error() {
    // ---
    let repo = create_redis_repository("redis://invalid-host:6379").unwrap();
    assert!(repo.ping().await.is_err());
}

#[test]
fn redis_rejects_malformed_url() {
    // ---
    assert!(create_redis_repository("not a url").is_err());
}
