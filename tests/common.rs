#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use schoolpress::client::{Caller, QueryCache, ServiceClient};
use schoolpress::models::*;
use schoolpress::services::MemoryBackend;

pub const ADMIN_SECRET: &str = "correct-horse-battery";

pub fn backend() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new(Some(ADMIN_SECRET.to_string())))
}

/// A backend whose calls each take `latency` to answer.
pub fn slow_backend(latency: Duration) -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new(Some(ADMIN_SECRET.to_string())).with_latency(latency))
}

pub async fn seed_admin(backend: &MemoryBackend) -> Principal {
    let admin = Principal::new();
    backend.seed_role(admin, UserRole::Admin).await;
    admin
}

pub async fn connect(backend: &Arc<MemoryBackend>, caller: Caller) -> ServiceClient {
    ServiceClient::connect(backend.clone(), Arc::new(QueryCache::new()), caller).await
}

pub async fn connect_shared(
    backend: &Arc<MemoryBackend>,
    cache: &Arc<QueryCache>,
    caller: Caller,
) -> ServiceClient {
    ServiceClient::connect(backend.clone(), cache.clone(), caller).await
}

/// An admin with a verified unlock token.
pub async fn admin_client(backend: &Arc<MemoryBackend>) -> (Principal, ServiceClient) {
    let admin = seed_admin(backend).await;
    let client = connect(
        backend,
        Caller::new(Some(admin), Some(ADMIN_SECRET.to_string())),
    )
    .await;
    (admin, client)
}

pub fn date(input: &str) -> i64 {
    timestamp::parse_date_input(input).expect("Invalid date in test helper")
}

pub fn holiday_notice() -> NoticeDraft {
    NoticeDraft::new("Holiday", "School closed Monday", date("2024-01-01"))
}

pub fn staff_draft(name: &str, position: &str) -> StaffDraft {
    StaffDraft {
        name: name.to_string(),
        position: position.to_string(),
        biography: String::new(),
        photo_url: String::new(),
    }
}

pub fn gallery_draft(title: &str) -> GalleryDraft {
    GalleryDraft {
        title: title.to_string(),
        description: String::new(),
        image_url: format!("https://images.example.org/{}.jpg", title.to_lowercase()),
    }
}

pub fn contact_draft() -> ContactDraft {
    ContactDraft {
        name: "Jordan Lee".to_string(),
        email: "jordan@example.org".to_string(),
        message: "When does enrollment open?".to_string(),
    }
}
