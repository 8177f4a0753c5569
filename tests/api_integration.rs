use std::collections::HashSet;
use std::sync::Arc;

use dog_breeds_api::routes::create_router;
use dog_breeds_api::store::{BreedStore, MemoryStore, StoreError, StoreResult};
use dog_breeds_api::{Catalog, DogBreed, Id, SEED_BREED_COUNT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post(&self, path: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Serve the real router on an ephemeral port
async fn spawn_app<S: BreedStore + 'static>(store: S) -> TestClient {
    let app = create_router().with_state(Arc::new(Catalog::new(store)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestClient {
        client: Client::new(),
        base_url: format!("http://{}/api", addr),
    }
}

/// A store whose backend is always down
struct UnavailableStore;

#[async_trait::async_trait]
impl BreedStore for UnavailableStore {
    async fn find_all(&self, _limit: usize) -> StoreResult<Vec<DogBreed>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: &Id) -> StoreResult<Option<DogBreed>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn search(&self, _query: &str, _limit: usize) -> StoreResult<Vec<DogBreed>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn replace_all(&self, _breeds: Vec<DogBreed>) -> StoreResult<usize> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_root_welcome_message() {
    let client = spawn_app(MemoryStore::new()).await;

    for path in ["", "/"] {
        let response = client.get(path).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Welcome to the Dog Breeds API");
    }
}

#[tokio::test]
async fn test_populate_then_list_and_fetch() {
    let client = spawn_app(MemoryStore::new()).await;

    let response = client.post("/breeds/populate").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        format!("Successfully populated {} dog breeds", SEED_BREED_COUNT)
    );

    let response = client.get("/breeds").await;
    assert_eq!(response.status(), StatusCode::OK);
    let breeds: Vec<DogBreed> = response.json().await.unwrap();
    assert_eq!(breeds.len(), SEED_BREED_COUNT);

    let first = &breeds[0];
    let response = client.get(&format!("/breeds/{}", first.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: DogBreed = response.json().await.unwrap();
    assert_eq!(&fetched, first);
}

#[tokio::test]
async fn test_list_seeds_empty_store() {
    let store = MemoryStore::new();
    let client = spawn_app(store.clone()).await;
    assert!(store.is_empty());

    let response = client.get("/breeds").await;
    assert_eq!(response.status(), StatusCode::OK);
    let breeds: Vec<Value> = response.json().await.unwrap();
    assert_eq!(breeds.len(), SEED_BREED_COUNT);
    assert_eq!(store.len(), SEED_BREED_COUNT);

    let object = breeds[0].as_object().unwrap();
    for field in ["id", "name", "health_issues", "breed_group", "created_at"] {
        assert!(object.contains_key(field), "missing field {}", field);
    }
}

#[tokio::test]
async fn test_unknown_breed_is_404() {
    let client = spawn_app(MemoryStore::new()).await;
    client.post("/breeds/populate").await;

    let response = client.get("/breeds/invalid-id-12345").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap().to_lowercase();
    assert!(detail.contains("not found"));
}

#[tokio::test]
async fn test_get_populate_is_a_breed_lookup() {
    let client = spawn_app(MemoryStore::new()).await;
    client.post("/breeds/populate").await;

    let response = client.get("/breeds/populate").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Breed not found");
}

#[tokio::test]
async fn test_search_routes() {
    let client = spawn_app(MemoryStore::new()).await;
    client.post("/breeds/populate").await;

    let golden: Vec<DogBreed> = client.get("/breeds/search/Golden").await.json().await.unwrap();
    assert!(golden.iter().any(|b| b.name == "Golden Retriever"));

    let sporting: Vec<DogBreed> = client.get("/breeds/search/sporting").await.json().await.unwrap();
    assert!(sporting.iter().any(|b| b.breed_group == "Sporting"));

    let friendly: Vec<DogBreed> = client.get("/breeds/search/Friendly").await.json().await.unwrap();
    assert!(friendly.iter().any(|b| b.temperament.contains("Friendly")));

    let large: Vec<DogBreed> = client.get("/breeds/search/Large").await.json().await.unwrap();
    assert!(large.iter().any(|b| b.size == "Large"));

    let response = client.get("/breeds/search/zzz-no-match").await;
    assert_eq!(response.status(), StatusCode::OK);
    let none: Vec<DogBreed> = response.json().await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_repopulate_replaces_ids() {
    let client = spawn_app(MemoryStore::new()).await;

    client.post("/breeds/populate").await;
    let first: Vec<DogBreed> = client.get("/breeds").await.json().await.unwrap();
    let first_ids: HashSet<_> = first.into_iter().map(|b| b.id).collect();

    client.post("/breeds/populate").await;
    let second: Vec<DogBreed> = client.get("/breeds").await.json().await.unwrap();

    assert_eq!(second.len(), SEED_BREED_COUNT);
    assert!(second.iter().all(|b| !first_ids.contains(&b.id)));

    let stale = first_ids.iter().next().unwrap();
    let response = client.get(&format!("/breeds/{}", stale)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_client_error() {
    let client = spawn_app(MemoryStore::new()).await;

    let response = client.get("/nonexistent").await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let client = spawn_app(MemoryStore::new()).await;

    let response = client
        .client
        .get(format!("{}/", client.base_url))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let client = spawn_app(UnavailableStore).await;

    for response in [
        client.get("/breeds").await,
        client.get("/breeds/some-id").await,
        client.get("/breeds/search/Golden").await,
        client.post("/breeds/populate").await,
    ] {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["detail"], "Internal server error");
    }
}
