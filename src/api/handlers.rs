use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logic::{Catalog, CatalogError};
use crate::model::{DogBreed, Id};
use crate::store::traits::BreedStore;

pub type AppState<S> = Arc<Catalog<S>>;

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            detail: message.to_string(),
        }
    }
}

fn error_response(err: CatalogError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        CatalogError::NotFound(id) => {
            log::debug!("Breed {} not found", id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Breed not found")),
            )
        }
        other => {
            log::error!("Catalog request failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
        }
    }
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Dog Breeds API".to_string(),
    })
}

pub async fn list_breeds<S: BreedStore>(
    State(catalog): State<AppState<S>>,
) -> HandlerResult<Vec<DogBreed>> {
    catalog.list_all().await.map(Json).map_err(error_response)
}

pub async fn get_breed<S: BreedStore>(
    State(catalog): State<AppState<S>>,
    Path(breed_id): Path<Id>,
) -> HandlerResult<DogBreed> {
    catalog
        .get_by_id(&breed_id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// `GET /api/breeds/populate` is a lookup of the breed id "populate"
pub async fn get_breed_populate<S: BreedStore>(
    State(catalog): State<AppState<S>>,
) -> HandlerResult<DogBreed> {
    get_breed(State(catalog), Path("populate".to_string())).await
}

pub async fn search_breeds<S: BreedStore>(
    State(catalog): State<AppState<S>>,
    Path(query): Path<String>,
) -> HandlerResult<Vec<DogBreed>> {
    catalog.search(&query).await.map(Json).map_err(error_response)
}

pub async fn populate_breeds<S: BreedStore>(
    State(catalog): State<AppState<S>>,
) -> HandlerResult<MessageResponse> {
    let count = catalog.repopulate().await.map_err(error_response)?;
    Ok(Json(MessageResponse {
        message: format!("Successfully populated {} dog breeds", count),
    }))
}
