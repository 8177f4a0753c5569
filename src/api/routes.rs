use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{self, AppState};
use crate::store::traits::BreedStore;

pub fn create_router<S: BreedStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/breeds", get(handlers::list_breeds::<S>))
        .route(
            "/api/breeds/populate",
            post(handlers::populate_breeds::<S>).get(handlers::get_breed_populate::<S>),
        )
        .route(
            "/api/breeds/search/:query",
            get(handlers::search_breeds::<S>),
        )
        .route("/api/breeds/:breed_id", get(handlers::get_breed::<S>))
        .layer(ServiceBuilder::new().layer(cors_layer()))
}

/// Every origin, method and header is allowed
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
