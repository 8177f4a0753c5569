use crate::model::{DogBreed, Id};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or a query failed
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A stored document could not be read back as a breed record
    #[error("stored breed {id} does not match the expected shape: {reason}")]
    ShapeMismatch { id: Id, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for the breed collection
#[async_trait::async_trait]
pub trait BreedStore: Send + Sync {
    /// Every record in natural store order, at most `limit` of them
    async fn find_all(&self, limit: usize) -> StoreResult<Vec<DogBreed>>;
    /// The record whose id equals `id` exactly
    async fn find_by_id(&self, id: &Id) -> StoreResult<Option<DogBreed>>;
    /// Records where `query` is a case-insensitive literal substring of
    /// name, temperament, breed group or size
    async fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<DogBreed>>;
    /// Replace the whole collection with `breeds`, returning how many were written.
    /// Readers observe either the previous generation or the new one.
    async fn replace_all(&self, breeds: Vec<DogBreed>) -> StoreResult<usize>;
}
