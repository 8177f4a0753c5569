use crate::model::{DogBreed, Id};
use crate::seed::seed_breeds;
use crate::store::traits::{BreedStore, StoreError};

/// Upper bound on records returned by list and search
pub const MAX_RESULTS: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Breed not found: {0}")]
    NotFound(Id),
    #[error("Embedded seed dataset is invalid: {0}")]
    Seed(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog operations over a breed store, including the lazy-seeding policy
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: BreedStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All breeds in store order. An empty store is repopulated first.
    pub async fn list_all(&self) -> CatalogResult<Vec<DogBreed>> {
        let breeds = self.store.find_all(MAX_RESULTS).await?;
        if !breeds.is_empty() {
            return Ok(breeds);
        }

        log::info!("Breed collection is empty, populating from seed data");
        self.repopulate().await?;
        Ok(self.store.find_all(MAX_RESULTS).await?)
    }

    pub async fn get_by_id(&self, id: &Id) -> CatalogResult<DogBreed> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Breeds whose name, temperament, group or size contain `query`,
    /// ignoring case. The query is matched literally.
    pub async fn search(&self, query: &str) -> CatalogResult<Vec<DogBreed>> {
        Ok(self.store.search(query, MAX_RESULTS).await?)
    }

    /// Replace the collection with a fresh copy of the seed dataset
    pub async fn repopulate(&self) -> CatalogResult<usize> {
        let breeds: Vec<DogBreed> = seed_breeds()
            .map_err(|e| CatalogError::Seed(format!("{:#}", e)))?
            .into_iter()
            .map(|b| b.into_breed())
            .collect();

        let count = self.store.replace_all(breeds).await?;
        log::info!("Populated {} dog breeds", count);
        Ok(count)
    }
}
