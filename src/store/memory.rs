use parking_lot::RwLock;
use std::sync::Arc;

use crate::model::{DogBreed, Id};
use crate::store::traits::{BreedStore, StoreResult};

/// In-process breed collection, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    breeds: Arc<RwLock<Vec<DogBreed>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.breeds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.read().is_empty()
    }
}

#[async_trait::async_trait]
impl BreedStore for MemoryStore {
    async fn find_all(&self, limit: usize) -> StoreResult<Vec<DogBreed>> {
        Ok(self.breeds.read().iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: &Id) -> StoreResult<Option<DogBreed>> {
        Ok(self.breeds.read().iter().find(|b| &b.id == id).cloned())
    }

    async fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<DogBreed>> {
        let needle = query.to_lowercase();
        Ok(self
            .breeds
            .read()
            .iter()
            .filter(|b| b.matches_lowercase(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn replace_all(&self, breeds: Vec<DogBreed>) -> StoreResult<usize> {
        let count = breeds.len();
        // The new generation is fully built before the swap
        *self.breeds.write() = breeds;
        Ok(count)
    }
}
