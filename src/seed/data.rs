use crate::model::NewDogBreed;
use anyhow::{Context, Result};

/// The breed catalog shipped with the service, used to (re)populate the store
const BREEDS_JSON: &str = include_str!("breeds.json");

/// Number of records in the embedded dataset
pub const SEED_BREED_COUNT: usize = 45;

/// Parse the embedded dataset into fresh breed definitions.
///
/// Each call returns an independent copy so a repopulation never shares state
/// with the previous generation.
pub fn seed_breeds() -> Result<Vec<NewDogBreed>> {
    serde_json::from_str(BREEDS_JSON).context("Failed to parse embedded breed dataset")
}
