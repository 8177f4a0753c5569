use crate::model::{generate_id, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry describing one dog breed.
///
/// Records are written only by a full repopulation and never updated in place,
/// so every field is fixed once the record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogBreed {
    pub id: Id,
    pub name: String,
    pub size: String,
    pub temperament: String, // Comma-separated descriptive terms
    pub origin: String,
    pub lifespan: String,
    pub weight: String,
    pub height: String,
    pub care_level: String,
    pub exercise_needs: String,
    pub good_with_kids: bool,
    pub good_with_pets: bool,
    pub grooming_needs: String,
    pub image_url: String,
    pub description: String,
    pub health_issues: Vec<String>, // Insertion order preserved
    pub breed_group: String,
    pub created_at: DateTime<Utc>,
}

impl DogBreed {
    /// True when `needle` (already lower-cased) occurs in one of the searchable fields
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.temperament, &self.breed_group, &self.size]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Breed data without server-generated fields, as found in the seed dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewDogBreed {
    #[serde(default)]
    pub id: Option<Id>,
    pub name: String,
    pub size: String,
    pub temperament: String,
    pub origin: String,
    pub lifespan: String,
    pub weight: String,
    pub height: String,
    pub care_level: String,
    pub exercise_needs: String,
    pub good_with_kids: bool,
    pub good_with_pets: bool,
    pub grooming_needs: String,
    pub image_url: String,
    pub description: String,
    pub health_issues: Vec<String>,
    pub breed_group: String,
}

impl NewDogBreed {
    /// Convert to a full DogBreed, keeping a supplied id or generating a new one
    pub fn into_breed(self) -> DogBreed {
        DogBreed {
            id: self.id.unwrap_or_else(generate_id),
            name: self.name,
            size: self.size,
            temperament: self.temperament,
            origin: self.origin,
            lifespan: self.lifespan,
            weight: self.weight,
            height: self.height,
            care_level: self.care_level,
            exercise_needs: self.exercise_needs,
            good_with_kids: self.good_with_kids,
            good_with_pets: self.good_with_pets,
            grooming_needs: self.grooming_needs,
            image_url: self.image_url,
            description: self.description,
            health_issues: self.health_issues,
            breed_group: self.breed_group,
            created_at: Utc::now(),
        }
    }
}
