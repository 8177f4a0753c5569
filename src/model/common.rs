use uuid::Uuid;

pub type Id = String;

/// Generate a fresh opaque identifier for a stored record
pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}
