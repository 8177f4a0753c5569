pub mod breed;
pub mod common;

pub use breed::*;
pub use common::*;
