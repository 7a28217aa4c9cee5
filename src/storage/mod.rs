pub mod repository;
pub mod rows;
pub mod schema;

pub use repository::{PropertiesRepository, PropertyStore};
pub use rows::{BedroomRow, PhotoRow, PropertyRow};
