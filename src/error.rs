use thiserror::Error;

use crate::models::{BedroomRule, CurrencyField, PropertyType};

/// A business rule violated while building a [`Property`](crate::models::Property).
///
/// Validation stops at the first violated rule, so each failure carries
/// exactly one reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be null.")]
    NullInput(&'static str),

    #[error("Property type '{0}' is not valid.")]
    InvalidPropertyType(String),

    #[error("Room size '{0}' is not valid.")]
    InvalidRoomSize(String),

    #[error("Bed size '{0}' is not valid.")]
    InvalidBedSize(String),

    #[error("{field} price '{value}' cannot be negative.")]
    NegativeCurrency { field: CurrencyField, value: i32 },

    #[error("'{0}' is not a supported country.")]
    InvalidCountry(String),

    #[error("Photo URI '{0}' is not valid.")]
    InvalidPhotoUri(String),

    #[error("{actual} exceeds the maximum number of photos ({maximum}).")]
    InvalidPhotoCount { maximum: usize, actual: usize },

    #[error("{property_type} properties must have {rule} but was passed {actual} rooms.")]
    InvalidBedroomCount {
        property_type: PropertyType,
        rule: BedroomRule,
        actual: usize,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("API Client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid stored property: {0}")]
    Validation(#[from] ValidationError),

    #[error("Property Id {0} not found.")]
    NotFound(i64),

    #[error("Generic error: {0}")]
    Generic(String),
}
