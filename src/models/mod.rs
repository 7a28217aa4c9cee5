//! Domain model for rental properties.
//!
//! A [`Property`] is the aggregate root: it exclusively owns its
//! [`Bedroom`]s and [`Photo`]s and refers to a shared [`Country`]. Every
//! constructor validates its business rules, so a value of any of these
//! types is always well formed.

pub mod bedroom;
pub mod country;
pub mod photo;
pub mod property;

pub use bedroom::{BedSize, Bedroom, CurrencyField, RoomSize};
pub use country::Country;
pub use photo::Photo;
pub use property::{BedroomRule, Property, PropertyType, MAX_NUMBER_OF_PHOTOS};
