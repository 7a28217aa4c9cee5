use std::fmt;

use chrono::{DateTime, Utc};

use super::{Bedroom, Country, Photo};
use crate::error::ValidationError;

/// Maximum number of photos any property may have.
pub const MAX_NUMBER_OF_PHOTOS: usize = 14;

/// Allowed number of bedrooms for a property variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomRule {
    Exactly(usize),
    Between { min: usize, max: usize },
}

impl BedroomRule {
    pub fn allows(&self, count: usize) -> bool {
        match *self {
            BedroomRule::Exactly(exact) => count == exact,
            BedroomRule::Between { min, max } => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for BedroomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedroomRule::Exactly(exact) => write!(f, "exactly {exact} room"),
            BedroomRule::Between { min, max } => {
                write!(f, "at least {min} room up to a maximum of {max} rooms")
            }
        }
    }
}

/// The variant of a rental property.
///
/// The discriminants are the codes stored in the `Property.PropertyType`
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// A one-bedroom studio.
    Studio = 1,
    /// A single or multi-tenant apartment.
    Flat = 2,
    /// A multi-occupancy house.
    House = 3,
}

impl PropertyType {
    const ALL: [PropertyType; 3] = [PropertyType::Studio, PropertyType::Flat, PropertyType::House];

    /// Parses an exact variant name or its numeric code.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .or_else(|| value.parse::<i64>().ok().and_then(Self::from_code))
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Studio => "Studio",
            PropertyType::Flat => "Flat",
            PropertyType::House => "House",
        }
    }

    pub fn bedroom_rule(&self) -> BedroomRule {
        match self {
            PropertyType::Studio => BedroomRule::Exactly(1),
            PropertyType::Flat => BedroomRule::Between { min: 1, max: 14 },
            PropertyType::House => BedroomRule::Between { min: 1, max: 14 },
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property for rent, together with the bedrooms and photos it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    id: Option<i64>,
    property_type: PropertyType,
    bedrooms: Vec<Bedroom>,
    photos: Vec<Photo>,
    country: Country,
    last_updated: Option<DateTime<Utc>>,
}

impl Property {
    /// Builds a property, enforcing the photo limit and then the bedroom
    /// rule of its variant.
    pub fn new(
        property_type: PropertyType,
        bedrooms: Vec<Bedroom>,
        photos: Vec<Photo>,
        country: Country,
    ) -> Result<Self, ValidationError> {
        if photos.len() > MAX_NUMBER_OF_PHOTOS {
            return Err(ValidationError::InvalidPhotoCount {
                maximum: MAX_NUMBER_OF_PHOTOS,
                actual: photos.len(),
            });
        }

        let rule = property_type.bedroom_rule();
        if !rule.allows(bedrooms.len()) {
            return Err(ValidationError::InvalidBedroomCount {
                property_type,
                rule,
                actual: bedrooms.len(),
            });
        }

        Ok(Self {
            id: None,
            property_type,
            bedrooms,
            photos,
            country,
            last_updated: None,
        })
    }

    pub(crate) fn persisted(mut self, id: i64, last_updated: DateTime<Utc>) -> Self {
        self.id = Some(id);
        self.last_updated = Some(last_updated);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn bedrooms(&self) -> &[Bedroom] {
        &self.bedrooms
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn country(&self) -> Country {
        self.country
    }

    /// Run timestamp of the ingest that stored this property.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Rent of the cheapest available bedroom.
    pub fn price_from(&self) -> Option<u32> {
        self.bedrooms
            .iter()
            .filter(|bedroom| bedroom.available())
            .map(Bedroom::rent)
            .min()
    }
}
