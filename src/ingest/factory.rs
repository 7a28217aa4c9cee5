//! Turns untrusted input into validated [`Property`] aggregates.
//!
//! Two shapes of input are accepted: a [`RawPropertyRecord`] fetched from
//! the external source, and the three row sets read back from storage.
//! Both go through [`assemble`], so a stored property is held to exactly
//! the same rules as a freshly ingested one.
//!
//! Rules are applied in a fixed order and the first violation is returned:
//!
//! 1. missing record, bedrooms or photos
//! 2. property type
//! 3. each bedroom in turn: room size, bed size, rent, deposit
//! 4. each photo URI
//! 5. country
//! 6. photo count
//! 7. bedroom count for the variant

use crate::error::ValidationError;
use crate::ingest::types::RawPropertyRecord;
use crate::models::{Bedroom, Country, Photo, Property, PropertyType};
use crate::storage::rows::{BedroomRow, PhotoRow, PropertyRow};

/// Builds a [`Property`] from a record fetched from the external source.
pub fn create(record: Option<&RawPropertyRecord>) -> Result<Property, ValidationError> {
    let record = record.ok_or(ValidationError::NullInput("record"))?;
    let raw_bedrooms = record
        .bedrooms
        .as_ref()
        .ok_or(ValidationError::NullInput("bedrooms"))?;
    let raw_photos = record
        .photos
        .as_ref()
        .ok_or(ValidationError::NullInput("photos"))?;

    let property_type = record
        .property_type
        .as_deref()
        .and_then(PropertyType::parse)
        .ok_or_else(|| {
            ValidationError::InvalidPropertyType(
                record.property_type.clone().unwrap_or_default(),
            )
        })?;

    // A null size or photo entry fails its rule as an empty value.
    let bedrooms = raw_bedrooms.iter().map(|b| {
        Bedroom::new(
            b.available,
            b.room_size.as_deref().unwrap_or_default(),
            b.bed_size.as_deref().unwrap_or_default(),
            b.rent,
            b.deposit,
        )
    });
    let photos = raw_photos
        .iter()
        .map(|uri| Photo::new(uri.as_deref().unwrap_or_default()));

    assemble(
        property_type,
        bedrooms,
        photos,
        record.country.as_deref().unwrap_or_default(),
    )
}

/// Rebuilds a stored [`Property`] from its property, bedroom and photo rows.
pub fn reconstitute(
    property: &PropertyRow,
    bedrooms: &[BedroomRow],
    photos: &[PhotoRow],
) -> Result<Property, ValidationError> {
    let property_type = PropertyType::from_code(property.property_type)
        .ok_or_else(|| ValidationError::InvalidPropertyType(property.property_type.to_string()))?;

    let bedrooms = bedrooms.iter().map(|row| {
        Bedroom::new(
            row.available,
            &row.room_size,
            &row.bed_size,
            row.rent,
            row.deposit,
        )
        .map(|bedroom| bedroom.persisted(row.bedroom_id, row.property_id))
    });
    let photos = photos.iter().map(|row| {
        Photo::new(&row.uri).map(|photo| photo.persisted(row.photo_id, row.property_id))
    });

    assemble(property_type, bedrooms, photos, &property.country)
        .map(|built| built.persisted(property.id, property.ingest_run_id))
}

fn assemble<B, P>(
    property_type: PropertyType,
    bedrooms: B,
    photos: P,
    country: &str,
) -> Result<Property, ValidationError>
where
    B: IntoIterator<Item = Result<Bedroom, ValidationError>>,
    P: IntoIterator<Item = Result<Photo, ValidationError>>,
{
    let bedrooms = bedrooms.into_iter().collect::<Result<Vec<_>, _>>()?;
    let photos = photos.into_iter().collect::<Result<Vec<_>, _>>()?;
    let country = Country::resolve(country)?;

    Property::new(property_type, bedrooms, photos, country)
}
