use serde::{Deserialize, Serialize};

/// A bedroom record as received from the external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBedroom {
    #[serde(default, alias = "Available")]
    pub available: bool,
    #[serde(default, alias = "RoomSize")]
    pub room_size: Option<String>,
    #[serde(default, alias = "BedSize")]
    pub bed_size: Option<String>,
    #[serde(alias = "Rent")]
    pub rent: i32,
    #[serde(alias = "Deposit")]
    pub deposit: i32,
}

/// A property record as received from the external source.
///
/// Nothing here is trusted: every field may be missing and is only checked
/// when the record is turned into a [`Property`](crate::models::Property).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPropertyRecord {
    #[serde(default, alias = "PropertyType")]
    pub property_type: Option<String>,
    #[serde(default, alias = "Bedrooms")]
    pub bedrooms: Option<Vec<RawBedroom>>,
    #[serde(default, alias = "Photos")]
    pub photos: Option<Vec<Option<String>>>,
    #[serde(default, alias = "Country")]
    pub country: Option<String>,
}

/// One fetched batch. `None` entries are records the source sent as null.
pub type RawBatch = Vec<Option<RawPropertyRecord>>;
