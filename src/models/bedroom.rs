use std::fmt;

use crate::error::ValidationError;

/// Size of a bedroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSize {
    Small,
    Medium,
    Large,
}

impl RoomSize {
    const ALL: [RoomSize; 3] = [RoomSize::Small, RoomSize::Medium, RoomSize::Large];

    /// Case-insensitive parse of a room size description.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(value))
    }

    /// Canonical lowercase form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomSize::Small => "small",
            RoomSize::Medium => "medium",
            RoomSize::Large => "large",
        }
    }
}

/// Size of the bed in a bedroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedSize {
    Single,
    Double,
    KingSize,
}

impl BedSize {
    const ALL: [BedSize; 3] = [BedSize::Single, BedSize::Double, BedSize::KingSize];

    /// Case-insensitive parse of a bed size description.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(value))
    }

    /// Canonical lowercase form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BedSize::Single => "single",
            BedSize::Double => "double",
            BedSize::KingSize => "king size",
        }
    }
}

/// Which currency amount of a bedroom was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyField {
    Rent,
    Deposit,
}

impl fmt::Display for CurrencyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyField::Rent => f.write_str("Rent"),
            CurrencyField::Deposit => f.write_str("Deposit"),
        }
    }
}

/// A bedroom for rent inside a property.
///
/// `id` and `property_id` are only set once the bedroom has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bedroom {
    id: Option<i64>,
    property_id: Option<i64>,
    available: bool,
    room_size: RoomSize,
    bed_size: BedSize,
    rent: u32,
    deposit: u32,
}

impl Bedroom {
    /// Validates and builds a bedroom.
    ///
    /// Rules are checked in order: room size, bed size, rent, deposit.
    pub fn new(
        available: bool,
        room_size: &str,
        bed_size: &str,
        rent: i32,
        deposit: i32,
    ) -> Result<Self, ValidationError> {
        let room_size = RoomSize::parse(room_size)
            .ok_or_else(|| ValidationError::InvalidRoomSize(room_size.to_string()))?;
        let bed_size = BedSize::parse(bed_size)
            .ok_or_else(|| ValidationError::InvalidBedSize(bed_size.to_string()))?;
        let rent = non_negative(CurrencyField::Rent, rent)?;
        let deposit = non_negative(CurrencyField::Deposit, deposit)?;

        Ok(Self {
            id: None,
            property_id: None,
            available,
            room_size,
            bed_size,
            rent,
            deposit,
        })
    }

    pub(crate) fn persisted(mut self, id: i64, property_id: i64) -> Self {
        self.id = Some(id);
        self.property_id = Some(property_id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn property_id(&self) -> Option<i64> {
        self.property_id
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn room_size(&self) -> RoomSize {
        self.room_size
    }

    pub fn bed_size(&self) -> BedSize {
        self.bed_size
    }

    pub fn rent(&self) -> u32 {
        self.rent
    }

    pub fn deposit(&self) -> u32 {
        self.deposit
    }
}

fn non_negative(field: CurrencyField, value: i32) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::NegativeCurrency { field, value })
}
