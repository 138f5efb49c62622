use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SellerId = u64;
pub type CategoryId = u64;

/// Color-coded venue zone. Decides which numeric and parity rule set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Blue,
    Orange,
    Red,
    Green,
    Yellow,
    White,
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sector::Blue => write!(f, "blue"),
            Sector::Orange => write!(f, "orange"),
            Sector::Red => write!(f, "red"),
            Sector::Green => write!(f, "green"),
            Sector::Yellow => write!(f, "yellow"),
            Sector::White => write!(f, "white"),
        }
    }
}

/// Box location identity: sector + street letter + box number.
/// Two keys are the same slot iff all three fields are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxKey {
    pub sector: Sector,
    pub street_letter: char,
    pub box_number: u16,
}

/// Store location identity: sector + block number + store number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreKey {
    pub sector: Sector,
    pub block_number: u8,
    pub store_number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    pub phone_number: Option<String>,
    pub boxes: Vec<BoxKey>,
    pub stores: Vec<StoreKey>,
    pub product_categories: Vec<CategoryRef>,
    pub created_at: DateTime<Utc>,
}

/// Scalar columns of a seller row, as handed to the storage transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerFields {
    pub name: String,
    pub phone_number: Option<String>,
}

/// Create/update request payload. Absent slot or category vectors on an
/// update mean "no change requested", not "remove everything".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerDraft {
    pub name: String,
    pub phone_number: Option<String>,
    pub boxes: Option<Vec<BoxKey>>,
    pub stores: Option<Vec<StoreKey>>,
    pub product_categories: Option<Vec<String>>,
}

impl SellerDraft {
    pub fn fields(&self) -> SellerFields {
        SellerFields {
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Invalid,
    TooBig,
    TooShort,
    AlreadyInUse,
    NotFound,
    LocationOccupied,
    MissingSellingLocation,
}

/// Current owner of a slot, carried on occupancy conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: SellerId,
    pub name: String,
}

/// One recoverable validation failure. These are accumulated and returned as
/// data; infrastructure failures travel as `VenueError` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupied_by: Option<Occupant>,
}

impl FieldError {
    pub fn new(code: ErrorCode, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.map(str::to_string),
            message: message.into(),
            occupied_by: None,
        }
    }

    pub fn occupied(field: String, occupant: Occupant) -> Self {
        Self {
            code: ErrorCode::LocationOccupied,
            field: Some(field),
            message: "selling location is already occupied".to_string(),
            occupied_by: Some(occupant),
        }
    }
}

/// The `{ errors: [...] }` payload handed to the HTTP layer, with the status
/// it maps to. The status never goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    #[serde(skip)]
    pub status: u16,
    pub errors: Vec<FieldError>,
}
