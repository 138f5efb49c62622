//! End-to-end create/update validation. Each phase appends to one ordered
//! error list; recoverable findings never abort the remaining phases. The only
//! exceptions are the ones the rules demand: geometry failures suppress all
//! occupancy lookups, and an unknown seller id on update short-circuits
//! everything.

use crate::core::{geometry, occupancy};
use crate::domain::model::{ErrorCode, FieldError, Seller, SellerDraft, SellerId};
use crate::domain::ports::VenueStore;
use crate::utils::error::Result;
use regex::Regex;

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 255;

pub struct SellerValidator<'a, S: VenueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: VenueStore + ?Sized> SellerValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn validate_create(&self, draft: &SellerDraft) -> Result<Vec<FieldError>> {
        self.validate(draft, None).await
    }

    /// Same phases as create, with the seller's own id excluded from name
    /// uniqueness and from every occupancy lookup.
    pub async fn validate_update(
        &self,
        seller: &Seller,
        draft: &SellerDraft,
    ) -> Result<Vec<FieldError>> {
        self.validate(draft, Some(seller.id)).await
    }

    async fn validate(&self, draft: &SellerDraft, own_id: Option<SellerId>) -> Result<Vec<FieldError>> {
        let mut errors = shape_errors(draft);
        errors.extend(self.name_conflict(draft, own_id).await?);
        errors.extend(missing_location(draft));

        let boxes = draft.boxes.as_deref().unwrap_or_default();
        let stores = draft.stores.as_deref().unwrap_or_default();

        let mut layout = geometry::validate_boxes(boxes);
        layout.extend(geometry::validate_stores(stores));
        let layout_clean = layout.is_empty();
        errors.extend(layout);

        // Occupancy is only consulted once every candidate slot is known to be
        // geometrically legal; a single bad slot suppresses all lookups.
        if layout_clean {
            errors.extend(occupancy::occupied_boxes(self.store, boxes, own_id).await?);
            errors.extend(occupancy::occupied_stores(self.store, stores, own_id).await?);
        } else {
            tracing::debug!("skipping occupancy lookups, candidate slots failed layout rules");
        }

        errors.extend(self.unknown_categories(draft).await?);

        Ok(errors)
    }

    async fn name_conflict(
        &self,
        draft: &SellerDraft,
        own_id: Option<SellerId>,
    ) -> Result<Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(other) = self.store.find_seller_by_name(&draft.name).await? {
            if Some(other.id) != own_id {
                errors.push(FieldError::new(
                    ErrorCode::AlreadyInUse,
                    Some("name"),
                    format!("name '{}' is already in use", draft.name),
                ));
            }
        }
        Ok(errors)
    }

    async fn unknown_categories(&self, draft: &SellerDraft) -> Result<Vec<FieldError>> {
        let mut errors = Vec::new();
        for name in draft.product_categories.as_deref().unwrap_or_default() {
            if self.store.find_category_by_name(name).await?.is_none() {
                errors.push(FieldError::new(
                    ErrorCode::Invalid,
                    Some("productCategories"),
                    format!("product category '{}' does not exist", name),
                ));
            }
        }
        Ok(errors)
    }
}

fn shape_errors(draft: &SellerDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name_len = draft.name.chars().count();
    if name_len < NAME_MIN {
        errors.push(FieldError::new(
            ErrorCode::TooShort,
            Some("name"),
            format!("name must be at least {} characters", NAME_MIN),
        ));
    } else if name_len > NAME_MAX {
        errors.push(FieldError::new(
            ErrorCode::TooBig,
            Some("name"),
            format!("name must be at most {} characters", NAME_MAX),
        ));
    }

    if let Some(phone) = &draft.phone_number {
        let re = Regex::new(r"^[0-9]{10,11}$").unwrap();
        if !re.is_match(phone) {
            errors.push(FieldError::new(
                ErrorCode::Invalid,
                Some("phoneNumber"),
                "phone number must be a 10 or 11 digit string",
            ));
        }
    }

    errors
}

fn missing_location(draft: &SellerDraft) -> Vec<FieldError> {
    let no_boxes = draft.boxes.as_deref().map_or(true, |b| b.is_empty());
    let no_stores = draft.stores.as_deref().map_or(true, |s| s.is_empty());
    if no_boxes && no_stores {
        vec![FieldError::new(
            ErrorCode::MissingSellingLocation,
            Some("sellingLocations"),
            "a seller needs at least one box or store",
        )]
    } else {
        Vec::new()
    }
}

/// Translates an error list to the status the HTTP layer should answer with.
/// The whole list is scanned, not just the head.
pub fn status_for(errors: &[FieldError]) -> u16 {
    if errors.iter().any(|e| e.code == ErrorCode::NotFound) {
        404
    } else {
        400
    }
}
