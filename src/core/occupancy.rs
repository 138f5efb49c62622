//! Occupancy checks over the storage port. Lookups run one at a time in
//! submitted-array order so every conflict reports a stable positional index.

use crate::domain::model::{BoxKey, FieldError, SellerId, StoreKey};
use crate::domain::ports::VenueStore;
use crate::utils::error::Result;

pub async fn occupied_boxes<S: VenueStore + ?Sized>(
    store: &S,
    boxes: &[BoxKey],
    exclude: Option<SellerId>,
) -> Result<Vec<FieldError>> {
    let mut errors = Vec::new();
    for (index, key) in boxes.iter().enumerate() {
        if let Some(occupant) = store.box_occupant(key, exclude).await? {
            tracing::debug!(
                index,
                seller = occupant.id,
                "box slot already taken"
            );
            errors.push(FieldError::occupied(
                format!("sellingLocations.boxes.{}", index),
                occupant,
            ));
        }
    }
    Ok(errors)
}

pub async fn occupied_stores<S: VenueStore + ?Sized>(
    store: &S,
    stores: &[StoreKey],
    exclude: Option<SellerId>,
) -> Result<Vec<FieldError>> {
    let mut errors = Vec::new();
    for (index, key) in stores.iter().enumerate() {
        if let Some(occupant) = store.store_occupant(key, exclude).await? {
            tracing::debug!(
                index,
                seller = occupant.id,
                "store slot already taken"
            );
            errors.push(FieldError::occupied(
                format!("sellingLocations.stores.{}", index),
                occupant,
            ));
        }
    }
    Ok(errors)
}
