pub mod diff;
pub mod geometry;
pub mod occupancy;
pub mod service;
pub mod validate;

pub use crate::domain::model::{BoxKey, FieldError, Seller, SellerDraft, StoreKey};
pub use crate::domain::ports::{VenueStore, VenueTx};
pub use crate::utils::error::Result;
