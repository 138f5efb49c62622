pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::memory::MemoryStore;
pub use crate::core::service::{Outcome, SellerService};
pub use crate::core::validate::SellerValidator;
pub use crate::domain::model::{
    BoxKey, CategoryRef, ErrorCode, ErrorReport, FieldError, Occupant, Sector, Seller,
    SellerDraft, SellerId, StoreKey,
};
pub use crate::domain::ports::{VenueStore, VenueTx};
pub use crate::utils::error::{Result, VenueError};
