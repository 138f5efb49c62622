use crate::domain::model::{
    BoxKey, CategoryRef, Occupant, Seller, SellerFields, SellerId, StoreKey,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read side of the storage collaborator. Every lookup is a storage
/// round-trip; nothing is cached in process.
#[async_trait]
pub trait VenueStore: Send + Sync {
    async fn find_seller(&self, id: SellerId) -> Result<Option<Seller>>;

    /// Case-sensitive exact name match.
    async fn find_seller_by_name(&self, name: &str) -> Result<Option<Seller>>;

    /// Current owner of a box slot, skipping `exclude` so a seller never
    /// conflicts with its own locations during an update.
    async fn box_occupant(&self, key: &BoxKey, exclude: Option<SellerId>)
        -> Result<Option<Occupant>>;

    async fn store_occupant(
        &self,
        key: &StoreKey,
        exclude: Option<SellerId>,
    ) -> Result<Option<Occupant>>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<CategoryRef>>;

    async fn begin(&self) -> Result<Box<dyn VenueTx>>;
}

/// Write side. All mutations happen inside a transaction; nothing is visible
/// to readers until `commit`. Dropping a transaction without committing
/// discards it.
#[async_trait]
pub trait VenueTx: Send {
    async fn create_seller(&mut self, fields: &SellerFields) -> Result<Seller>;

    async fn update_seller(&mut self, id: SellerId, fields: &SellerFields) -> Result<()>;

    /// Deletes the seller row and cascades to its boxes, stores and category
    /// associations. Returns false when the id is unknown.
    async fn delete_seller(&mut self, id: SellerId) -> Result<bool>;

    async fn insert_boxes(&mut self, seller: SellerId, keys: &[BoxKey]) -> Result<()>;

    async fn delete_boxes(&mut self, seller: SellerId, keys: &[BoxKey]) -> Result<()>;

    async fn insert_stores(&mut self, seller: SellerId, keys: &[StoreKey]) -> Result<()>;

    async fn delete_stores(&mut self, seller: SellerId, keys: &[StoreKey]) -> Result<()>;

    async fn associate_categories(
        &mut self,
        seller: SellerId,
        categories: &[CategoryRef],
    ) -> Result<()>;

    async fn dissociate_categories(
        &mut self,
        seller: SellerId,
        categories: &[CategoryRef],
    ) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}
