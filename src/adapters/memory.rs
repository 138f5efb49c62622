//! In-memory venue storage. The whole venue lives behind one async lock;
//! `begin` clones the state, mutations run on the clone, and `commit` swaps
//! the clone back in after re-checking the constraints a database would
//! enforce with unique indexes. That re-check is the backstop for the window
//! between an occupancy lookup and the later insert: two transactions racing
//! for the same slot cannot both commit.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::model::{
    BoxKey, CategoryId, CategoryRef, Occupant, Seller, SellerFields, SellerId, StoreKey,
};
use crate::domain::ports::{VenueStore, VenueTx};
use crate::utils::error::{Result, VenueError};

#[derive(Debug, Clone)]
struct SellerRow {
    id: SellerId,
    name: String,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
struct BoxRow {
    seller: SellerId,
    key: BoxKey,
}

#[derive(Debug, Clone, PartialEq)]
struct StoreRow {
    seller: SellerId,
    key: StoreKey,
}

#[derive(Debug, Clone)]
struct VenueState {
    version: u64,
    next_seller_id: SellerId,
    next_category_id: CategoryId,
    sellers: BTreeMap<SellerId, SellerRow>,
    boxes: Vec<BoxRow>,
    stores: Vec<StoreRow>,
    categories: Vec<CategoryRef>,
    links: Vec<(SellerId, CategoryId)>,
}

impl VenueState {
    fn new() -> Self {
        Self {
            version: 0,
            next_seller_id: 1,
            next_category_id: 1,
            sellers: BTreeMap::new(),
            boxes: Vec::new(),
            stores: Vec::new(),
            categories: Vec::new(),
            links: Vec::new(),
        }
    }

    fn assemble(&self, row: &SellerRow) -> Seller {
        let boxes = self
            .boxes
            .iter()
            .filter(|b| b.seller == row.id)
            .map(|b| b.key)
            .collect();
        let stores = self
            .stores
            .iter()
            .filter(|s| s.seller == row.id)
            .map(|s| s.key)
            .collect();
        let product_categories = self
            .links
            .iter()
            .filter(|(seller, _)| *seller == row.id)
            .filter_map(|(_, category)| self.categories.iter().find(|c| c.id == *category))
            .cloned()
            .collect();

        Seller {
            id: row.id,
            name: row.name.clone(),
            phone_number: row.phone_number.clone(),
            boxes,
            stores,
            product_categories,
            created_at: row.created_at,
        }
    }

    /// The constraints a relational backend would hold as unique indexes.
    fn violated_constraint(&self) -> Option<&'static str> {
        let mut box_keys = HashSet::new();
        for row in &self.boxes {
            if !box_keys.insert(row.key) {
                return Some("boxes_identity_key");
            }
        }
        let mut store_keys = HashSet::new();
        for row in &self.stores {
            if !store_keys.insert(row.key) {
                return Some("stores_identity_key");
            }
        }
        let mut names = HashSet::new();
        for row in self.sellers.values() {
            if !names.insert(row.name.as_str()) {
                return Some("sellers_name_key");
            }
        }
        None
    }
}

#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<VenueState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(VenueState::new())),
        }
    }

    /// Registers a product category. Category management sits outside the
    /// allocation ports, so this is an adapter-level operation.
    pub async fn add_category(&self, name: &str) -> CategoryRef {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.categories.iter().find(|c| c.name == name) {
            return existing.clone();
        }
        let category = CategoryRef {
            id: state.next_category_id,
            name: name.to_string(),
        };
        state.next_category_id += 1;
        state.categories.push(category.clone());
        category
    }

    /// Counts of (box, store, category-association) rows referencing a seller
    /// id. Inspection hook for cascade checks.
    pub async fn rows_for_seller(&self, id: SellerId) -> (usize, usize, usize) {
        let state = self.state.lock().await;
        (
            state.boxes.iter().filter(|b| b.seller == id).count(),
            state.stores.iter().filter(|s| s.seller == id).count(),
            state.links.iter().filter(|(seller, _)| *seller == id).count(),
        )
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueStore for MemoryStore {
    async fn find_seller(&self, id: SellerId) -> Result<Option<Seller>> {
        let state = self.state.lock().await;
        Ok(state.sellers.get(&id).map(|row| state.assemble(row)))
    }

    async fn find_seller_by_name(&self, name: &str) -> Result<Option<Seller>> {
        let state = self.state.lock().await;
        Ok(state
            .sellers
            .values()
            .find(|row| row.name == name)
            .map(|row| state.assemble(row)))
    }

    async fn box_occupant(
        &self,
        key: &BoxKey,
        exclude: Option<SellerId>,
    ) -> Result<Option<Occupant>> {
        let state = self.state.lock().await;
        let owner = state
            .boxes
            .iter()
            .find(|row| row.key == *key && Some(row.seller) != exclude)
            .map(|row| row.seller);
        Ok(owner.and_then(|id| {
            state.sellers.get(&id).map(|row| Occupant {
                id,
                name: row.name.clone(),
            })
        }))
    }

    async fn store_occupant(
        &self,
        key: &StoreKey,
        exclude: Option<SellerId>,
    ) -> Result<Option<Occupant>> {
        let state = self.state.lock().await;
        let owner = state
            .stores
            .iter()
            .find(|row| row.key == *key && Some(row.seller) != exclude)
            .map(|row| row.seller);
        Ok(owner.and_then(|id| {
            state.sellers.get(&id).map(|row| Occupant {
                id,
                name: row.name.clone(),
            })
        }))
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<CategoryRef>> {
        let state = self.state.lock().await;
        Ok(state.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn begin(&self) -> Result<Box<dyn VenueTx>> {
        let state = self.state.lock().await;
        Ok(Box::new(MemoryTx {
            shared: Arc::clone(&self.state),
            base_version: state.version,
            snapshot: state.clone(),
        }))
    }
}

pub struct MemoryTx {
    shared: Arc<Mutex<VenueState>>,
    snapshot: VenueState,
    base_version: u64,
}

#[async_trait]
impl VenueTx for MemoryTx {
    async fn create_seller(&mut self, fields: &SellerFields) -> Result<Seller> {
        let row = SellerRow {
            id: self.snapshot.next_seller_id,
            name: fields.name.clone(),
            phone_number: fields.phone_number.clone(),
            created_at: Utc::now(),
        };
        self.snapshot.next_seller_id += 1;
        self.snapshot.sellers.insert(row.id, row.clone());
        Ok(self.snapshot.assemble(&row))
    }

    async fn update_seller(&mut self, id: SellerId, fields: &SellerFields) -> Result<()> {
        let row = self
            .snapshot
            .sellers
            .get_mut(&id)
            .ok_or_else(|| VenueError::ConflictError {
                message: format!("seller {} disappeared mid-transaction", id),
            })?;
        row.name = fields.name.clone();
        row.phone_number = fields.phone_number.clone();
        Ok(())
    }

    async fn delete_seller(&mut self, id: SellerId) -> Result<bool> {
        let found = self.snapshot.sellers.remove(&id).is_some();
        if found {
            self.snapshot.boxes.retain(|row| row.seller != id);
            self.snapshot.stores.retain(|row| row.seller != id);
            self.snapshot.links.retain(|(seller, _)| *seller != id);
        }
        Ok(found)
    }

    async fn insert_boxes(&mut self, seller: SellerId, keys: &[BoxKey]) -> Result<()> {
        for key in keys {
            self.snapshot.boxes.push(BoxRow { seller, key: *key });
        }
        Ok(())
    }

    async fn delete_boxes(&mut self, seller: SellerId, keys: &[BoxKey]) -> Result<()> {
        self.snapshot
            .boxes
            .retain(|row| !(row.seller == seller && keys.contains(&row.key)));
        Ok(())
    }

    async fn insert_stores(&mut self, seller: SellerId, keys: &[StoreKey]) -> Result<()> {
        for key in keys {
            self.snapshot.stores.push(StoreRow { seller, key: *key });
        }
        Ok(())
    }

    async fn delete_stores(&mut self, seller: SellerId, keys: &[StoreKey]) -> Result<()> {
        self.snapshot
            .stores
            .retain(|row| !(row.seller == seller && keys.contains(&row.key)));
        Ok(())
    }

    async fn associate_categories(
        &mut self,
        seller: SellerId,
        categories: &[CategoryRef],
    ) -> Result<()> {
        for category in categories {
            let link = (seller, category.id);
            if !self.snapshot.links.contains(&link) {
                self.snapshot.links.push(link);
            }
        }
        Ok(())
    }

    async fn dissociate_categories(
        &mut self,
        seller: SellerId,
        categories: &[CategoryRef],
    ) -> Result<()> {
        self.snapshot
            .links
            .retain(|(owner, category)| !(*owner == seller && categories.iter().any(|c| c.id == *category)));
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        let mut state = self.shared.lock().await;
        if state.version != self.base_version {
            return Err(VenueError::ConflictError {
                message: "venue changed since the transaction began".to_string(),
            });
        }
        if let Some(constraint) = self.snapshot.violated_constraint() {
            return Err(VenueError::UniqueViolation {
                constraint: constraint.to_string(),
            });
        }
        self.snapshot.version = self.base_version + 1;
        *state = std::mem::replace(&mut self.snapshot, VenueState::new());
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        // The snapshot is simply dropped.
        Ok(())
    }
}
