//! Seller allocation service. Validates a request, reduces an update to its
//! minimal slot/category changeset and applies it through one storage
//! transaction. Any storage failure rolls the whole transaction back and
//! propagates as `VenueError`; nothing partial ever becomes visible.

use crate::core::diff::{diff, diff_categories, Diff};
use crate::core::validate::{status_for, SellerValidator};
use crate::domain::model::{
    BoxKey, CategoryRef, ErrorCode, ErrorReport, FieldError, Seller, SellerDraft, SellerId,
    StoreKey,
};
use crate::domain::ports::{VenueStore, VenueTx};
use crate::utils::error::{Result, VenueError};
use tracing::{error, info};

#[derive(Debug)]
pub enum Outcome {
    Created(Seller),
    Updated(Seller),
    Rejected(ErrorReport),
}

impl Outcome {
    pub fn status(&self) -> u16 {
        match self {
            Outcome::Created(_) => 201,
            Outcome::Updated(_) => 200,
            Outcome::Rejected(report) => report.status,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Rejected(_))
    }
}

pub struct SellerService<S: VenueStore> {
    store: S,
}

impl<S: VenueStore> SellerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get(&self, id: SellerId) -> Result<Option<Seller>> {
        self.store.find_seller(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Seller>> {
        self.store.find_seller_by_name(name).await
    }

    pub async fn create(&self, draft: &SellerDraft) -> Result<Outcome> {
        let errors = SellerValidator::new(&self.store)
            .validate_create(draft)
            .await?;
        if !errors.is_empty() {
            return Ok(rejected(errors));
        }

        let categories = self
            .resolve_categories(draft.product_categories.as_deref().unwrap_or_default())
            .await?;

        let mut tx = self.store.begin().await?;
        match apply_create(tx.as_mut(), draft, &categories).await {
            Ok(seller) => {
                tx.commit().await?;
                info!(id = seller.id, name = %seller.name, "created seller");
                Ok(Outcome::Created(seller))
            }
            Err(err) => abort(tx, err).await,
        }
    }

    pub async fn update(&self, id: SellerId, draft: &SellerDraft) -> Result<Outcome> {
        // Unknown id short-circuits every other check.
        let Some(existing) = self.store.find_seller(id).await? else {
            return Ok(rejected(vec![FieldError::new(
                ErrorCode::NotFound,
                Some("id"),
                format!("seller {} does not exist", id),
            )]));
        };

        let errors = SellerValidator::new(&self.store)
            .validate_update(&existing, draft)
            .await?;
        if !errors.is_empty() {
            return Ok(rejected(errors));
        }

        let box_diff = diff(&existing.boxes, draft.boxes.as_deref());
        let store_diff = diff(&existing.stores, draft.stores.as_deref());
        let (added_names, removed_categories) = diff_categories(
            &existing.product_categories,
            draft.product_categories.as_deref(),
        );
        let added_categories = self.resolve_categories(&added_names).await?;

        let mut tx = self.store.begin().await?;
        let applied = apply_update(
            tx.as_mut(),
            &existing,
            draft,
            &box_diff,
            &store_diff,
            &added_categories,
            &removed_categories,
        )
        .await;
        match applied {
            Ok(seller) => {
                tx.commit().await?;
                info!(
                    id = seller.id,
                    boxes_added = box_diff.added.len(),
                    boxes_removed = box_diff.removed.len(),
                    stores_added = store_diff.added.len(),
                    stores_removed = store_diff.removed.len(),
                    "updated seller"
                );
                Ok(Outcome::Updated(seller))
            }
            Err(err) => abort(tx, err).await,
        }
    }

    /// Removes the seller and, by cascade, every box, store and category
    /// association it owns. Returns false for an unknown id.
    pub async fn delete(&self, id: SellerId) -> Result<bool> {
        let mut tx = self.store.begin().await?;
        match tx.delete_seller(id).await {
            Ok(found) => {
                tx.commit().await?;
                if found {
                    info!(id, "deleted seller");
                }
                Ok(found)
            }
            Err(err) => abort(tx, err).await,
        }
    }

    /// All names were checked during validation; a category vanishing between
    /// validation and here is a storage race and aborts the operation.
    async fn resolve_categories(&self, names: &[String]) -> Result<Vec<CategoryRef>> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            match self.store.find_category_by_name(name).await? {
                Some(category) => resolved.push(category),
                None => {
                    return Err(VenueError::ConflictError {
                        message: format!("product category '{}' no longer exists", name),
                    })
                }
            }
        }
        Ok(resolved)
    }
}

fn rejected(errors: Vec<FieldError>) -> Outcome {
    Outcome::Rejected(ErrorReport {
        status: status_for(&errors),
        errors,
    })
}

async fn abort<T>(tx: Box<dyn VenueTx>, err: VenueError) -> Result<T> {
    error!("transaction aborted: {}", err);
    if let Err(rollback_err) = tx.rollback().await {
        error!("rollback failed: {}", rollback_err);
    }
    Err(err)
}

async fn apply_create(
    tx: &mut dyn VenueTx,
    draft: &SellerDraft,
    categories: &[CategoryRef],
) -> Result<Seller> {
    let mut seller = tx.create_seller(&draft.fields()).await?;

    let boxes = draft.boxes.clone().unwrap_or_default();
    let stores = draft.stores.clone().unwrap_or_default();
    if !boxes.is_empty() {
        tx.insert_boxes(seller.id, &boxes).await?;
    }
    if !stores.is_empty() {
        tx.insert_stores(seller.id, &stores).await?;
    }
    if !categories.is_empty() {
        tx.associate_categories(seller.id, categories).await?;
    }

    seller.boxes = boxes;
    seller.stores = stores;
    seller.product_categories = categories.to_vec();
    Ok(seller)
}

#[allow(clippy::too_many_arguments)]
async fn apply_update(
    tx: &mut dyn VenueTx,
    existing: &Seller,
    draft: &SellerDraft,
    box_diff: &Diff<BoxKey>,
    store_diff: &Diff<StoreKey>,
    added_categories: &[CategoryRef],
    removed_categories: &[CategoryRef],
) -> Result<Seller> {
    tx.update_seller(existing.id, &draft.fields()).await?;

    if !box_diff.added.is_empty() {
        tx.insert_boxes(existing.id, &box_diff.added).await?;
    }
    if !box_diff.removed.is_empty() {
        tx.delete_boxes(existing.id, &box_diff.removed).await?;
    }
    if !store_diff.added.is_empty() {
        tx.insert_stores(existing.id, &store_diff.added).await?;
    }
    if !store_diff.removed.is_empty() {
        tx.delete_stores(existing.id, &store_diff.removed).await?;
    }
    if !added_categories.is_empty() {
        tx.associate_categories(existing.id, added_categories).await?;
    }
    if !removed_categories.is_empty() {
        tx.dissociate_categories(existing.id, removed_categories)
            .await?;
    }

    let mut seller = existing.clone();
    seller.name = draft.name.clone();
    seller.phone_number = draft.phone_number.clone();
    if let Some(boxes) = &draft.boxes {
        seller.boxes = boxes.clone();
    }
    if let Some(stores) = &draft.stores {
        seller.stores = stores.clone();
    }
    seller
        .product_categories
        .retain(|c| !removed_categories.contains(c));
    seller.product_categories.extend_from_slice(added_categories);
    Ok(seller)
}
