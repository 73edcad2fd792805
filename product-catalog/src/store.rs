//! In-memory product store
//!
//! One ordered `Vec<Product>` plus the id counter, both behind a single mutex.
//! The lock is held for exactly one operation and never across an `.await`.
//! Ids start at 1 and are never handed out twice, even after a delete.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};

/// Message returned when an id has no matching record
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

#[derive(Debug)]
struct Inventory {
    products: Vec<Product>,
    next_id: u64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            next_id: 1,
        }
    }
}

impl Inventory {
    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

/// Shared handle to the product collection
///
/// Cloning is cheap; every clone sees the same products.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    inner: Arc<Mutex<Inventory>>,
}

impl ProductStore {
    /// Create an empty store whose first id will be 1
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inventory>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("Product store lock poisoned".to_string()))
    }

    /// All products in insertion order
    pub fn list(&self) -> Result<Vec<Product>> {
        Ok(self.lock()?.products.clone())
    }

    /// Number of stored products
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.products.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a new product, assigning the next id and the creation time
    pub fn create(&self, payload: ProductCreate) -> Result<Product> {
        let mut inventory = self.lock()?;

        let id = ProductId::new(inventory.next_id);
        inventory.next_id += 1;

        let product = Product {
            id,
            name: payload.name,
            price: payload.price,
            category: payload.category,
            created_at: now_millis(),
        };
        inventory.products.push(product.clone());

        Ok(product)
    }

    /// Merge `patch` into the product with `id`, in place
    pub fn update(&self, id: ProductId, patch: ProductUpdate) -> Result<Product> {
        let mut inventory = self.lock()?;

        let index = inventory
            .position(id)
            .ok_or_else(|| Error::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

        let product = &mut inventory.products[index];
        product.apply(patch);

        Ok(product.clone())
    }

    /// Remove the product with `id`, keeping the order of the rest
    pub fn delete(&self, id: ProductId) -> Result<()> {
        let mut inventory = self.lock()?;

        let index = inventory
            .position(id)
            .ok_or_else(|| Error::NotFound(PRODUCT_NOT_FOUND.to_string()))?;
        inventory.products.remove(index);

        Ok(())
    }
}

// Serialized timestamps carry milliseconds, so stored ones do too.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn payload(name: &str, price: f64, category: Category) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            price,
            category,
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = ProductStore::new();
        let first = store.create(payload("Laptop", 1299.99, Category::Electronics)).unwrap();
        let second = store.create(payload("Jacket", 89.5, Category::Clothing)).unwrap();

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(first.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = ProductStore::new();
        for name in ["Alpha", "Bravo", "Charlie"] {
            store.create(payload(name, 1.0, Category::Books)).unwrap();
        }

        let names: Vec<String> = store.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = ProductStore::new();
        let first = store.create(payload("Laptop", 10.0, Category::Electronics)).unwrap();
        store.delete(first.id).unwrap();

        let second = store.create(payload("Tablet", 10.0, Category::Electronics)).unwrap();
        assert_eq!(second.id, ProductId::new(2));
        assert!(second.id > first.id);
    }

    #[test]
    fn test_update_merges_only_present_fields() {
        let store = ProductStore::new();
        let original = store.create(payload("Laptop", 1299.99, Category::Electronics)).unwrap();

        let updated = store
            .update(
                original.id,
                ProductUpdate {
                    price: Some(999.99),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "Laptop");
        assert_eq!(updated.category, Category::Electronics);
        assert_eq!(updated.price, 999.99);
        assert_eq!(store.list().unwrap(), vec![updated]);
    }

    #[test]
    fn test_update_keeps_position() {
        let store = ProductStore::new();
        let a = store.create(payload("Alpha", 1.0, Category::Books)).unwrap();
        let b = store.create(payload("Bravo", 1.0, Category::Books)).unwrap();
        let c = store.create(payload("Charlie", 1.0, Category::Books)).unwrap();

        store
            .update(
                b.id,
                ProductUpdate {
                    name: Some("Bravissimo".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let ids: Vec<ProductId> = store.list().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
        assert_eq!(store.list().unwrap()[1].name, "Bravissimo");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let store = ProductStore::new();
        let original = store.create(payload("Laptop", 5.0, Category::Electronics)).unwrap();
        let updated = store.update(original.id, ProductUpdate::default()).unwrap();
        assert_eq!(updated, original);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let store = ProductStore::new();
        store.create(payload("Laptop", 5.0, Category::Electronics)).unwrap();
        let before = store.list().unwrap();

        let err = store
            .update(ProductId::new(99), ProductUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(ref msg) if msg == PRODUCT_NOT_FOUND));
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let store = ProductStore::new();
        let a = store.create(payload("Alpha", 1.0, Category::Books)).unwrap();
        let b = store.create(payload("Bravo", 1.0, Category::Books)).unwrap();
        let c = store.create(payload("Charlie", 1.0, Category::Books)).unwrap();

        store.delete(b.id).unwrap();

        let ids: Vec<ProductId> = store.list().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);

        let err = store.delete(b.id).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ProductStore::new();
        let handle = store.clone();
        handle.create(payload("Laptop", 5.0, Category::Electronics)).unwrap();
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_internal_error() {
        let store = ProductStore::new();
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the store");
        })
        .join();

        let err = store.list().unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
