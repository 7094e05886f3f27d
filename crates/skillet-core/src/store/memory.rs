use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::{Direction, ListQuery, RecipeStore, SortField};
use crate::error::StoreError;
use crate::types::{Recipe, RecipeData};

/// In-process store for tests and offline runs.
///
/// Rows live behind a lock in insertion order; ids are minted UUIDs.
/// Failures can be scripted per operation to exercise error paths.
pub struct MemoryStore {
    rows: RwLock<Vec<Recipe>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    order_failures: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_recipes(Vec::new())
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            rows: RwLock::new(recipes),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            order_failures: RwLock::new(HashSet::new()),
        }
    }

    /// Make every read fail until cleared.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail until cleared.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `set_order` fail for one specific id.
    pub fn fail_order_for(&self, id: impl Into<String>) {
        self.order_failures.write().unwrap().insert(id.into());
    }

    /// Snapshot of the rows in insertion order.
    pub fn rows(&self) -> Vec<Recipe> {
        self.rows.read().unwrap().clone()
    }

    fn scripted() -> StoreError {
        StoreError::Api {
            status: 500,
            message: "scripted failure".to_string(),
        }
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::scripted());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::scripted());
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        self.check_read()?;
        Ok(self.rows.read().unwrap().len() as u64)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, StoreError> {
        self.check_read()?;
        let mut rows = self.rows.read().unwrap().clone();
        if let Some(field) = query.sort_by {
            match (field, query.direction) {
                (SortField::Order, Direction::Asc) => rows.sort_by(|a, b| a.order.cmp(&b.order)),
                (SortField::Order, Direction::Desc) => rows.sort_by(|a, b| b.order.cmp(&a.order)),
                (SortField::LastUpdated, Direction::Asc) => {
                    rows.sort_by(|a, b| a.last_updated.cmp(&b.last_updated))
                }
                (SortField::LastUpdated, Direction::Desc) => {
                    rows.sort_by(|a, b| b.last_updated.cmp(&a.last_updated))
                }
            }
        }
        Ok(rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit.unwrap_or(u64::MAX) as usize)
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        self.check_read()?;
        self.rows
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, data: &RecipeData) -> Result<Recipe, StoreError> {
        self.check_write()?;
        let recipe = Recipe::from_data(Uuid::new_v4().to_string(), data.clone());
        self.rows.write().unwrap().push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: &str, data: &RecipeData) -> Result<Recipe, StoreError> {
        self.check_write()?;
        let mut rows = self.rows.write().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        *slot = Recipe::from_data(id, data.clone());
        Ok(slot.clone())
    }

    async fn set_order(&self, id: &str, order: i64) -> Result<(), StoreError> {
        self.check_write()?;
        if self.order_failures.read().unwrap().contains(id) {
            return Err(Self::scripted());
        }
        let mut rows = self.rows.write().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        slot.order = order;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_write()?;
        let mut rows = self.rows.write().unwrap();
        let position = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        rows.remove(position);
        Ok(())
    }
}
