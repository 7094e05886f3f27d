//! Clients for the external recipe data service.
//!
//! [`RecipeStore`] is the seam the view layer talks through. Two HTTP
//! flavors implement it ([`RestStore`] for the ad-hoc REST service,
//! [`TableStore`] for the hosted table store) plus [`MemoryStore`], an
//! in-process fake for tests. Calls are single request/response round
//! trips: no retries, and no timeouts beyond the transport defaults.

mod config;
mod memory;
mod rest;
mod table;

pub use config::{
    Backend, ConfigError, StoreConfig, DEFAULT_API_URL, DEFAULT_CONTACT_URL, DEFAULT_TABLE,
};
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use table::TableStore;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::StoreError;
use crate::types::{Recipe, RecipeData};

/// Field the service can sort a range read by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Order,
    LastUpdated,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Order => "order",
            SortField::LastUpdated => "lastUpdated",
        }
    }
}

/// Sort direction for a range read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// A range read over the recipe collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by: Option<SortField>,
    pub direction: Direction,
    pub offset: u64,
    pub limit: Option<u64>,
}

impl ListQuery {
    /// One page of records ordered by manual position, ascending.
    pub fn page(offset: u64, limit: u64) -> Self {
        ListQuery {
            sort_by: Some(SortField::Order),
            direction: Direction::Asc,
            offset,
            limit: Some(limit),
        }
    }
}

/// Interface to the recipe collection.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Total number of records in the collection.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Read a range of records.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, StoreError>;

    /// Fetch a single record by id.
    async fn get(&self, id: &str) -> Result<Recipe, StoreError>;

    /// Insert a new record. The service assigns the id.
    async fn insert(&self, data: &RecipeData) -> Result<Recipe, StoreError>;

    /// Replace every field of an existing record.
    async fn update(&self, id: &str, data: &RecipeData) -> Result<Recipe, StoreError>;

    /// Partial update of the manual position field only.
    async fn set_order(&self, id: &str, order: i64) -> Result<(), StoreError>;

    /// Delete a record by id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Pass a successful response through, or turn a failure status into
/// [`StoreError::Api`] with whatever message the body carries.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.is_empty() => "request failed".to_string(),
        Err(_) => body,
    };
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

pub(crate) async fn expect_json<T>(response: reqwest::Response) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned,
{
    let body = check_status(response).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

pub(crate) async fn expect_success(response: reqwest::Response) -> Result<(), StoreError> {
    check_status(response).await?;
    Ok(())
}
