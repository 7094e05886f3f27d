use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use super::{expect_json, expect_success, ListQuery, RecipeStore};
use crate::error::StoreError;
use crate::types::{Recipe, RecipeData};

/// Client for the hosted table-store flavor of the data service.
///
/// Rows live under `tables/{table}/rows`, range reads return a
/// `{"total": .., "rows": [..]}` envelope, and an optional API key is sent
/// as `X-API-Key`.
pub struct TableStore {
    http: reqwest::Client,
    base: Url,
    table: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RowsEnvelope {
    total: u64,
    rows: Vec<Recipe>,
}

impl TableStore {
    pub fn new(base_url: &str, table: &str, api_key: Option<String>) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            table: table.to_string(),
            api_key,
        })
    }

    fn rows_url(&self) -> String {
        format!(
            "{}/tables/{}/rows",
            self.base.as_str().trim_end_matches('/'),
            self.table
        )
    }

    fn row_url(&self, id: &str) -> String {
        format!("{}/{}", self.rows_url(), id)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.header("X-API-Key", key);
        }
        builder
    }
}

fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(field) = query.sort_by {
        params.push(("orderBy", field.as_str().to_string()));
        params.push(("direction", query.direction.as_str().to_string()));
    }
    if query.offset > 0 {
        params.push(("offset", query.offset.to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

#[async_trait]
impl RecipeStore for TableStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let url = self.rows_url();
        tracing::debug!(%url, "counting rows");
        // limit=0 returns the envelope with no rows, just the total.
        let response = self
            .request(reqwest::Method::GET, &url)
            .query(&[("limit", "0")])
            .send()
            .await?;
        let envelope: RowsEnvelope = expect_json(response).await?;
        Ok(envelope.total)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, StoreError> {
        let url = self.rows_url();
        tracing::debug!(%url, offset = query.offset, "listing rows");
        let response = self
            .request(reqwest::Method::GET, &url)
            .query(&list_params(query))
            .send()
            .await?;
        let envelope: RowsEnvelope = expect_json(response).await?;
        Ok(envelope.rows)
    }

    async fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        let url = self.row_url(id);
        tracing::debug!(%url, "fetching row");
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_json(response).await
    }

    async fn insert(&self, data: &RecipeData) -> Result<Recipe, StoreError> {
        let url = self.rows_url();
        tracing::debug!(%url, title = %data.title, "inserting row");
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(data)
            .send()
            .await?;
        expect_json(response).await
    }

    async fn update(&self, id: &str, data: &RecipeData) -> Result<Recipe, StoreError> {
        let url = self.row_url(id);
        tracing::debug!(%url, "updating row");
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(data)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_json(response).await
    }

    async fn set_order(&self, id: &str, order: i64) -> Result<(), StoreError> {
        let url = self.row_url(id);
        tracing::debug!(%url, order, "setting row order");
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&serde_json::json!({ "order": order }))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_success(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.row_url(id);
        tracing::debug!(%url, "deleting row");
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_success(response).await
    }
}
