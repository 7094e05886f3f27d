use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use super::{expect_json, expect_success, ListQuery, RecipeStore};
use crate::error::StoreError;
use crate::types::{Recipe, RecipeData};

/// Client for the ad-hoc REST flavor of the data service.
///
/// The service exposes a single `recipes` collection with underscore range
/// parameters (`_sort`, `_order`, `_start`, `_limit`). It has no count
/// endpoint, so [`RecipeStore::count`] fetches the whole collection and
/// measures it.
pub struct RestStore {
    http: reqwest::Client,
    base: Url,
}

impl RestStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }
}

fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(field) = query.sort_by {
        params.push(("_sort", field.as_str().to_string()));
        params.push(("_order", query.direction.as_str().to_string()));
    }
    // Offset zero is the service default, so only send it when set.
    if query.offset > 0 {
        params.push(("_start", query.offset.to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("_limit", limit.to_string()));
    }
    params
}

#[async_trait]
impl RecipeStore for RestStore {
    async fn count(&self) -> Result<u64, StoreError> {
        let url = self.endpoint("recipes");
        tracing::debug!(%url, "counting recipes");
        let response = self.http.get(&url).send().await?;
        let all: Vec<Recipe> = expect_json(response).await?;
        Ok(all.len() as u64)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, StoreError> {
        let url = self.endpoint("recipes");
        tracing::debug!(%url, offset = query.offset, "listing recipes");
        let response = self
            .http
            .get(&url)
            .query(&list_params(query))
            .send()
            .await?;
        expect_json(response).await
    }

    async fn get(&self, id: &str) -> Result<Recipe, StoreError> {
        let url = self.endpoint(&format!("recipes/{id}"));
        tracing::debug!(%url, "fetching recipe");
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_json(response).await
    }

    async fn insert(&self, data: &RecipeData) -> Result<Recipe, StoreError> {
        let url = self.endpoint("recipes");
        tracing::debug!(%url, title = %data.title, "creating recipe");
        let response = self.http.post(&url).json(data).send().await?;
        expect_json(response).await
    }

    async fn update(&self, id: &str, data: &RecipeData) -> Result<Recipe, StoreError> {
        let url = self.endpoint(&format!("recipes/{id}"));
        tracing::debug!(%url, "updating recipe");
        let response = self.http.patch(&url).json(data).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_json(response).await
    }

    async fn set_order(&self, id: &str, order: i64) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("recipes/{id}"));
        tracing::debug!(%url, order, "setting recipe order");
        let response = self
            .http
            .patch(&url)
            .json(&serde_json::json!({ "order": order }))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_success(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.endpoint(&format!("recipes/{id}"));
        tracing::debug!(%url, "deleting recipe");
        let response = self.http.delete(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.to_string()));
        }
        expect_success(response).await
    }
}
