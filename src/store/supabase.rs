use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use super::{Filter, Query, RecordStore};
use crate::config::SupabaseConfig;
use crate::error::RecipeError;
use crate::providers::http_client;

/// Record store backed by a hosted PostgREST endpoint
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl SupabaseStore {
    /// Create a store from configuration, preferring the service role key.
    pub fn new(config: &SupabaseConfig, timeout_secs: u64) -> Result<Self, RecipeError> {
        let api_key = config
            .service_role_key
            .clone()
            .or_else(|| config.anon_key.clone())
            .or_else(|| std::env::var("SUPABASE_KEY").ok())
            .ok_or_else(|| {
                RecipeError::StoreError("Supabase key not found in config or environment".into())
            })?;

        Ok(SupabaseStore {
            client: http_client(timeout_secs)?,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
            access_token: None,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SupabaseStore {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token: None,
        }
    }

    /// Send requests on behalf of a signed-in user instead of the project key.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn request(&self, method: reqwest::Method, table: &str) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    async fn checked(response: Response) -> Result<Response, RecipeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RecipeError::StoreError(format!(
            "Request failed with status {}: {}",
            status, body
        )))
    }
}

fn filter_param(filter: &Filter) -> (String, String) {
    let (op, value) = match filter {
        Filter::Eq(_, v) => ("eq", v),
        Filter::Gte(_, v) => ("gte", v),
        Filter::Lte(_, v) => ("lte", v),
    };
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (filter.column().to_string(), format!("{}.{}", op, value))
}

fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if !query.columns.is_empty() {
        params.push(("select".to_string(), query.columns.join(",")));
    }
    params.extend(query.filters.iter().map(filter_param));
    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(|o| format!("{}.{}", o.column, if o.descending { "desc" } else { "asc" }))
            .collect::<Vec<_>>()
            .join(",");
        params.push(("order".to_string(), order));
    }
    params
}

// PostgREST answers writes with an array of affected rows.
fn first_row(body: Value) -> Result<Value, RecipeError> {
    match body {
        Value::Array(rows) => rows
            .into_iter()
            .next()
            .ok_or_else(|| RecipeError::StoreError("No rows returned".to_string())),
        row @ Value::Object(_) => Ok(row),
        other => Err(RecipeError::StoreError(format!(
            "Unexpected response: {}",
            other
        ))),
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RecipeError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        let body: Value = Self::checked(response).await?.json().await?;
        debug!("Inserted into {}: {:?}", table, body);
        first_row(body)
    }

    async fn update(&self, table: &str, id: &str, changes: Value) -> Result<Value, RecipeError> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&changes)
            .send()
            .await?;

        let body: Value = Self::checked(response).await?.json().await?;
        first_row(body)
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), RecipeError> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        Self::checked(response).await?;
        debug!("Deleted {} from {}", id, table);
        Ok(())
    }

    async fn query(&self, table: &str, query: &Query) -> Result<Vec<Value>, RecipeError> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&query_params(query))
            .send()
            .await?;

        let body: Value = Self::checked(response).await?.json().await?;
        match body {
            Value::Array(rows) => Ok(rows),
            other => Err(RecipeError::StoreError(format!(
                "Expected an array of rows, got {}",
                other
            ))),
        }
    }
}
