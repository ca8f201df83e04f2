//! REST adapter: authoritative reads behind the refetch machinery.
//!
//! The realtime stream only signals that something changed; the data a
//! screen renders always comes from these endpoints. Each endpoint gets
//! a small [`Fetch`] wrapper so a [`ScreenState`](crate::application::ScreenState)
//! can own it without knowing about HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::domain::events::{InventoryAlert, OrderSummary, TableSummary};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::Fetch;

/// HTTP client for the backend's read endpoints.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<SecretString>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, bearer: Option<SecretString>) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer,
        })
    }

    /// Orders currently on the kitchen display.
    pub async fn active_orders(&self) -> Result<Vec<OrderSummary>, DomainError> {
        self.get_json("/api/kds/orders/active").await
    }

    /// Every table with its current occupancy state.
    pub async fn tables(&self) -> Result<Vec<TableSummary>, DomainError> {
        self.get_json("/api/tables/").await
    }

    /// Inventory items at or below their reorder threshold.
    pub async fn low_stock(&self) -> Result<Vec<InventoryAlert>, DomainError> {
        self.get_json("/api/inventory/items/low-stock").await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        let url = self.endpoint(path);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::new(ErrorCode::ApiError, e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::new(ErrorCode::ApiError, e.to_string()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::new(ErrorCode::DecodeError, e.to_string()))
    }
}

/// Fetches the kitchen display's active orders.
pub struct ActiveOrders(pub Arc<ApiClient>);

#[async_trait]
impl Fetch for ActiveOrders {
    type Output = Vec<OrderSummary>;

    async fn fetch(&self) -> Result<Self::Output, DomainError> {
        self.0.active_orders().await
    }
}

/// Fetches the floor plan's table states.
pub struct Tables(pub Arc<ApiClient>);

#[async_trait]
impl Fetch for Tables {
    type Output = Vec<TableSummary>;

    async fn fetch(&self) -> Result<Self::Output, DomainError> {
        self.0.tables().await
    }
}

/// Fetches the low-stock inventory list.
pub struct LowStock(pub Arc<ApiClient>);

#[async_trait]
impl Fetch for LowStock {
    type Output = Vec<InventoryAlert>;

    async fn fetch(&self) -> Result<Self::Output, DomainError> {
        self.0.low_stock().await
    }
}
