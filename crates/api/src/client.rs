use std::time::Duration;

use async_trait::async_trait;
use griddle_core::config::BackendConfig;
use griddle_core::menu::MenuItem;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::info;

use crate::models::{CatalogResponse, CreateOrderRequest, OrderConfirmation, OrderRequestLine};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("order backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("order backend returned status {status} for {endpoint}")]
    Status { endpoint: &'static str, status: u16 },
}

/// Seam for the one external write. The create-order tool depends on this
/// trait so submission outcomes can be scripted in tests.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn create_order(&self, items: &[OrderRequestLine])
        -> Result<OrderConfirmation, ApiError>;
}

pub struct OrderApiClient {
    http: Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl OrderApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Fetches the full menu. Called exactly once per session; a failure
    /// here is fatal to startup (there is no cached fallback).
    pub async fn fetch_catalog(&self) -> Result<Vec<MenuItem>, ApiError> {
        let url = format!("{}/api/catalog", self.base_url);
        let response = self.authorize(self.http.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "catalog",
                status: response.status().as_u16(),
            });
        }

        let catalog: CatalogResponse = response.json().await?;
        info!(item_count = catalog.items.len(), "catalog loaded from order backend");
        Ok(catalog.items)
    }
}

#[async_trait]
impl OrderSubmitter for OrderApiClient {
    async fn create_order(
        &self,
        items: &[OrderRequestLine],
    ) -> Result<OrderConfirmation, ApiError> {
        let url = format!("{}/api/orders", self.base_url);
        let body = CreateOrderRequest { items: items.to_vec() };
        let response = self.authorize(self.http.post(&url).json(&body)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status { endpoint: "orders", status: response.status().as_u16() });
        }

        let confirmation: OrderConfirmation = response.json().await?;
        info!(
            order_id = %confirmation.order_id,
            total = %confirmation.total,
            status = %confirmation.status,
            "order accepted by backend"
        );
        Ok(confirmation)
    }
}
