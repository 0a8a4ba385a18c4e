//! HTTP implementation of the catalog and cart APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use turbo_commerce::prelude::*;

use crate::api::{routes, CartApi, CatalogApi};
use crate::FetchError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the storefront backend.
///
/// Every path is resolved against the base URL. Non-success statuses are
/// mapped through [`FetchError::from_status`], except where an endpoint
/// gives a status a non-error meaning (see the trait docs).
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
}

/// Builder for [`FetchClient`].
#[derive(Debug)]
pub struct FetchClientBuilder {
    base_url: String,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl FetchClientBuilder {
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn default_header(mut self, key: &str, value: &str) -> Result<Self, FetchError> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| FetchError::InvalidUrl(format!("header {}: {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::InvalidUrl(format!("header {}: {}", key, e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Add a bearer token authorization header to all requests.
    pub fn bearer_auth(self, token: &str) -> Result<Self, FetchError> {
        self.default_header(AUTHORIZATION.as_str(), &format!("Bearer {}", token))
    }

    /// Build the client.
    pub fn build(self) -> Result<FetchClient, FetchError> {
        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .build()?;
        Ok(FetchClient {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
        })
    }
}

impl FetchClient {
    /// Start building a client for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> FetchClientBuilder {
        FetchClientBuilder {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
        }
    }

    /// Create a client with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::builder(base_url).build()
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, FetchError> {
        let response = request.send().await?;
        tracing::debug!(status = %response.status(), url = %response.url(), "response");
        Ok(response)
    }

    /// Turn a response into `T`, or into the error its status maps to.
    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::from_status(status.as_u16(), message));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogApi for FetchClient {
    async fn get_items(&self) -> Result<Option<Vec<Product>>, FetchError> {
        let response = self
            .send(self.request(Method::GET, routes::PRODUCTS))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read(response).await.map(Some)
    }

    async fn get_item(&self, id: ProductId) -> Result<Product, FetchError> {
        let response = self
            .send(self.request(Method::GET, &routes::product(id)))
            .await?;
        Self::read(response).await.map_err(|e| match e {
            FetchError::BadRequest(msg) if msg.is_empty() => {
                FetchError::BadRequest(format!("no product with id {}", id))
            }
            other => other,
        })
    }

    async fn get_categories(&self) -> Result<Vec<ProductCategory>, FetchError> {
        let response = self
            .send(self.request(Method::GET, routes::CATEGORIES))
            .await?;
        Self::read(response).await
    }

    async fn get_items_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, FetchError> {
        let response = self
            .send(self.request(Method::GET, &routes::products_by_category(category_id)))
            .await?;
        Self::read(response).await
    }
}

#[async_trait]
impl CartApi for FetchClient {
    async fn get_items(&self, user_id: UserId) -> Result<Vec<CartItem>, FetchError> {
        let response = self
            .send(self.request(Method::GET, &routes::cart_items(user_id)))
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => Ok(Vec::new()),
            _ => Self::read(response).await,
        }
    }

    async fn add_item(&self, item: &CartItemToAdd) -> Result<CartItem, FetchError> {
        let response = self
            .send(self.request(Method::POST, routes::CART).json(item))
            .await?;
        Self::read(response).await
    }

    async fn update_qty(&self, update: &CartItemQtyUpdate) -> Result<CartItem, FetchError> {
        let response = self
            .send(
                self.request(Method::PATCH, &routes::cart_item(update.cart_item_id))
                    .json(update),
            )
            .await?;
        Self::read(response).await
    }

    async fn delete_item(&self, id: CartItemId) -> Result<CartItem, FetchError> {
        let response = self
            .send(self.request(Method::DELETE, &routes::cart_item(id)))
            .await?;
        Self::read(response).await
    }
}
