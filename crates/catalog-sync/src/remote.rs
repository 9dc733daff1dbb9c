//! HTTP client for the remote catalog service
//!
//! Two operations only: fetch the product list and submit a new product.
//! The fetch path carries the full error taxonomy; the submit path reports a
//! boolean outcome and never retries or inspects the response body beyond
//! transport success.

use crate::error::RemoteError;
use crate::models::Product;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the remote catalog client
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Catalog list endpoint (GET)
    pub fetch_url: String,
    /// Product submission endpoint (POST, form-encoded)
    pub submit_url: String,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            fetch_url: "https://app.getswipe.in/api/public/get".to_string(),
            submit_url: "https://app.getswipe.in/api/public/add".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The two network operations against the remote service
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetch the full product list.
    ///
    /// Requires status 200 and a payload decodable into the product schema.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, RemoteError>;

    /// Submit a new product. Returns whether the transport reported success;
    /// the status code is not inspected on this path.
    async fn submit_product(&self, product: &Product) -> bool;
}

/// reqwest-based implementation of [`RemoteCatalog`]
pub struct HttpCatalogClient {
    client: Client,
    config: RemoteConfig,
}

impl HttpCatalogClient {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(RemoteConfig::default())
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalogClient {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, RemoteError> {
        let url = Url::parse(&self.config.fetch_url).map_err(|_| RemoteError::InvalidUrl)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::Unknown(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RemoteError::InvalidResponse(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Unknown(e.to_string()))?;

        let products: Vec<Product> =
            serde_json::from_slice(&body).map_err(|_| RemoteError::InvalidData)?;

        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    async fn submit_product(&self, product: &Product) -> bool {
        let url = match Url::parse(&self.config.submit_url) {
            Ok(url) => url,
            Err(_) => {
                warn!(url = %self.config.submit_url, "Invalid submission endpoint");
                return false;
            }
        };

        match self.client.post(url).form(&product.form_params()).send().await {
            Ok(_) => {
                debug!(product = %product.id(), "Submitted product");
                true
            }
            Err(e) => {
                warn!(product = %product.id(), error = %e, "Product submission failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> HttpCatalogClient {
        HttpCatalogClient::new(RemoteConfig {
            fetch_url: format!("{}/api/public/get", server.url()),
            submit_url: format!("{}/api/public/add", server.url()),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_remote_config_default() {
        let config = RemoteConfig::default();
        assert!(config.fetch_url.ends_with("/get"));
        assert!(config.submit_url.ends_with("/add"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_fetch_catalog_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/public/get")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"product_name":"Pen","product_type":"Stationery","price":10.0,"tax":5.0,"image":""}]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let products = client.fetch_catalog().await.unwrap();

        mock.assert_async().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Pen");
        assert!(!products[0].is_favorite);
    }

    #[tokio::test]
    async fn test_fetch_catalog_non_200_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/public/get")
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.fetch_catalog().await.unwrap_err(),
            RemoteError::InvalidResponse(503)
        );
    }

    #[tokio::test]
    async fn test_fetch_catalog_garbage_payload_is_invalid_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/public/get")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.fetch_catalog().await.unwrap_err(),
            RemoteError::InvalidData
        );
    }

    #[tokio::test]
    async fn test_fetch_catalog_malformed_url() {
        let client = HttpCatalogClient::new(RemoteConfig {
            fetch_url: "not a url".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.fetch_catalog().await.unwrap_err(),
            RemoteError::InvalidUrl
        );
    }

    #[tokio::test]
    async fn test_submit_product_sends_form_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/public/add")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("application/x-www-form-urlencoded".to_string()),
            )
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("product_name".into(), "Pen".into()),
                mockito::Matcher::UrlEncoded("product_type".into(), "Stationery".into()),
                mockito::Matcher::UrlEncoded("price".into(), "10".into()),
                mockito::Matcher::UrlEncoded("tax".into(), "5".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        let client = client_for(&server);
        let product = Product::new("Pen", "Stationery", 10.0, 5.0, "pen.png");

        assert!(client.submit_product(&product).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_product_ignores_status_code() {
        // Only transport failures count as failure on the submit path.
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/public/add")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let product = Product::new("Pen", "Stationery", 10.0, 5.0, "");

        assert!(client.submit_product(&product).await);
    }

    #[tokio::test]
    async fn test_submit_product_transport_failure() {
        // Unroutable port: connect fails, submit reports false.
        let client = HttpCatalogClient::new(RemoteConfig {
            submit_url: "http://127.0.0.1:1/api/public/add".to_string(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        let product = Product::new("Pen", "Stationery", 10.0, 5.0, "");
        assert!(!client.submit_product(&product).await);
    }
}
