use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::api::error::ApiError;
use crate::models::{
    cart::CartEntry,
    product::CatalogItem,
    user::{Credentials, LoginResponse, Session},
};

/// Operations the storefront backend offers.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError>;
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;
    async fn products(&self) -> Result<Vec<CatalogItem>, ApiError>;
    async fn search_products(&self, text: &str) -> Result<Vec<CatalogItem>, ApiError>;
    async fn fetch_cart(&self, session: &Session) -> Result<Vec<CartEntry>, ApiError>;
    async fn update_cart(
        &self,
        session: &Session,
        product_id: &str,
        qty: i64,
    ) -> Result<Vec<CartEntry>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct CartUpdateBody<'a> {
    #[serde(rename = "productId")]
    product_id: &'a str,
    qty: i64,
}

/// `reqwest` implementation of [`StorefrontApi`].
pub struct HttpStorefrontClient {
    client: ReqwestClient,
    base_url: Url,
}

impl HttpStorefrontClient {
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(endpoint)?;
        let client = ReqwestClient::builder().build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Maps non-success statuses to errors. Only a 400 carrying a
    /// `message` becomes a rejection.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::BAD_REQUEST => {
                let bytes = response.bytes().await?;
                match serde_json::from_slice::<StatusBody>(&bytes) {
                    Ok(StatusBody {
                        message: Some(message),
                        ..
                    }) => Err(ApiError::Rejected {
                        status: status.as_u16(),
                        message,
                    }),
                    _ => {
                        warn!("Backend returned 400 without a message body");
                        Err(ApiError::UnexpectedStatus(status.as_u16()))
                    }
                }
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            other => Err(ApiError::UnexpectedStatus(other.as_u16())),
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontClient {
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        debug!("POST auth/register for {}", credentials.username);

        let response = self
            .client
            .post(self.url("auth/register"))
            .json(credentials)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body: StatusBody = Self::parse_json(response).await?;

        if !body.success {
            return Err(ApiError::Rejected {
                status,
                message: body.message.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        debug!("POST auth/login for {}", credentials.username);

        let response = self
            .client
            .post(self.url("auth/login"))
            .json(credentials)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn products(&self) -> Result<Vec<CatalogItem>, ApiError> {
        debug!("GET products");

        let response = self.client.get(self.url("products")).send().await?;
        Self::parse_json(response).await
    }

    async fn search_products(&self, text: &str) -> Result<Vec<CatalogItem>, ApiError> {
        debug!("GET products/search value={}", text);

        let response = self
            .client
            .get(self.url("products/search"))
            .query(&[("value", text)])
            .send()
            .await?;

        match Self::parse_json(response).await {
            Err(ApiError::NotFound) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn fetch_cart(&self, session: &Session) -> Result<Vec<CartEntry>, ApiError> {
        debug!("GET cart for {}", session.username);

        let response = self
            .client
            .get(self.url("cart"))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn update_cart(
        &self,
        session: &Session,
        product_id: &str,
        qty: i64,
    ) -> Result<Vec<CartEntry>, ApiError> {
        debug!("POST cart {} qty={} for {}", product_id, qty, session.username);

        let response = self
            .client
            .post(self.url("cart"))
            .bearer_auth(&session.token)
            .json(&CartUpdateBody { product_id, qty })
            .send()
            .await?;
        Self::parse_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_paths_under_endpoint() {
        let client = HttpStorefrontClient::new("http://localhost:8082/api/v1").unwrap();
        assert_eq!(client.url("auth/register"), "http://localhost:8082/api/v1/auth/register");

        let client = HttpStorefrontClient::new("http://localhost:8082/api/v1/").unwrap();
        assert_eq!(client.url("cart"), "http://localhost:8082/api/v1/cart");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = HttpStorefrontClient::new("not a url");
        assert!(matches!(result, Err(ApiError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_cart_update_body_uses_backend_field_names() {
        let body = CartUpdateBody {
            product_id: "BW0jAAeDJmlZCF8i",
            qty: 2,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"productId": "BW0jAAeDJmlZCF8i", "qty": 2})
        );
    }
}
