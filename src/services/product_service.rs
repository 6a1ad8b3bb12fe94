use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    api::{ApiError, StorefrontApi},
    models::product::CatalogItem,
};

#[derive(Error, Debug)]
pub enum ProductServiceError {
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
}

impl ProductServiceError {
    pub fn user_message(&self) -> String {
        match self {
            ProductServiceError::Api(e) => e.user_message(),
        }
    }
}

pub struct ProductService {
    api: Arc<dyn StorefrontApi>,
}

impl ProductService {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Every product in the catalog.
    pub async fn list(&self) -> Result<Vec<CatalogItem>, ProductServiceError> {
        let products = self.api.products().await?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    /// Products matching `text` by name or category. Blank text lists everything.
    pub async fn search(&self, text: &str) -> Result<Vec<CatalogItem>, ProductServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return self.list().await;
        }

        let products = self.api.search_products(text).await?;
        debug!("Search '{}' matched {} products", text, products.len());
        Ok(products)
    }
}
