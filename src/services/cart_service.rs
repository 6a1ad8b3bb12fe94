use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    models::{
        cart::{Cart, CartError},
        user::Session,
    },
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("{0}")]
    Cart(#[from] CartError),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
}

impl CartServiceError {
    pub fn user_message(&self) -> String {
        match self {
            CartServiceError::Cart(e) => e.to_string(),
            CartServiceError::Api(e) => e.user_message(),
        }
    }
}

/// Keeps an owned [`Cart`] in sync with the backend cart of a session.
pub struct CartService {
    api: Arc<dyn StorefrontApi>,
}

impl CartService {
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Fetch the catalog and the session's cart.
    pub async fn load(&self, session: &Session) -> Result<Cart, CartServiceError> {
        let catalog = self.api.products().await?;
        let entries = self.api.fetch_cart(session).await?;

        let cart = Cart::new(entries, catalog);
        let unresolved = cart.items().iter().filter(|i| !i.is_resolved()).count();
        if unresolved > 0 {
            warn!("{} cart entries reference products missing from the catalog", unresolved);
        }

        debug!("Loaded cart with {} entries for {}", cart.entries().len(), session.username);
        Ok(cart)
    }

    /// Set the quantity of a product. Zero removes it from the cart.
    ///
    /// The change is checked locally first; on success the cart entries are
    /// replaced by what the backend reports.
    pub async fn set_quantity(
        &self,
        session: &Session,
        cart: &mut Cart,
        product_id: &str,
        qty: i64,
    ) -> Result<(), CartServiceError> {
        cart.check_quantity(product_id, qty)?;

        let entries = self.api.update_cart(session, product_id, qty).await?;
        cart.replace_entries(entries);

        info!("Set quantity of {} to {}", product_id, qty);
        Ok(())
    }

    pub async fn increment(
        &self,
        session: &Session,
        cart: &mut Cart,
        product_id: &str,
    ) -> Result<(), CartServiceError> {
        let qty = cart.quantity_of(product_id) + 1;
        self.set_quantity(session, cart, product_id, qty).await
    }

    pub async fn decrement(
        &self,
        session: &Session,
        cart: &mut Cart,
        product_id: &str,
    ) -> Result<(), CartServiceError> {
        let qty = cart.quantity_of(product_id) - 1;
        self.set_quantity(session, cart, product_id, qty).await
    }

    /// Put a product in the cart with quantity 1. Products already in the
    /// cart are left alone.
    pub async fn add_to_cart(
        &self,
        session: &Session,
        cart: &mut Cart,
        product_id: &str,
    ) -> Result<(), CartServiceError> {
        if cart.contains(product_id) {
            return Err(CartError::AlreadyInCart {
                product_id: product_id.to_string(),
            }
            .into());
        }
        self.set_quantity(session, cart, product_id, 1).await
    }
}
