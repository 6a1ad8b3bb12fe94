use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::api::{ApiError, StorefrontApi};
use crate::models::{
    cart::CartEntry,
    product::CatalogItem,
    user::{Credentials, LoginResponse, Session},
};

/// In-memory backend behaving like the storefront server.
pub struct MockStorefrontApi {
    users: Mutex<HashMap<String, String>>,
    catalog: Vec<CatalogItem>,
    cart: Mutex<Vec<CartEntry>>,
    failing: bool,
    register_calls: AtomicUsize,
    update_cart_calls: AtomicUsize,
}

impl MockStorefrontApi {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            catalog: Vec::new(),
            cart: Mutex::new(Vec::new()),
            failing: false,
            register_calls: AtomicUsize::new(0),
            update_cart_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<CatalogItem>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_cart(self, entries: Vec<CartEntry>) -> Self {
        *self.cart.lock().unwrap() = entries;
        self
    }

    /// Every call fails as if the backend answered with a 500.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.users.lock().unwrap().contains_key(username)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn update_cart_calls(&self) -> usize {
        self.update_cart_calls.load(Ordering::SeqCst)
    }

    pub fn session_for(username: &str) -> Session {
        Session {
            username: username.to_string(),
            token: format!("token-{}", username),
            balance: 5000.0,
            created_at: chrono::Utc::now(),
        }
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.failing {
            return Err(ApiError::UnexpectedStatus(500));
        }
        Ok(())
    }

    fn check_token(&self, session: &Session) -> Result<(), ApiError> {
        if session.token != format!("token-{}", session.username) {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    fn rejected(message: &str) -> ApiError {
        ApiError::Rejected {
            status: 400,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl StorefrontApi for MockStorefrontApi {
    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut users = self.users.lock().unwrap();
        if users.contains_key(&credentials.username) {
            return Err(Self::rejected("Username is already taken"));
        }
        users.insert(credentials.username.clone(), credentials.password.clone());
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.check_available()?;

        match self.users.lock().unwrap().get(&credentials.username) {
            None => Err(Self::rejected("Username does not exist")),
            Some(password) if *password != credentials.password => {
                Err(Self::rejected("Password is incorrect"))
            }
            Some(_) => Ok(LoginResponse {
                success: true,
                token: format!("token-{}", credentials.username),
                username: credentials.username.clone(),
                balance: 5000.0,
            }),
        }
    }

    async fn products(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.check_available()?;
        Ok(self.catalog.clone())
    }

    async fn search_products(&self, text: &str) -> Result<Vec<CatalogItem>, ApiError> {
        self.check_available()?;

        let needle = text.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn fetch_cart(&self, session: &Session) -> Result<Vec<CartEntry>, ApiError> {
        self.check_available()?;
        self.check_token(session)?;
        Ok(self.cart.lock().unwrap().clone())
    }

    async fn update_cart(
        &self,
        session: &Session,
        product_id: &str,
        qty: i64,
    ) -> Result<Vec<CartEntry>, ApiError> {
        self.update_cart_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.check_token(session)?;

        if !self.catalog.iter().any(|p| p.id == product_id) {
            return Err(Self::rejected("Product doesn't exist"));
        }

        let mut cart = self.cart.lock().unwrap();
        match cart.iter().position(|e| e.product_id == product_id) {
            Some(index) if qty == 0 => {
                cart.remove(index);
            }
            Some(index) => cart[index].qty = qty,
            None if qty == 0 => {}
            None => cart.push(CartEntry::new(product_id, qty)),
        }
        Ok(cart.clone())
    }
}
