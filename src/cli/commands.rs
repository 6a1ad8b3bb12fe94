use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input, Password};

use tracing::{error, info, warn};

use crate::{
    api::HttpStorefrontClient,
    cli::args::*,
    models::{
        cart::Cart,
        user::{LoginForm, RegisterForm, Session},
    },
    services::{
        AuthService, AuthServiceError, CartService, CartServiceError, ProductService,
        LOGIN_SUCCESS_MESSAGE, REGISTER_SUCCESS_MESSAGE,
    },
    utils::{
        formatting::{
            format_cart, format_money, format_order_summary, format_product_table,
            EMPTY_CART_MESSAGE,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    auth_service: Arc<AuthService>,
    product_service: Arc<ProductService>,
    cart_service: Arc<CartService>,
}

impl CliApp {
    pub fn new(config: &Config) -> Result<Self> {
        let api = Arc::new(
            HttpStorefrontClient::new(&config.api_endpoint)
                .context("Failed to initialize API client")?,
        );
        info!("Using storefront backend at {}", api.base_url());

        let auth_service = Arc::new(AuthService::new(api.clone(), config.session_dir.clone())?);
        let product_service = Arc::new(ProductService::new(api.clone()));
        let cart_service = Arc::new(CartService::new(api));

        Ok(Self {
            auth_service,
            product_service,
            cart_service,
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::Auth { command } => self.handle_auth_command(command).await,
            Commands::Products { command } => self.handle_product_command(command).await,
            Commands::Cart { command } => self.handle_cart_command(command).await,
            Commands::Checkout => self.handle_checkout().await,
        }
    }

    // Authentication Commands
    async fn handle_auth_command(&self, command: AuthCommands) -> Result<()> {
        match command {
            AuthCommands::Register => self.handle_register().await,
            AuthCommands::Login => self.handle_login().await,
            AuthCommands::Logout => self.handle_logout().await,
            AuthCommands::Status => self.handle_auth_status(),
        }
    }

    async fn handle_register(&self) -> Result<()> {
        println!("{} {}", ROCKET, style("Register").bold().cyan());

        let theme = ColorfulTheme::default();

        let username: String = Input::with_theme(&theme)
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?;

        let password: String = Password::with_theme(&theme)
            .with_prompt("Password (at least 6 characters)")
            .allow_empty_password(true)
            .interact()?;

        let confirm_password: String = Password::with_theme(&theme)
            .with_prompt("Confirm Password")
            .allow_empty_password(true)
            .interact()?;

        let form = RegisterForm::new(username, password, confirm_password);

        match self.auth_service.register(&form).await {
            Ok(()) => {
                println!("{} {}", CHECKMARK, style(REGISTER_SUCCESS_MESSAGE).green());
                println!("Already have an account? Login with {}", style("storefront auth login").cyan());
            }
            Err(AuthServiceError::Validation(e)) => {
                println!("{} {}", WARNING, style(&e.message).yellow());
            }
            Err(e) => {
                println!("{} {}", CROSS, style(e.user_message()).red());
                error!("Registration failed: {}", e);
            }
        }

        Ok(())
    }

    async fn handle_login(&self) -> Result<()> {
        println!("{} {}", ROCKET, style("Login").bold().cyan());

        let theme = ColorfulTheme::default();

        let username: String = Input::with_theme(&theme)
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?;

        let password: String = Password::with_theme(&theme)
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?;

        let form = LoginForm::new(username, password);

        match self.auth_service.login(&form).await {
            Ok(session) => {
                println!("{} {}", CHECKMARK, style(LOGIN_SUCCESS_MESSAGE).green());
                println!("Welcome back, {}!", style(&session.username).green());
                println!("Wallet balance: {}", style(format_money(session.balance)).yellow());
            }
            Err(AuthServiceError::Validation(e)) => {
                println!("{} {}", WARNING, style(&e.message).yellow());
            }
            Err(e) => {
                println!("{} {}", CROSS, style(e.user_message()).red());
                warn!("Login failed for user {}: {}", form.username, e);
            }
        }

        Ok(())
    }

    async fn handle_logout(&self) -> Result<()> {
        match self.auth_service.logout().await {
            Ok(_) => {
                println!("{} Logged out successfully", CHECKMARK);
            }
            Err(e) => {
                println!("{} Logout failed: {}", CROSS, style(&e).red());
                error!("Logout failed: {}", e);
            }
        }

        Ok(())
    }

    fn handle_auth_status(&self) -> Result<()> {
        match self.auth_service.current_session()? {
            Some(session) => {
                println!("{} {}", INFO, style("Authentication Status").bold().cyan());
                println!("Status: {}", style("Logged in").green());
                println!("Username: {}", style(&session.username).green());
                println!("Wallet balance: {}", style(format_money(session.balance)).yellow());
            }
            None => {
                println!("{} {}", WARNING, style("Not logged in").yellow());
                println!("Use {} to login", style("storefront auth login").cyan());
            }
        }

        Ok(())
    }

    // Product Commands
    async fn handle_product_command(&self, command: ProductCommands) -> Result<()> {
        let result = match command {
            ProductCommands::List => self.product_service.list().await,
            ProductCommands::Search { text } => self.product_service.search(&text).await,
        };

        match result {
            Ok(products) if products.is_empty() => {
                println!("{} No products found", INFO);
            }
            Ok(products) => {
                println!("{}", format_product_table(&products));
            }
            Err(e) => {
                println!("{} {}", CROSS, style(e.user_message()).red());
                error!("Failed to fetch products: {}", e);
            }
        }

        Ok(())
    }

    // Cart Commands
    fn session_or_prompt(&self) -> Result<Option<Session>> {
        let session = self.auth_service.current_session()?;
        if session.is_none() {
            println!(
                "{} Login to add an item to the Cart: {}",
                WARNING,
                style("storefront auth login").cyan()
            );
        }
        Ok(session)
    }

    async fn load_cart(&self, session: &Session) -> Option<Cart> {
        match self.cart_service.load(session).await {
            Ok(cart) => Some(cart),
            Err(e) => {
                println!("{} {}", CROSS, style(e.user_message()).red());
                error!("Failed to load cart: {}", e);
                None
            }
        }
    }

    async fn handle_cart_command(&self, command: CartCommands) -> Result<()> {
        let Some(session) = self.session_or_prompt()? else {
            return Ok(());
        };
        let Some(mut cart) = self.load_cart(&session).await else {
            return Ok(());
        };

        let result: Result<(), CartServiceError> = match &command {
            CartCommands::Show => Ok(()),
            CartCommands::Add { id } => {
                self.cart_service.add_to_cart(&session, &mut cart, id).await
            }
            CartCommands::Set { id, qty } => {
                self.cart_service.set_quantity(&session, &mut cart, id, *qty).await
            }
            CartCommands::Inc { id } => {
                self.cart_service.increment(&session, &mut cart, id).await
            }
            CartCommands::Dec { id } => {
                self.cart_service.decrement(&session, &mut cart, id).await
            }
        };

        match result {
            Ok(()) => {
                if !matches!(command, CartCommands::Show) {
                    println!("{} Cart updated", CHECKMARK);
                }
            }
            Err(CartServiceError::Cart(e)) => {
                println!("{} {}", WARNING, style(e).yellow());
            }
            Err(e) => {
                println!("{} {}", CROSS, style(e.user_message()).red());
                error!("Cart update failed: {}", e);
            }
        }

        println!("{} {}", CART, style("Cart").bold().cyan());
        println!("{}", format_cart(&cart.items(), false));
        if !cart.is_empty() {
            println!("Proceed with {}", style("storefront checkout").cyan());
        }

        Ok(())
    }

    async fn handle_checkout(&self) -> Result<()> {
        let Some(session) = self.session_or_prompt()? else {
            return Ok(());
        };
        let Some(cart) = self.load_cart(&session).await else {
            return Ok(());
        };

        if cart.is_empty() {
            println!("{} {}", INFO, EMPTY_CART_MESSAGE);
            return Ok(());
        }

        println!("{} {}", CART, style("Checkout").bold().cyan());
        println!("{}", format_cart(&cart.items(), true));
        println!("{}", format_order_summary(&cart.summary()));
        println!("Wallet balance: {}", style(format_money(session.balance)).yellow());

        Ok(())
    }
}
