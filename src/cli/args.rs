use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the storefront catalog, manage your cart and check out")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend API endpoint, overrides API_ENDPOINT
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication related commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Cart management commands
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Review the cart and order details before paying
    Checkout,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Register a new user account
    Register,
    /// Login to an existing account
    Login,
    /// Logout from current session
    Logout,
    /// Show current authentication status
    Status,
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List every product
    List,
    /// Search products by name or category
    Search {
        /// Search text
        text: String,
    },
}

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart and its total
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: String,
    },
    /// Set the quantity of a product (0 removes it)
    Set {
        /// Product ID
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Increase the quantity of a product by one
    Inc {
        /// Product ID
        id: String,
    },
    /// Decrease the quantity of a product by one
    Dec {
        /// Product ID
        id: String,
    },
}
