pub mod product;
pub mod cart;
pub mod pricing;
pub mod user;
