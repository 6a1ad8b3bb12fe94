pub mod auth_service;
pub mod cart_service;
pub mod product_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::*;
pub use cart_service::*;
pub use product_service::*;
