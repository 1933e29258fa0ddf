pub mod cart_service;
pub mod checkout_service;

pub use cart_service::*;
pub use checkout_service::*;
