pub mod models;
pub mod catalog;
pub mod services;
pub mod cli;
pub mod utils;

pub use anyhow::{Error, Result};
