pub mod args;
pub mod actions;
pub mod commands;

pub use args::*;
pub use actions::*;
pub use commands::*;
