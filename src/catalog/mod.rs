pub mod table;
pub mod providers;

pub use table::*;
pub use providers::*;
