use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::actions::CartAction;

#[derive(Parser)]
#[command(name = "preorder-cart")]
#[command(about = "Preorder farm goods and keep a running cart total")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON catalog to use instead of the built-in one
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the products available for preorder
    Catalog,
    /// Apply cart actions in order and print the resulting cart
    ///
    /// Actions: add:<id>, inc:<id>, dec:<id>, set:<id>=<qty>
    Run {
        #[arg(required = true, value_name = "ACTION")]
        actions: Vec<CartAction>,
    },
    /// Fill a cart interactively
    Shop,
}
