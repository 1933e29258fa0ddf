use anyhow::Result;
use clap::Parser;
use preorder_cart::{
    cli::{Args, CliApp},
    utils::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = args.catalog.clone() {
        config.catalog_path = Some(path);
        config.validate()?;
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "🌾 Preorder cart starting ({} environment)",
        config.environment
    );

    let mut app = CliApp::new(config).await?;
    app.run(args.command)?;

    tracing::info!("🌾 Preorder cart stopped");
    Ok(())
}
