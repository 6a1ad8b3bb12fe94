use anyhow::Result;
use clap::Parser;
use storefront_cli::{
    cli::{Args, CliApp},
    utils::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    if let Some(endpoint) = args.endpoint.clone() {
        config.api_endpoint = endpoint;
        config.validate()?;
    }

    let app = CliApp::new(&config)?;
    app.run(args).await
}
