use daily_prep::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Daily Prep");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the dashboard
    startup::run(config).await
}
