use dotenvy::dotenv;
use leave_ledger::{Ledger, Result, config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load categories and the data file location
    let app_config = config::load_app_configuration()?;

    // 4. Open the ledger from its snapshot file
    let ledger = Ledger::open(&app_config)
        .await
        .inspect(|_| info!("Ledger opened from {}", app_config.data_file.display()))
        .inspect_err(|e| error!("Failed to open ledger: {}", e))?;

    info!(employees = ledger.len().await, "Leave ledger ready");
    for summary in ledger.category_summary().await {
        info!(
            category = %summary.category,
            total = summary.total,
            approved = summary.approved,
            "Requests by category"
        );
    }

    Ok(())
}
