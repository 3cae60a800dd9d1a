/// Leave category configuration loading from config.toml
pub mod categories;

/// Ledger data file location
pub mod storage;

use crate::errors::Result;
use std::path::PathBuf;

pub use categories::{CategoryConfig, LeaveCategories, load_categories};

/// Environment variable naming the category configuration file.
pub const CONFIG_FILE_ENV: &str = "LEAVE_LEDGER_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Everything the ledger needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Configured leave categories and their default allotments
    pub categories: LeaveCategories,
    /// Where the ledger snapshot is persisted
    pub data_file: PathBuf,
}

/// Loads the application configuration from the environment and config.toml.
///
/// `.env` should already have been loaded by the caller.
pub fn load_app_configuration() -> Result<AppConfig> {
    let config_path = std::env::var(CONFIG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    tracing::debug!("Attempting to load configuration from: {:?}", config_path);

    let categories = load_categories(&config_path)
        .inspect_err(|e| tracing::error!("Critical error loading leave categories: {}", e))?;
    let data_file = storage::get_data_file_path();

    tracing::info!(
        categories = categories.len(),
        data_file = %data_file.display(),
        "Loaded application configuration"
    );

    Ok(AppConfig {
        categories,
        data_file,
    })
}
