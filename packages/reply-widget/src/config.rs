use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use url::Url;

/// Widget configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the customer directory service.
    pub directory_base_url: String,
    /// Location whose query string feeds the ticket fallback, if any.
    pub location_url: Option<String>,
}

impl WidgetConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let location_url = env::var("WIDGET_LOCATION").ok();
        if let Some(location) = &location_url {
            Url::parse(location).context("WIDGET_LOCATION must be a valid URL")?;
        }

        Ok(Self {
            directory_base_url: env::var("DIRECTORY_BASE_URL")
                .unwrap_or_else(|_| directory_client::DEFAULT_BASE_URL.to_string()),
            location_url,
        })
    }
}
