use serde::Deserialize;

use crate::error::CampaignError;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_LAUNCHPAD__`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Marketing budget available when the process starts.
    #[serde(default = "default_initial_budget")]
    pub initial_budget: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsConfig {
    /// Channel names the factory should expose.
    #[serde(default = "default_enabled_channels")]
    pub enabled: Vec<String>,
}

// Default functions
fn default_initial_budget() -> f64 {
    0.0
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_enabled_channels() -> Vec<String> {
    vec!["google".to_string(), "facebook".to_string()]
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_budget: default_initial_budget(),
            currency: default_currency(),
        }
    }
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_channels(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, CampaignError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_LAUNCHPAD")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("channels.enabled"),
        );

        let config = builder
            .build()
            .map_err(|e| CampaignError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| CampaignError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!((config.ledger.initial_budget - 0.0).abs() < f64::EPSILON);
        assert_eq!(config.ledger.currency, "USD");
        assert_eq!(config.channels.enabled, vec!["google", "facebook"]);
    }

    #[test]
    fn test_load_from_environment() {
        std::env::set_var("CAMPAIGN_LAUNCHPAD__LEDGER__INITIAL_BUDGET", "75.5");
        std::env::set_var("CAMPAIGN_LAUNCHPAD__CHANNELS__ENABLED", "facebook,google");

        let loaded = AppConfig::load();

        std::env::remove_var("CAMPAIGN_LAUNCHPAD__LEDGER__INITIAL_BUDGET");
        std::env::remove_var("CAMPAIGN_LAUNCHPAD__CHANNELS__ENABLED");

        let config = loaded.unwrap();
        assert!((config.ledger.initial_budget - 75.5).abs() < f64::EPSILON);
        assert_eq!(config.ledger.currency, "USD");
        assert_eq!(config.channels.enabled, vec!["facebook", "google"]);
    }

    #[test]
    fn test_deserialize_partial_source() {
        let config: AppConfig = config::Config::builder()
            .set_override("ledger.initial_budget", 250.5)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert!((config.ledger.initial_budget - 250.5).abs() < f64::EPSILON);
        assert_eq!(config.ledger.currency, "USD");
        assert_eq!(config.channels.enabled.len(), 2);
    }
}
