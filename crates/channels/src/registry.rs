//! Channel registry — maps channel names to client constructors.

use crate::clients::*;
use launchpad_budget::BudgetLedger;
use launchpad_core::campaign::{Campaign, ExternalId};
use launchpad_core::config::ChannelsConfig;
use launchpad_core::error::{CampaignError, CampaignResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds a client bound to the given ledger.
pub type ClientConstructor = fn(Arc<BudgetLedger>) -> Arc<dyn ChannelClient>;

/// Resolves channel names to clients that all spend from one ledger.
pub struct ChannelClientFactory {
    ledger: Arc<BudgetLedger>,
    constructors: HashMap<String, ClientConstructor>,
}

impl ChannelClientFactory {
    /// Factory with every built-in channel registered.
    pub fn new(ledger: Arc<BudgetLedger>) -> Self {
        let mut factory = Self::empty(ledger);
        for channel in Channel::ALL {
            factory.register(channel.name(), builtin_constructor(channel));
        }

        info!(
            channel_count = factory.constructors.len(),
            "Channel factory initialized"
        );
        factory
    }

    /// Factory with no channels registered.
    pub fn empty(ledger: Arc<BudgetLedger>) -> Self {
        Self {
            ledger,
            constructors: HashMap::new(),
        }
    }

    /// Factory exposing only the channels enabled in `config`.
    pub fn from_config(ledger: Arc<BudgetLedger>, config: &ChannelsConfig) -> CampaignResult<Self> {
        let mut factory = Self::empty(ledger);
        for name in &config.enabled {
            let channel = Channel::ALL
                .into_iter()
                .find(|c| c.name() == name.as_str())
                .ok_or_else(|| CampaignError::UnknownChannel(name.clone()))?;
            factory.register(channel.name(), builtin_constructor(channel));
        }

        info!(
            channels = ?factory.channels(),
            "Channel factory initialized from config"
        );
        Ok(factory)
    }

    /// Register (or replace) the constructor for `name`.
    pub fn register(&mut self, name: impl Into<String>, constructor: ClientConstructor) {
        let name = name.into();
        debug!(channel = %name, "Registering channel client");
        self.constructors.insert(name, constructor);
    }

    /// Client for `channel`, or `UnknownChannel` if nothing is registered under it.
    pub fn create(&self, channel: &str) -> CampaignResult<Arc<dyn ChannelClient>> {
        let constructor = self
            .constructors
            .get(channel)
            .ok_or_else(|| CampaignError::UnknownChannel(channel.to_string()))?;
        Ok(constructor(Arc::clone(&self.ledger)))
    }

    /// Create `campaign` on the channel it names.
    pub fn launch(&self, campaign: &Campaign) -> CampaignResult<ExternalId> {
        self.create(campaign.channel())?.create_campaign(campaign)
    }

    /// Registered channel names, sorted.
    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn ledger(&self) -> &Arc<BudgetLedger> {
        &self.ledger
    }
}

fn builtin_constructor(channel: Channel) -> ClientConstructor {
    match channel {
        Channel::Google => google_client,
        Channel::Facebook => facebook_client,
    }
}

fn google_client(ledger: Arc<BudgetLedger>) -> Arc<dyn ChannelClient> {
    Arc::new(GoogleAdsClient::new(ledger))
}

fn facebook_client(ledger: Arc<BudgetLedger>) -> Arc<dyn ChannelClient> {
    Arc::new(FacebookAdsClient::new(ledger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use launchpad_core::CampaignBuilder;

    fn campaign(channel: &str, daily_budget: f64) -> Campaign {
        CampaignBuilder::new()
            .name("Autumn")
            .channel(channel)
            .daily_budget(daily_budget)
            .start_date(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
            .add_creative("Leaves", "https://cdn.example.com/autumn.png")
            .tracking_param("utm_source", channel)
            .build()
            .unwrap()
    }

    struct TikTokClient {
        ledger: Arc<BudgetLedger>,
    }

    impl ChannelClient for TikTokClient {
        fn name(&self) -> &str {
            "tiktok"
        }

        fn create_campaign(&self, campaign: &Campaign) -> CampaignResult<ExternalId> {
            self.ledger
                .allocate_for_channel("tiktok", campaign.daily_budget())?;
            Ok(ExternalId::new("t-fixed"))
        }

        fn pause_campaign(&self, _external_id: &ExternalId) {}
    }

    fn tiktok_client(ledger: Arc<BudgetLedger>) -> Arc<dyn ChannelClient> {
        Arc::new(TikTokClient { ledger })
    }

    #[test]
    fn test_builtin_channels_registered() {
        let factory = ChannelClientFactory::new(Arc::new(BudgetLedger::new(0.0).unwrap()));
        assert_eq!(factory.channels(), vec!["facebook", "google"]);
        assert_eq!(factory.create("google").unwrap().name(), "google");
        assert_eq!(factory.create("facebook").unwrap().name(), "facebook");
    }

    #[test]
    fn test_unknown_channel() {
        let factory = ChannelClientFactory::new(Arc::new(BudgetLedger::new(0.0).unwrap()));
        match factory.create("unknown") {
            Err(CampaignError::UnknownChannel(name)) => assert_eq!(name, "unknown"),
            Err(other) => panic!("expected UnknownChannel, got {:?}", other),
            Ok(_) => panic!("expected UnknownChannel"),
        }
        // Lookup is case-sensitive.
        assert!(factory.create("Google").is_err());
    }

    #[test]
    fn test_clients_share_one_ledger() {
        let ledger = Arc::new(BudgetLedger::new(100.0).unwrap());
        let factory = ChannelClientFactory::new(Arc::clone(&ledger));

        factory
            .create("google")
            .unwrap()
            .create_campaign(&campaign("google", 10.0))
            .unwrap();
        factory
            .create("facebook")
            .unwrap()
            .create_campaign(&campaign("facebook", 15.0))
            .unwrap();

        assert!((ledger.remaining() - 75.0).abs() < f64::EPSILON);
        assert!((factory.ledger().spent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_register_new_channel() {
        let ledger = Arc::new(BudgetLedger::new(50.0).unwrap());
        let mut factory = ChannelClientFactory::new(Arc::clone(&ledger));
        factory.register("tiktok", tiktok_client);

        assert_eq!(factory.channels(), vec!["facebook", "google", "tiktok"]);
        let id = factory.launch(&campaign("tiktok", 20.0)).unwrap();
        assert_eq!(id.as_str(), "t-fixed");
        assert!((ledger.remaining() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_launch_resolves_campaign_channel() {
        let ledger = Arc::new(BudgetLedger::new(100.0).unwrap());
        let factory = ChannelClientFactory::new(Arc::clone(&ledger));

        let id = factory.launch(&campaign("google", 5.0)).unwrap();
        assert!(id.as_str().starts_with("g-"));

        let err = factory.launch(&campaign("bing", 5.0)).unwrap_err();
        assert_eq!(err, CampaignError::UnknownChannel("bing".to_string()));
        assert!((ledger.remaining() - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_config_limits_channels() {
        let ledger = Arc::new(BudgetLedger::new(10.0).unwrap());
        let config = ChannelsConfig {
            enabled: vec!["facebook".to_string()],
        };
        let factory = ChannelClientFactory::from_config(ledger, &config).unwrap();
        assert_eq!(factory.channels(), vec!["facebook"]);
        assert!(factory.create("google").is_err());
    }

    #[test]
    fn test_from_config_rejects_unknown_names() {
        let config = ChannelsConfig {
            enabled: vec!["google".to_string(), "myspace".to_string()],
        };
        let result = ChannelClientFactory::from_config(Arc::new(BudgetLedger::new(0.0).unwrap()), &config);
        assert!(matches!(result, Err(CampaignError::UnknownChannel(name)) if name == "myspace"));
    }
}
