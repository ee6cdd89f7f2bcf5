//! Campaign Launchpad — build one campaign from the command line and launch it
//! on an ad channel, debiting the shared marketing budget.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use launchpad_budget::BudgetLedger;
use launchpad_channels::ChannelClientFactory;
use launchpad_core::config::AppConfig;
use launchpad_core::CampaignBuilder;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "campaign-launchpad")]
#[command(about = "Create an ad campaign on an external channel against a shared budget")]
#[command(version)]
struct Cli {
    /// Campaign name
    #[arg(long)]
    name: Option<String>,

    /// Channel to launch on (google, facebook)
    #[arg(long)]
    channel: Option<String>,

    /// Daily budget debited from the shared ledger
    #[arg(long)]
    daily_budget: Option<f64>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Creative as "headline|image_url" (repeatable, order preserved)
    #[arg(long = "creative", value_parser = parse_creative)]
    creatives: Vec<(String, String)>,

    /// Audience attribute as key=value; values parse as JSON when possible
    #[arg(long = "audience", value_parser = parse_audience)]
    audience: Vec<(String, serde_json::Value)>,

    /// Tracking parameter as key=value (repeatable)
    #[arg(long = "tracking", value_parser = parse_key_value)]
    tracking: Vec<(String, String)>,

    /// Starting ledger balance (overrides config)
    #[arg(long, env = "CAMPAIGN_LAUNCHPAD__LEDGER__INITIAL_BUDGET")]
    initial_budget: Option<f64>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in `{}`", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_audience(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = parse_key_value(raw)?;
    let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
    Ok((key, value))
}

fn parse_creative(raw: &str) -> Result<(String, String), String> {
    raw.split_once('|')
        .map(|(headline, url)| (headline.to_string(), url.to_string()))
        .ok_or_else(|| format!("expected headline|image_url, got `{}`", raw))
}

impl Cli {
    /// Copy every flag that was given into a builder. Validation happens on build.
    fn to_builder(&self) -> CampaignBuilder {
        let mut builder = CampaignBuilder::new();
        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if let Some(channel) = &self.channel {
            builder = builder.channel(channel);
        }
        if let Some(budget) = self.daily_budget {
            builder = builder.daily_budget(budget);
        }
        if let Some(start) = self.start {
            builder = builder.start_date(start);
        }
        if let Some(end) = self.end {
            builder = builder.end_date(end);
        }
        for (key, value) in &self.audience {
            builder = builder.audience_attribute(key, value.clone());
        }
        for (headline, url) in &self.creatives {
            builder = builder.add_creative(headline, url);
        }
        for (key, value) in &self.tracking {
            builder = builder.tracking_param(key, value);
        }
        builder
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campaign_launchpad=info,launchpad_channels=info,launchpad_budget=info".into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(initial) = cli.initial_budget {
        config.ledger.initial_budget = initial;
    }

    info!(
        initial_budget = config.ledger.initial_budget,
        currency = %config.ledger.currency,
        channels = ?config.channels.enabled,
        "Configuration loaded"
    );

    let ledger = Arc::new(
        BudgetLedger::from_config(&config.ledger).context("invalid ledger configuration")?,
    );
    let factory = ChannelClientFactory::from_config(Arc::clone(&ledger), &config.channels)
        .context("invalid channel configuration")?;

    let campaign = cli.to_builder().build().context("invalid campaign")?;
    let external_id = factory
        .launch(&campaign)
        .with_context(|| format!("failed to launch campaign on `{}`", campaign.channel()))?;

    let summary = serde_json::json!({
        "external_id": external_id,
        "channel": campaign.channel(),
        "daily_budget": campaign.daily_budget(),
        "remaining": ledger.remaining(),
        "currency": ledger.currency(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
