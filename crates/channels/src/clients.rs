//! Channel client implementations for each ad platform.
//! Each client debits the shared ledger and hands back the platform's campaign id.

use launchpad_budget::BudgetLedger;
use launchpad_core::campaign::{Campaign, ExternalId};
use launchpad_core::error::CampaignResult;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Built-in ad channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Google,
    Facebook,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Google, Channel::Facebook];

    /// Registry key for this channel.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Google => "google",
            Channel::Facebook => "facebook",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::Google => "Google Ads",
            Channel::Facebook => "Facebook Ads",
        }
    }

    /// Tag prepended to every external id issued on this channel.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Channel::Google => "g",
            Channel::Facebook => "f",
        }
    }
}

/// Trait for ad channel clients.
pub trait ChannelClient: Send + Sync {
    /// Registry name of the channel this client talks to.
    fn name(&self) -> &str;

    /// Reserve the campaign's daily budget and create it on the platform.
    fn create_campaign(&self, campaign: &Campaign) -> CampaignResult<ExternalId>;

    fn pause_campaign(&self, external_id: &ExternalId);
}

/// Debits `campaign.daily_budget()` and issues a fresh `<prefix>-<hex>` id.
/// Allocation errors propagate before any id is generated.
fn allocate_and_issue(
    ledger: &BudgetLedger,
    channel: Channel,
    campaign: &Campaign,
) -> CampaignResult<ExternalId> {
    if campaign.channel() != channel.name() {
        warn!(
            platform = channel.name(),
            campaign_channel = campaign.channel(),
            "Campaign targets a different channel than the client creating it"
        );
    }

    let allocation = ledger.allocate_for_channel(channel.name(), campaign.daily_budget())?;
    let external_id = ExternalId::new(format!(
        "{}-{}",
        channel.id_prefix(),
        Uuid::new_v4().simple()
    ));

    info!(
        platform = channel.name(),
        campaign = campaign.name(),
        external_id = %external_id,
        allocated = allocation.amount,
        remaining = allocation.remaining_after,
        "Campaign created"
    );
    metrics::counter!("launchpad.campaigns_created", "channel" => channel.name()).increment(1);

    Ok(external_id)
}

fn notify_pause(channel: Channel, external_id: &ExternalId) {
    // In production: call the platform's pause endpoint. No ledger refund.
    info!(
        platform = channel.name(),
        external_id = %external_id,
        "Pausing {} campaign",
        channel.display_name()
    );
    metrics::counter!("launchpad.campaigns_paused", "channel" => channel.name()).increment(1);
}

// ─── Google Ads ─────────────────────────────────────────────────────────────

pub struct GoogleAdsClient {
    ledger: Arc<BudgetLedger>,
}

impl GoogleAdsClient {
    pub fn new(ledger: Arc<BudgetLedger>) -> Self {
        Self { ledger }
    }
}

impl ChannelClient for GoogleAdsClient {
    fn name(&self) -> &str {
        Channel::Google.name()
    }

    fn create_campaign(&self, campaign: &Campaign) -> CampaignResult<ExternalId> {
        // In production: Google Ads API CampaignService mutate
        allocate_and_issue(&self.ledger, Channel::Google, campaign)
    }

    fn pause_campaign(&self, external_id: &ExternalId) {
        notify_pause(Channel::Google, external_id);
    }
}

// ─── Facebook Ads ───────────────────────────────────────────────────────────

pub struct FacebookAdsClient {
    ledger: Arc<BudgetLedger>,
}

impl FacebookAdsClient {
    pub fn new(ledger: Arc<BudgetLedger>) -> Self {
        Self { ledger }
    }
}

impl ChannelClient for FacebookAdsClient {
    fn name(&self) -> &str {
        Channel::Facebook.name()
    }

    fn create_campaign(&self, campaign: &Campaign) -> CampaignResult<ExternalId> {
        // In production: Meta Marketing API POST /act_{id}/campaigns
        allocate_and_issue(&self.ledger, Channel::Facebook, campaign)
    }

    fn pause_campaign(&self, external_id: &ExternalId) {
        notify_pause(Channel::Facebook, external_id);
    }
}
