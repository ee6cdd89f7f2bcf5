//! Campaign value types shared by the builder, the ledger and channel clients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ─── Campaign ──────────────────────────────────────────────────────────────

/// A fully validated campaign. Only [`crate::CampaignBuilder::build`]
/// produces one, so every instance satisfies the construction rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Campaign {
    pub(crate) name: String,
    pub(crate) channel: String,
    pub(crate) daily_budget: f64,
    pub(crate) start_date: NaiveDate,
    pub(crate) end_date: Option<NaiveDate>,
    pub(crate) target_audience: HashMap<String, serde_json::Value>,
    pub(crate) creatives: Vec<Creative>,
    pub(crate) tracking: HashMap<String, String>,
}

impl Campaign {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the channel this campaign should be launched on.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn daily_budget(&self) -> f64 {
        self.daily_budget
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn target_audience(&self) -> &HashMap<String, serde_json::Value> {
        &self.target_audience
    }

    /// Creatives in the order they were added.
    pub fn creatives(&self) -> &[Creative] {
        &self.creatives
    }

    pub fn tracking(&self) -> &HashMap<String, String> {
        &self.tracking
    }
}

// ─── Creative ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creative {
    pub headline: String,
    pub image_url: String,
}

impl Creative {
    pub fn new(headline: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            image_url: image_url.into(),
        }
    }
}

// ─── External Id ───────────────────────────────────────────────────────────

/// Opaque identifier a channel hands back after creating a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
