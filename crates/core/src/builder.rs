//! Campaign builder — fluent API that validates before producing a [`Campaign`].

use crate::campaign::{Campaign, Creative};
use crate::error::{CampaignResult, ValidationError};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CampaignBuilder {
    name: Option<String>,
    channel: Option<String>,
    daily_budget: Option<f64>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    target_audience: Option<HashMap<String, serde_json::Value>>,
    creatives: Vec<Creative>,
    tracking: Option<HashMap<String, String>>,
}

impl CampaignBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn daily_budget(mut self, daily_budget: f64) -> Self {
        self.daily_budget = Some(daily_budget);
        self
    }

    /// Sets both dates at once; `None` clears a previously set end date.
    pub fn dates(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.start_date = Some(start);
        self.end_date = end;
        self
    }

    pub fn start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Replaces the whole audience mapping.
    pub fn audience(mut self, attributes: HashMap<String, serde_json::Value>) -> Self {
        self.target_audience = Some(attributes);
        self
    }

    pub fn audience_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.target_audience
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Appends a creative; call repeatedly to add more.
    pub fn add_creative(mut self, headline: impl Into<String>, image_url: impl Into<String>) -> Self {
        self.creatives.push(Creative::new(headline, image_url));
        self
    }

    /// Replaces the whole tracking mapping. An empty map still counts as set.
    pub fn tracking(mut self, params: HashMap<String, String>) -> Self {
        self.tracking = Some(params);
        self
    }

    pub fn tracking_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tracking
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Validates the accumulated fields and produces an immutable campaign.
    ///
    /// Rules are checked in a fixed order and the first violation is
    /// returned. The builder is left untouched either way.
    pub fn build(&self) -> CampaignResult<Campaign> {
        let name = self.name.as_ref().ok_or(ValidationError::MissingName)?;
        let channel = self.channel.as_ref().ok_or(ValidationError::MissingChannel)?;

        let daily_budget = self.daily_budget.ok_or(ValidationError::MissingDailyBudget)?;
        if daily_budget.is_nan() || daily_budget < 0.0 {
            return Err(ValidationError::NegativeDailyBudget(daily_budget).into());
        }

        let start_date = self.start_date.ok_or(ValidationError::MissingStartDate)?;
        if let Some(end) = self.end_date {
            if start_date > end {
                return Err(ValidationError::EndBeforeStart {
                    start: start_date,
                    end,
                }
                .into());
            }
        }

        if self.creatives.is_empty() {
            return Err(ValidationError::NoCreatives.into());
        }

        let tracking = self.tracking.as_ref().ok_or(ValidationError::MissingTracking)?;

        Ok(Campaign {
            name: name.clone(),
            channel: channel.clone(),
            daily_budget,
            start_date,
            end_date: self.end_date,
            target_audience: self.target_audience.clone().unwrap_or_default(),
            creatives: self.creatives.clone(),
            tracking: tracking.clone(),
        })
    }
}
