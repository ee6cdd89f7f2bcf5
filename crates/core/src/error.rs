use chrono::NaiveDate;
use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CampaignError {
    #[error("Allocation amount must be positive, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Starting balance must be a finite, non-negative amount, got {amount}")]
    InvalidBalance { amount: f64 },

    #[error("Insufficient funds: requested {requested}, remaining {remaining}")]
    InsufficientFunds { requested: f64, remaining: f64 },

    #[error("Campaign validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A violated campaign rule, reported in builder check order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("Channel is required")]
    MissingChannel,

    #[error("Daily budget is required")]
    MissingDailyBudget,

    #[error("Daily budget must be non-negative, got {0}")]
    NegativeDailyBudget(f64),

    #[error("Start date is required")]
    MissingStartDate,

    #[error("Start date {start} must not be after end date {end}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("At least one creative is required")]
    NoCreatives,

    #[error("Tracking is required")]
    MissingTracking,
}

impl ValidationError {
    /// Campaign field the rule applies to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::MissingChannel => "channel",
            ValidationError::MissingDailyBudget | ValidationError::NegativeDailyBudget(_) => {
                "daily_budget"
            }
            ValidationError::MissingStartDate => "start_date",
            ValidationError::EndBeforeStart { .. } => "end_date",
            ValidationError::NoCreatives => "creatives",
            ValidationError::MissingTracking => "tracking",
        }
    }
}

impl CampaignError {
    /// The validation rule behind this error, if it came from the builder.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            CampaignError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_fields() {
        assert_eq!(ValidationError::MissingName.field(), "name");
        assert_eq!(ValidationError::NegativeDailyBudget(-1.0).field(), "daily_budget");
        let d = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let err = ValidationError::EndBeforeStart { start: d, end: d };
        assert_eq!(err.field(), "end_date");
    }

    #[test]
    fn test_validation_converts_into_campaign_error() {
        let err: CampaignError = ValidationError::NoCreatives.into();
        assert_eq!(err.validation(), Some(&ValidationError::NoCreatives));
        assert_eq!(
            err.to_string(),
            "Campaign validation error: At least one creative is required"
        );
    }
}
