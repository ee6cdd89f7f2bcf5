pub mod builder;
pub mod campaign;
pub mod config;
pub mod error;

pub use builder::CampaignBuilder;
pub use campaign::{Campaign, Creative, ExternalId};
pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult, ValidationError};
