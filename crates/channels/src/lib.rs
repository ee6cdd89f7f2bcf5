//! Ad channel integration layer — one client per external ad platform,
//! resolved by name through [`ChannelClientFactory`].

pub mod clients;
pub mod registry;

pub use clients::{Channel, ChannelClient, FacebookAdsClient, GoogleAdsClient};
pub use registry::{ChannelClientFactory, ClientConstructor};
