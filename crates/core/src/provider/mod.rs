//! Country/flag data provider.

/// HTTP client and payload validation.
pub mod client;
/// Background fetch reporting over a channel.
pub mod task;

pub use client::{parse_countries, CountryProvider, ProviderError};
pub use task::{spawn_fetch, PoolEvent};
