use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{error, info};

use super::client::{CountryProvider, ProviderError};
use crate::models::Country;

/// Outcome of the one-shot country fetch.
#[derive(Debug)]
pub enum PoolEvent {
    /// The pool arrived and passed validation.
    Loaded(Vec<Country>),
    /// The fetch failed; the game stays not-ready.
    Failed(ProviderError),
}

/// Fetch the pool in the background and report the result on `sender`.
///
/// The returned handle may be aborted if the session ends first.
pub fn spawn_fetch(provider: CountryProvider, sender: mpsc::Sender<PoolEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match provider.fetch().await {
            Ok(countries) => {
                info!(count = countries.len(), "Country pool fetched");
                PoolEvent::Loaded(countries)
            }
            Err(err) => {
                error!(%err, url = provider.url(), "Country fetch failed");
                PoolEvent::Failed(err)
            }
        };
        let _ = sender.send(event).await;
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_reports_failure() {
        let provider =
            CountryProvider::new("http://127.0.0.1:9/flags", Duration::from_secs(2)).expect("client");
        let (tx, mut rx) = mpsc::channel(1);
        spawn_fetch(provider, tx);

        match rx.recv().await {
            Some(PoolEvent::Failed(ProviderError::Network(_))) => {}
            other => panic!("unexpected event {other:?}"),
        }
    }
}
