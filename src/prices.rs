use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Duration;

use crate::config::Config;
use crate::models::Pricelist;
use crate::store::Store;

/// Client for the upstream travel prices API
#[derive(Clone)]
pub struct PriceSource {
    client: reqwest::Client,
    url: String,
}

impl PriceSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: config.travel_prices_url.clone(),
        })
    }

    pub async fn fetch(&self) -> Result<Pricelist> {
        let list = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.url))?
            .error_for_status()
            .context("Travel prices API returned an error status")?
            .json::<Pricelist>()
            .await
            .context("Failed to decode price list")?;

        tracing::debug!("Fetched price list {} with {} legs", list.id, list.legs.len());
        Ok(list)
    }
}

/// Make sure a valid price list is stored and report how long it stays valid.
///
/// When the latest stored list has not expired nothing is fetched. Otherwise
/// a new list is downloaded, stored, and cached searches for older lists are
/// dropped. The returned delay is never shorter than `min_delay`, so an
/// upstream list that is already stale does not make the caller spin.
pub async fn refresh_once(
    store: &Store,
    source: &PriceSource,
    max_pricelists: u32,
    min_delay: Duration,
) -> Result<Duration> {
    let now = Utc::now();
    if let Some(latest) = store.latest_pricelist().await? {
        if latest.is_valid_at(now) {
            return Ok(until(latest.valid_until - now, min_delay));
        }
    }

    let list = source.fetch().await?;
    store.insert_pricelist(&list, max_pricelists).await?;
    let dropped = store.clean_cache(&list.id).await?;
    if dropped > 0 {
        tracing::debug!("Dropped {} cached searches", dropped);
    }

    let latest = store
        .latest_pricelist()
        .await?
        .context("Price list missing right after insert")?;
    Ok(until(latest.valid_until - Utc::now(), min_delay))
}

fn until(remaining: chrono::Duration, min_delay: Duration) -> Duration {
    remaining.to_std().unwrap_or_default().max(min_delay)
}

/// Keep the stored price list current for as long as the process runs
pub async fn run_refresher(store: Store, source: PriceSource, max_pricelists: u32, retry_delay: Duration) {
    loop {
        let delay = match refresh_once(&store, &source, max_pricelists, retry_delay).await {
            Ok(delay) => {
                tracing::info!("Price list current, next refresh in {:?}", delay);
                delay
            }
            Err(e) => {
                tracing::error!("Price list refresh failed: {:#}", e);
                retry_delay
            }
        };
        tokio::time::sleep(delay).await;
    }
}
