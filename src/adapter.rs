//! Per-chain fee adapter: normalize the timestamp, look up the daily and
//! lifetime buckets, aggregate each one.

use chrono::NaiveDate;

use crate::aggregate::aggregate;
use crate::config::{Chain, ChainConfig};
use crate::error::Result;
use crate::models::{FeeQueryKey, FeeResult};
use crate::normalize::{date_start, day_start};
use crate::transport::FeeStatsSource;

/// Fetch one bucket and aggregate it.
///
/// Transport errors propagate unchanged. A bucket without exactly one record
/// yields `Ok(None)`.
pub fn lookup(source: &dyn FeeStatsSource, endpoint: &str, key: &FeeQueryKey) -> Result<Option<f64>> {
    tracing::debug!(endpoint, period = key.period.as_str(), id = %key.id, "querying feeStats");
    let response = source.fetch_fee_stats(endpoint, key)?;
    let count = response.records().len();
    if count > 1 {
        tracing::warn!(
            endpoint,
            id = %key.id,
            count,
            "feeStats returned more than one record for a unique id; reporting no data"
        );
    } else if count == 0 {
        tracing::warn!(endpoint, id = %key.id, "no feeStats record; reporting no data");
    }
    aggregate(&response)
}

/// Daily and lifetime fees for the UTC day containing `timestamp`.
///
/// The two lookups are independent; this issues them one after the other.
pub fn fetch_fees(source: &dyn FeeStatsSource, endpoint: &str, timestamp: i64) -> Result<FeeResult> {
    let day = day_start(timestamp);
    let (daily_key, total_key) = FeeQueryKey::pair(day);
    let daily_fees = lookup(source, endpoint, &daily_key)?;
    let total_fees = lookup(source, endpoint, &total_key)?;
    Ok(FeeResult {
        timestamp: day,
        daily_fees,
        total_fees,
    })
}

// ---------------------------------------------------------------------------
// ChainAdapter
// ---------------------------------------------------------------------------

/// [`fetch_fees`] bound to one chain's endpoint, plus that chain's metadata.
pub struct ChainAdapter<'a> {
    chain: Chain,
    config: &'a ChainConfig,
    source: &'a dyn FeeStatsSource,
}

impl<'a> ChainAdapter<'a> {
    pub fn new(chain: Chain, config: &'a ChainConfig, source: &'a dyn FeeStatsSource) -> Self {
        Self {
            chain,
            config,
            source,
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// First date with meaningful data. Not enforced by [`fetch`](Self::fetch).
    pub fn start(&self) -> NaiveDate {
        self.config.start
    }

    pub fn start_timestamp(&self) -> i64 {
        date_start(self.config.start)
    }

    pub fn methodology(&self) -> &str {
        &self.config.methodology
    }

    pub fn fetch(&self, timestamp: i64) -> Result<FeeResult> {
        let _span = tracing::debug_span!("fetch_fees", chain = %self.chain, timestamp).entered();
        fetch_fees(self.source, &self.config.endpoint, timestamp)
    }
}
