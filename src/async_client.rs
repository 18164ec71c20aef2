//! Async wrapper around [`AmpedFees`] for use in async runtimes (Tokio, etc.).
//!
//! The blocking transport runs on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! daily and lifetime lookups of one fetch run as two separate tasks and are
//! joined before the result is assembled.
//!
//! # Example
//!
//! ```no_run
//! use amped_fees::{AsyncAmpedFees, Chain};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fees = AsyncAmpedFees::builder().build().await.unwrap();
//!     let result = fees.fetch(Chain::Base, 1_740_000_000).await.unwrap();
//!     println!("{result:?}");
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::adapter::lookup;
use crate::config::{Chain, EndpointTable};
use crate::error::{FeesError, Result};
use crate::models::{FeeQueryKey, FeeResult};
use crate::normalize::day_start;
use crate::transport::FeeStatsSource;
use crate::AmpedFees;

fn join_error(e: tokio::task::JoinError) -> FeesError {
    FeesError::Task(e.to_string())
}

// ---------------------------------------------------------------------------
// AsyncAmpedFeesBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncAmpedFees`] instance.
#[derive(Default)]
pub struct AsyncAmpedFeesBuilder {
    inner: crate::AmpedFeesBuilder,
}

impl AsyncAmpedFeesBuilder {
    /// Use a specific endpoint table instead of `AMPED_FEES_CONFIG` or the
    /// built-in table.
    pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.inner = self.inner.endpoints(endpoints);
        self
    }

    /// Replace the HTTP transport with another [`FeeStatsSource`].
    pub fn source<S: FeeStatsSource + 'static>(mut self, source: S) -> Self {
        self.inner = self.inner.source(source);
        self
    }

    /// Set the HTTP request timeout for subgraph queries.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Set the `User-Agent` header sent to subgraph endpoints.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.user_agent(user_agent);
        self
    }

    /// Build the async client.
    ///
    /// Construction of the blocking HTTP client runs on the blocking thread
    /// pool so it won't block the async event loop.
    pub async fn build(self) -> Result<AsyncAmpedFees> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let fees = inner.build()?;
            Ok(AsyncAmpedFees {
                inner: Arc::new(fees),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncAmpedFees
// ---------------------------------------------------------------------------

/// Async wrapper around [`AmpedFees`].
///
/// [`AmpedFees`] holds no mutable state, so it is shared through an [`Arc`]
/// without a lock.
pub struct AsyncAmpedFees {
    inner: Arc<AmpedFees>,
}

impl AsyncAmpedFees {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncAmpedFeesBuilder {
        AsyncAmpedFeesBuilder::default()
    }

    /// Borrow the underlying blocking client.
    pub fn blocking(&self) -> &AmpedFees {
        &self.inner
    }

    /// Daily and lifetime fees on `chain` for the UTC day containing
    /// `timestamp`, with both lookups in flight at once.
    pub async fn fetch(&self, chain: Chain, timestamp: i64) -> Result<FeeResult> {
        let endpoint = self.inner.endpoints().require(chain)?.endpoint.clone();
        let day = day_start(timestamp);
        let (daily_key, total_key) = FeeQueryKey::pair(day);

        let daily = spawn_lookup(self.inner.source(), endpoint.clone(), daily_key);
        let total = spawn_lookup(self.inner.source(), endpoint, total_key);
        let (daily_fees, total_fees) = tokio::try_join!(daily, total).map_err(join_error)?;

        Ok(FeeResult {
            timestamp: day,
            daily_fees: daily_fees?,
            total_fees: total_fees?,
        })
    }

    /// Fetch every configured chain, one after another, each with its two
    /// lookups concurrent.
    pub async fn fetch_all(&self, timestamp: i64) -> Vec<(Chain, Result<FeeResult>)> {
        let mut results = Vec::new();
        for chain in self.inner.chains() {
            results.push((chain, self.fetch(chain, timestamp).await));
        }
        results
    }
}

fn spawn_lookup(
    source: Arc<dyn FeeStatsSource>,
    endpoint: String,
    key: FeeQueryKey,
) -> tokio::task::JoinHandle<Result<Option<f64>>> {
    tokio::task::spawn_blocking(move || lookup(source.as_ref(), &endpoint, &key))
}
