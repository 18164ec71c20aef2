//! Amped Finance fee SDK for Rust.
//!
//! Reads daily and lifetime protocol fees from the per-chain GraphQL
//! subgraphs. Each lookup sums the liquidation, margin and swap fee
//! categories of one `feeStats` bucket and rescales the on-chain 10^30
//! fixed-point amount to a decimal figure.
//!
//! # Quick start
//!
//! ```no_run
//! use amped_fees::{AmpedFees, Chain};
//!
//! let fees = AmpedFees::builder().build().unwrap();
//!
//! // Fees for the UTC day containing the timestamp, plus the lifetime total
//! let result = fees.fetch(Chain::Sonic, 1_718_000_000).unwrap();
//! println!("{:?} {:?}", result.daily_fees, result.total_fees);
//! ```

pub mod adapter;
pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod query;
pub mod transport;

pub use adapter::{fetch_fees, ChainAdapter};
#[cfg(feature = "async")]
pub use async_client::AsyncAmpedFees;
pub use config::{Chain, ChainConfig, EndpointTable};
pub use error::{FeesError, Result};
pub use models::{FeePeriod, FeeQueryKey, FeeResult, FeeStatsRecord, FeeStatsResponse};
pub use transport::{FeeStatsSource, GraphqlTransport};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// AmpedFeesBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AmpedFees`] instance.
///
/// Use [`AmpedFees::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](AmpedFeesBuilder::build) to create the client.
pub struct AmpedFeesBuilder {
    endpoints: Option<EndpointTable>,
    source: Option<Arc<dyn FeeStatsSource>>,
    timeout: Duration,
    user_agent: String,
}

impl Default for AmpedFeesBuilder {
    fn default() -> Self {
        Self {
            endpoints: None,
            source: None,
            timeout: transport::DEFAULT_TIMEOUT,
            user_agent: transport::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AmpedFeesBuilder {
    /// Use a specific endpoint table.
    ///
    /// If not set, the table named by the `AMPED_FEES_CONFIG` environment
    /// variable is loaded, falling back to the built-in table.
    pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Replace the HTTP transport with another [`FeeStatsSource`].
    ///
    /// When set, [`timeout`](Self::timeout) and
    /// [`user_agent`](Self::user_agent) are ignored.
    pub fn source<S: FeeStatsSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Set the HTTP request timeout for subgraph queries.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header sent to subgraph endpoints.
    ///
    /// Defaults to `amped-fees/<crate version>`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client. No network traffic happens until the first fetch.
    pub fn build(self) -> Result<AmpedFees> {
        let endpoints = match self.endpoints {
            Some(table) => table,
            None => EndpointTable::from_env()?,
        };
        let source: Arc<dyn FeeStatsSource> = match self.source {
            Some(source) => source,
            None => Arc::new(GraphqlTransport::new(self.timeout, &self.user_agent)?),
        };
        Ok(AmpedFees { endpoints, source })
    }
}

// ---------------------------------------------------------------------------
// AmpedFees
// ---------------------------------------------------------------------------

/// The main entry point: an endpoint table plus the transport used to
/// query it.
///
/// Holds no per-call state; every fetch is an independent pair of lookups.
pub struct AmpedFees {
    endpoints: EndpointTable,
    source: Arc<dyn FeeStatsSource>,
}

impl AmpedFees {
    /// Create a new builder for configuring the client.
    pub fn builder() -> AmpedFeesBuilder {
        AmpedFeesBuilder::default()
    }

    /// Version of the adapter contract.
    pub fn version(&self) -> u32 {
        config::ADAPTER_VERSION
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Chains present in the endpoint table, in [`Chain`] declaration order.
    pub fn chains(&self) -> Vec<Chain> {
        self.endpoints.chains().map(|(chain, _)| chain).collect()
    }

    /// Access the adapter for one chain.
    ///
    /// Fails with [`FeesError::UnknownChain`] if the table has no entry for it.
    pub fn chain(&self, chain: Chain) -> Result<ChainAdapter<'_>> {
        let config = self.endpoints.require(chain)?;
        Ok(ChainAdapter::new(chain, config, self.source.as_ref()))
    }

    /// Daily and lifetime fees on `chain` for the UTC day containing
    /// `timestamp`.
    pub fn fetch(&self, chain: Chain, timestamp: i64) -> Result<FeeResult> {
        self.chain(chain)?.fetch(timestamp)
    }

    /// Fetch every configured chain independently.
    ///
    /// A failure on one chain is reported in its own slot and does not stop
    /// the others.
    pub fn fetch_all(&self, timestamp: i64) -> Vec<(Chain, Result<FeeResult>)> {
        self.endpoints
            .chains()
            .map(|(chain, config)| {
                let result = ChainAdapter::new(chain, config, self.source.as_ref()).fetch(timestamp);
                if let Err(e) = &result {
                    tracing::warn!(%chain, error = %e, "fee lookup failed");
                }
                (chain, result)
            })
            .collect()
    }

    #[cfg(feature = "async")]
    pub(crate) fn source(&self) -> Arc<dyn FeeStatsSource> {
        Arc::clone(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for AmpedFees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains: Vec<&str> = self.endpoints.chains().map(|(c, _)| c.as_str()).collect();
        write!(f, "AmpedFees(version={}, chains=[{}])", self.version(), chains.join(", "))
    }
}
