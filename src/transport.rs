//! Remote lookup of a single `feeStats` bucket.
//!
//! [`FeeStatsSource`] is the seam between fee computation and the network.
//! [`GraphqlTransport`] is the production implementation: one blocking HTTP
//! POST per lookup, with no retry or fallback. Callers own deadlines through
//! the configured client timeout.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::models::{FeeQueryKey, FeeStatsResponse};
use crate::query::{GraphqlRequest, GraphqlResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("amped-fees/", env!("CARGO_PKG_VERSION"));

/// Fetches the `feeStats` records for one query key from one endpoint.
pub trait FeeStatsSource: Send + Sync {
    fn fetch_fee_stats(&self, endpoint: &str, key: &FeeQueryKey) -> Result<FeeStatsResponse>;
}

/// GraphQL-over-HTTP implementation of [`FeeStatsSource`].
#[derive(Debug, Clone)]
pub struct GraphqlTransport {
    client: Client,
}

impl GraphqlTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl FeeStatsSource for GraphqlTransport {
    fn fetch_fee_stats(&self, endpoint: &str, key: &FeeQueryKey) -> Result<FeeStatsResponse> {
        let body = self
            .client
            .post(endpoint)
            .json(&GraphqlRequest::fee_stats(key))
            .send()?
            .error_for_status()?
            .bytes()?;
        let envelope: GraphqlResponse<FeeStatsResponse> = serde_json::from_slice(&body)?;
        envelope.into_data()
    }
}
