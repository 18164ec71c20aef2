//! GraphQL request construction and response envelope for `feeStats`.

use serde::{Deserialize, Serialize};

use crate::error::{FeesError, Result};
use crate::models::FeeQueryKey;

/// Parameterized by `$period` and `$id`; `id` is unique so at most one
/// record is expected back.
pub const FEE_STATS_QUERY: &str = r#"query get_fees($period: String!, $id: String!) {
  feeStats(where: { period: $period, id: $id }) {
    liquidation
    margin
    swap
  }
}"#;

/// JSON body posted to a subgraph endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a> {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: &'a FeeQueryKey,
}

impl<'a> GraphqlRequest<'a> {
    pub fn fee_stats(key: &'a FeeQueryKey) -> Self {
        Self {
            query: FEE_STATS_QUERY,
            operation_name: "get_fees",
            variables: key,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T> GraphqlResponse<T> {
    /// Unwrap `data`, turning a non-empty `errors` array or missing `data`
    /// into [`FeesError::GraphQl`].
    pub fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(FeesError::GraphQl(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| FeesError::GraphQl("response contained no data".into()))
    }
}
