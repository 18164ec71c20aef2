use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FeePeriod / FeeQueryKey — Which aggregate bucket to fetch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeePeriod {
    Daily,
    Total,
}

impl FeePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeePeriod::Daily => "daily",
            FeePeriod::Total => "total",
        }
    }
}

/// Identifies one `feeStats` bucket. Serializes directly as the GraphQL
/// variables `{ "period": ..., "id": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeQueryKey {
    pub period: FeePeriod,
    pub id: String,
}

impl FeeQueryKey {
    /// Bucket for the UTC day starting at `day_timestamp`.
    pub fn daily(day_timestamp: i64) -> Self {
        Self {
            period: FeePeriod::Daily,
            id: format!("{day_timestamp}:daily"),
        }
    }

    /// Lifetime bucket. Independent of any day.
    pub fn total() -> Self {
        Self {
            period: FeePeriod::Total,
            id: "total".to_string(),
        }
    }

    /// The daily and lifetime keys, always issued together.
    pub fn pair(day_timestamp: i64) -> (Self, Self) {
        (Self::daily(day_timestamp), Self::total())
    }
}

// ---------------------------------------------------------------------------
// FeeStatsRecord / FeeStatsResponse — Subgraph payload
// ---------------------------------------------------------------------------

/// Fee amounts for one bucket, as decimal integer strings scaled by 10^30.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStatsRecord {
    pub liquidation: String,
    pub margin: String,
    pub swap: String,
}

impl FeeStatsRecord {
    pub fn new(liquidation: &str, margin: &str, swap: &str) -> Self {
        Self {
            liquidation: liquidation.to_string(),
            margin: margin.to_string(),
            swap: swap.to_string(),
        }
    }

    /// Field name and raw value for each fee category.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("liquidation", self.liquidation.as_str()),
            ("margin", self.margin.as_str()),
            ("swap", self.swap.as_str()),
        ]
    }
}

/// The `data` object of a `feeStats` query. A missing or null array is
/// treated the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStatsResponse {
    #[serde(rename = "feeStats", default)]
    pub fee_stats: Option<Vec<FeeStatsRecord>>,
}

impl FeeStatsResponse {
    pub fn new(records: Vec<FeeStatsRecord>) -> Self {
        Self {
            fee_stats: Some(records),
        }
    }

    pub fn records(&self) -> &[FeeStatsRecord] {
        self.fee_stats.as_deref().unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// FeeResult — Output of one invocation
// ---------------------------------------------------------------------------

/// `None` for either figure means the bucket did not hold exactly one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeResult {
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<f64>,
}
