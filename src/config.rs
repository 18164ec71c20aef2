//! Chain identifiers and the endpoint table.
//!
//! The table maps each supported chain to its subgraph URL, the first date for
//! which fee data is considered valid, and the methodology text shown to
//! readers. A built-in table ships with the crate; an external TOML file can
//! replace it at process start without a rebuild. Once loaded the table is
//! never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FeesError, Result};

/// Environment variable naming an external TOML endpoint table.
pub const CONFIG_ENV: &str = "AMPED_FEES_CONFIG";

/// Version of the adapter contract exposed to orchestrating callers.
pub const ADAPTER_VERSION: u32 = 1;

pub const DEFAULT_METHODOLOGY: &str = "Fees collected from trading, liquidation, and margin activities. All fees go to liquidity providers.";

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// A blockchain on which the exchange is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "lightlink_phoenix")]
    LightlinkPhoenix,
    #[serde(rename = "sonic")]
    Sonic,
    #[serde(rename = "berachain")]
    Berachain,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "sseed")]
    Superseed,
}

impl Chain {
    pub const ALL: [Chain; 5] = [
        Chain::LightlinkPhoenix,
        Chain::Sonic,
        Chain::Berachain,
        Chain::Base,
        Chain::Superseed,
    ];

    /// Identifier used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::LightlinkPhoenix => "lightlink_phoenix",
            Chain::Sonic => "sonic",
            Chain::Berachain => "berachain",
            Chain::Base => "base",
            Chain::Superseed => "sseed",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = FeesError;

    fn from_str(s: &str) -> Result<Self> {
        Chain::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FeesError::UnknownChain(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ChainConfig
// ---------------------------------------------------------------------------

/// Endpoint and display metadata for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Subgraph GraphQL endpoint.
    pub endpoint: String,
    /// First date with meaningful data. Informational only.
    pub start: NaiveDate,
    #[serde(default = "default_methodology")]
    pub methodology: String,
}

fn default_methodology() -> String {
    DEFAULT_METHODOLOGY.to_string()
}

/// Endpoint and start date `(year, month, day)` of each deployment.
fn builtin_entries() -> [(Chain, &'static str, (i32, u32, u32)); 5] {
    [
        (
            Chain::LightlinkPhoenix,
            "https://graph.phoenix.lightlink.io/query/subgraphs/name/amped-finance/trades",
            (2024, 6, 1),
        ),
        (
            Chain::Sonic,
            "https://api.goldsky.com/api/public/project_cm9j641qy0e0w01tzh6s6c8ek/subgraphs/sonic-trades/1.0.1/gn",
            (2024, 12, 31),
        ),
        (
            Chain::Berachain,
            "https://api.studio.thegraph.com/query/91379/amped-trades-bera/version/latest",
            (2025, 2, 6),
        ),
        (
            Chain::Base,
            "https://api.studio.thegraph.com/query/91379/trades-base/version/latest",
            (2025, 2, 20),
        ),
        (
            Chain::Superseed,
            "https://api.goldsky.com/api/public/project_cm9j641qy0e0w01tzh6s6c8ek/subgraphs/superseed-trades/1.0.1/gn",
            (2025, 4, 22),
        ),
    ]
}

// ---------------------------------------------------------------------------
// EndpointTable
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    chains: BTreeMap<String, ChainConfig>,
}

/// Read-only mapping from [`Chain`] to [`ChainConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    chains: BTreeMap<Chain, ChainConfig>,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EndpointTable {
    /// The table compiled into the crate.
    pub fn builtin() -> Self {
        let chains = builtin_entries()
            .into_iter()
            .map(|(chain, endpoint, (year, month, day))| {
                let start = NaiveDate::from_ymd_opt(year, month, day)
                    .expect("built-in start dates are valid calendar dates");
                (
                    chain,
                    ChainConfig {
                        endpoint: endpoint.to_string(),
                        start,
                        methodology: default_methodology(),
                    },
                )
            })
            .collect();
        Self { chains }
    }

    /// Parse a TOML table of the form:
    ///
    /// ```toml
    /// [chains.sonic]
    /// endpoint = "https://example.com/subgraphs/sonic"
    /// start = "2024-12-31"
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawTable = toml::from_str(s)?;
        let mut chains = BTreeMap::new();
        for (id, cfg) in raw.chains {
            let chain: Chain = id.parse()?;
            reqwest::Url::parse(&cfg.endpoint).map_err(|e| {
                FeesError::Config(format!("invalid endpoint for {chain}: {e}"))
            })?;
            chains.insert(chain, cfg);
        }
        if chains.is_empty() {
            return Err(FeesError::Config("endpoint table has no chains".into()));
        }
        Ok(Self { chains })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.as_ref().display(),
            chains = table.len(),
            "loaded endpoint table"
        );
        Ok(table)
    }

    /// Load the file named by [`CONFIG_ENV`], or the built-in table if unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(path),
            _ => Ok(Self::builtin()),
        }
    }

    pub fn get(&self, chain: Chain) -> Option<&ChainConfig> {
        self.chains.get(&chain)
    }

    /// Like [`get`](Self::get), but a missing chain is an error.
    pub fn require(&self, chain: Chain) -> Result<&ChainConfig> {
        self.get(chain)
            .ok_or_else(|| FeesError::UnknownChain(chain.to_string()))
    }

    pub fn chains(&self) -> impl Iterator<Item = (Chain, &ChainConfig)> {
        self.chains.iter().map(|(c, cfg)| (*c, cfg))
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
