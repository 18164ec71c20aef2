//! Shared test fixtures for the fee adapter integration tests.
//!
//! Provides `StubSource`, an in-memory [`FeeStatsSource`] that answers by
//! `(endpoint, id)` and records every key it is asked for.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use amped_fees::{EndpointTable, FeeQueryKey, FeeStatsRecord, FeeStatsResponse, FeeStatsSource, FeesError};

/// 2024-06-10T06:13:20Z
pub const TS: i64 = 1_718_000_000;
/// 2024-06-10T00:00:00Z
pub const DAY: i64 = 1_717_977_600;

#[derive(Clone)]
enum Reply {
    Records(Vec<FeeStatsRecord>),
    Fail(String),
}

#[derive(Clone, Default)]
pub struct StubSource {
    replies: Arc<Mutex<HashMap<(String, String), Reply>>>,
    calls: Arc<Mutex<Vec<(String, FeeQueryKey)>>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `id` on `endpoint` with the given records.
    pub fn reply(&self, endpoint: &str, id: &str, records: Vec<FeeStatsRecord>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert((endpoint.to_string(), id.to_string()), Reply::Records(records));
        self
    }

    /// Fail every lookup of `id` on `endpoint`.
    pub fn fail(&self, endpoint: &str, id: &str, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert((endpoint.to_string(), id.to_string()), Reply::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, FeeQueryKey)> {
        self.calls.lock().unwrap().clone()
    }
}

impl FeeStatsSource for StubSource {
    fn fetch_fee_stats(&self, endpoint: &str, key: &FeeQueryKey) -> amped_fees::Result<FeeStatsResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), key.clone()));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&(endpoint.to_string(), key.id.clone()))
            .cloned();
        match reply {
            Some(Reply::Records(records)) => Ok(FeeStatsResponse::new(records)),
            Some(Reply::Fail(message)) => Err(FeesError::GraphQl(message)),
            None => Ok(FeeStatsResponse::default()),
        }
    }
}

pub fn record(liquidation: &str, margin: &str, swap: &str) -> FeeStatsRecord {
    FeeStatsRecord::new(liquidation, margin, swap)
}

/// Two-chain endpoint table pointing at fake hosts.
pub fn sample_table() -> EndpointTable {
    EndpointTable::from_toml_str(
        r#"
        [chains.sonic]
        endpoint = "https://sonic.example/subgraph"
        start = "2024-12-31"

        [chains.base]
        endpoint = "https://base.example/subgraph"
        start = "2025-02-20"
        methodology = "Base fees."
        "#,
    )
    .unwrap()
}

pub const SONIC: &str = "https://sonic.example/subgraph";
pub const BASE: &str = "https://base.example/subgraph";
