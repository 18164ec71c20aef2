//! Adapter integration tests: day bucketing, key pairs, aggregation and
//! error propagation through `AmpedFees`, using an in-memory source.

mod common;

use std::io::Write;
use std::sync::{Arc, Mutex};

use amped_fees::{fetch_fees, AmpedFees, Chain, FeePeriod, FeeQueryKey, FeesError};
use chrono::NaiveDate;
use common::{record, sample_table, StubSource, BASE, DAY, SONIC, TS};

fn client(stub: &StubSource) -> AmpedFees {
    AmpedFees::builder()
        .endpoints(sample_table())
        .source(stub.clone())
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

#[test]
fn fetch_reports_normalized_timestamp_and_both_figures() {
    let stub = StubSource::new();
    stub.reply(SONIC, "1717977600:daily", vec![record("10", "20", "70")]);
    stub.reply(SONIC, "total", vec![record("1000", "2000", "7000")]);

    let result = client(&stub).fetch(Chain::Sonic, TS).unwrap();

    assert_eq!(result.timestamp, DAY);
    assert_eq!(result.daily_fees, Some((10.0 + 20.0 + 70.0) * 1e-30));
    assert_eq!(result.total_fees, Some((1000.0 + 2000.0 + 7000.0) * 1e-30));
}

#[test]
fn fetch_issues_daily_and_total_keys_against_chain_endpoint() {
    let stub = StubSource::new();
    client(&stub).fetch(Chain::Sonic, TS).unwrap();

    let calls = stub.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|(endpoint, _)| endpoint == SONIC));

    let keys: Vec<FeeQueryKey> = calls.into_iter().map(|(_, key)| key).collect();
    assert!(keys.contains(&FeeQueryKey {
        period: FeePeriod::Daily,
        id: "1717977600:daily".into(),
    }));
    assert!(keys.contains(&FeeQueryKey {
        period: FeePeriod::Total,
        id: "total".into(),
    }));
}

#[test]
fn timestamps_on_the_same_day_share_the_daily_key() {
    let stub = StubSource::new();
    let fees = client(&stub);
    fees.fetch(Chain::Base, DAY).unwrap();
    fees.fetch(Chain::Base, DAY + 86_399).unwrap();

    let daily_ids: Vec<String> = stub
        .calls()
        .into_iter()
        .filter(|(_, key)| key.period == FeePeriod::Daily)
        .map(|(_, key)| key.id)
        .collect();
    assert_eq!(daily_ids, vec!["1717977600:daily", "1717977600:daily"]);
}

#[test]
fn missing_daily_bucket_leaves_total_populated() {
    let stub = StubSource::new();
    stub.reply(SONIC, "total", vec![record("5", "5", "5")]);

    let result = client(&stub).fetch(Chain::Sonic, TS).unwrap();
    assert_eq!(result.daily_fees, None);
    assert_eq!(result.total_fees, Some(15.0 * 1e-30));
}

#[test]
fn duplicate_records_report_no_data() {
    let stub = StubSource::new();
    stub.reply(
        SONIC,
        "1717977600:daily",
        vec![record("1", "1", "1"), record("2", "2", "2")],
    );
    stub.reply(SONIC, "total", vec![record("0", "0", "3")]);

    let result = client(&stub).fetch(Chain::Sonic, TS).unwrap();
    assert_eq!(result.daily_fees, None);
    assert_eq!(result.total_fees, Some(3.0 * 1e-30));
}

#[test]
fn transport_failure_propagates() {
    let stub = StubSource::new();
    stub.fail(SONIC, "total", "subgraph unavailable");

    let err = client(&stub).fetch(Chain::Sonic, TS).unwrap_err();
    assert!(matches!(err, FeesError::GraphQl(msg) if msg == "subgraph unavailable"));
}

#[test]
fn malformed_amount_fails_the_fetch() {
    let stub = StubSource::new();
    stub.reply(SONIC, "1717977600:daily", vec![record("1", "NaN", "1")]);

    let err = client(&stub).fetch(Chain::Sonic, TS).unwrap_err();
    assert!(matches!(err, FeesError::InvalidAmount { field: "margin", .. }));
}

#[test]
fn unconfigured_chain_is_rejected_without_lookups() {
    let stub = StubSource::new();
    let err = client(&stub).fetch(Chain::Berachain, TS).unwrap_err();
    assert!(matches!(err, FeesError::UnknownChain(id) if id == "berachain"));
    assert!(stub.calls().is_empty());
}

#[test]
fn free_function_matches_client() {
    let stub = StubSource::new();
    stub.reply(BASE, "total", vec![record("7", "0", "0")]);

    let direct = fetch_fees(&stub, BASE, TS).unwrap();
    let via_client = client(&stub).fetch(Chain::Base, TS).unwrap();
    assert_eq!(direct, via_client);
}

// ---------------------------------------------------------------------------
// logging
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[test]
fn empty_and_duplicate_buckets_log_warnings() {
    let stub = StubSource::new();
    stub.reply(
        SONIC,
        "total",
        vec![record("1", "1", "1"), record("2", "2", "2")],
    );

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        client(&stub).fetch(Chain::Sonic, TS).unwrap();
    });

    let lines = logs.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].contains("WARN") && lines[0].contains("no feeStats record"));
    assert!(lines[1].contains("WARN") && lines[1].contains("more than one record"));
}

// ---------------------------------------------------------------------------
// fetch_all
// ---------------------------------------------------------------------------

#[test]
fn fetch_all_isolates_chain_failures() {
    let stub = StubSource::new();
    stub.fail(SONIC, "1717977600:daily", "boom");
    stub.reply(BASE, "total", vec![record("1", "2", "3")]);

    let results = client(&stub).fetch_all(TS);
    assert_eq!(results.len(), 2);

    let (sonic_chain, sonic) = &results[0];
    assert_eq!(*sonic_chain, Chain::Sonic);
    assert!(sonic.is_err());

    let (base_chain, base) = &results[1];
    assert_eq!(*base_chain, Chain::Base);
    assert_eq!(base.as_ref().unwrap().total_fees, Some(6.0 * 1e-30));
}

// ---------------------------------------------------------------------------
// ChainAdapter metadata
// ---------------------------------------------------------------------------

#[test]
fn chain_adapter_exposes_metadata() {
    let stub = StubSource::new();
    let fees = client(&stub);

    let base = fees.chain(Chain::Base).unwrap();
    assert_eq!(base.chain(), Chain::Base);
    assert_eq!(base.endpoint(), BASE);
    assert_eq!(base.start(), NaiveDate::from_ymd_opt(2025, 2, 20).unwrap());
    assert_eq!(base.start_timestamp(), 1_740_009_600);
    assert_eq!(base.methodology(), "Base fees.");

    let sonic = fees.chain(Chain::Sonic).unwrap();
    assert!(sonic.methodology().starts_with("Fees collected from trading"));
}

#[test]
fn start_date_is_not_enforced() {
    let stub = StubSource::new();
    let result = client(&stub).fetch(Chain::Base, 0).unwrap();
    assert_eq!(result.timestamp, 0);
    assert_eq!(result.daily_fees, None);
}

#[test]
fn client_reports_version_and_chains() {
    let fees = client(&StubSource::new());
    assert_eq!(fees.version(), 1);
    assert_eq!(fees.chains(), vec![Chain::Sonic, Chain::Base]);
    assert_eq!(fees.to_string(), "AmpedFees(version=1, chains=[sonic, base])");
}
