//! Shared test support: tracing bootstrap and deterministic fixture stores.

use std::sync::Once;

use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::record::{LinearStore, NodeRecord};

static TEST_SETUP: Once = Once::new();

/// Install the global fmt subscriber for tests, once per process.
///
/// Honors `RUST_LOG`; defaults to `debug` when unset.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(env_filter),
        );

        if subscriber.try_init().is_ok() {
            info!("test setup complete");
        }
    });
}

/// The four-node reference store used throughout the tests:
///
/// ```text
///      1
///     / \
///    2   3
///    |
///    4
/// ```
pub fn sample_store() -> LinearStore {
    LinearStore::new(vec![
        NodeRecord::root(1)
            .with_field("title", json!("CEO"))
            .with_field("color", json!("#1AA59A")),
        NodeRecord::child(2, 1).with_field("title", json!("Engineer")),
        NodeRecord::child(3, 1).with_field("title", json!("Accountant")),
        NodeRecord::child(4, 2).with_field("title", json!("Driver")),
    ])
}

/// A reproducible store of `nodes` records shaped like the original org
/// chart feed: integer ids from 980 upward, cycling job titles and colors,
/// and each non-root node attached to a pseudo-randomly chosen earlier
/// node. Same input, same store — no RNG seed to chase in a failing test.
pub fn synthetic_store(nodes: usize) -> LinearStore {
    const TITLES: [&str; 10] = [
        "Accountant",
        "Engineer",
        "Doctor",
        "Teacher",
        "Nurse",
        "Driver",
        "Cook",
        "Guard",
        "Cleaner",
        "Clerk",
    ];
    const COLORS: [&str; 4] = ["#1AA59A", "#BA4A00", "#2E86C1", "#7D3C98"];

    let mut records = Vec::with_capacity(nodes);
    let mut state: u64 = 0x5DEECE66D;

    for i in 0..nodes {
        let id = 980 + i as u64;
        let parent_id = if i == 0 {
            None
        } else {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            Some(980 + (state % i as u64))
        };

        let record = NodeRecord {
            id: id.into(),
            parent_id: parent_id.map(Into::into),
            payload: serde_json::Map::new(),
        }
        .with_field("title", json!(TITLES[i % TITLES.len()]))
        .with_field("color", json!(COLORS[i % COLORS.len()]))
        .with_field("departmentId", json!(42));

        records.push(record);
    }

    LinearStore::new(records)
}
