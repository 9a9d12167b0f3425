//! Structured query tracing for solver query entry points.
//!
//! Events use target `rbz::query_json` and are intended to be consumed with:
//! `RBZ_LOG=rbz::query_json=trace RBZ_LOG_FORMAT=json`.
//!
//! Environment:
//! - `RBZ_QUERY_RUN_ID`: optional run identifier attached to every event.

use crate::types::TypeId;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "rbz::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| std::env::var("RBZ_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string()))
        .as_str()
}

/// Start of a join or meet.
#[inline]
pub(crate) fn lattice_start(query_id: u64, op: &'static str, left: TypeId, right: TypeId) {
    trace!(
        target: "rbz::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        left_type_id = left.0,
        right_type_id = right.0
    );
}

#[inline]
pub(crate) fn lattice_end(query_id: u64, op: &'static str, result_type: TypeId) {
    trace!(
        target: "rbz::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result_type_id = result_type.0
    );
}

#[inline]
pub(crate) fn relation_start(query_id: u64, op: &'static str, source: TypeId, target: TypeId) {
    trace!(
        target: "rbz::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        source_type_id = source.0,
        target_type_id = target.0
    );
}

#[inline]
pub(crate) fn relation_end(query_id: u64, op: &'static str, result: bool) {
    trace!(
        target: "rbz::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result
    );
}
