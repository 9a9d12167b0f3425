//! Tracing configuration for debugging lattice queries.
//!
//! Supports three output formats controlled by `RBZ_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented output via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! # Every join and meet with its operands and result
//! RBZ_LOG=rbz_solver=trace RBZ_LOG_FORMAT=tree cargo test -p rbz
//!
//! # Structured relation/lattice query records only
//! RBZ_LOG=rbz::query_json=trace RBZ_LOG_FORMAT=json RBZ_QUERY_RUN_ID=run1 cargo bench
//! ```
//!
//! The subscriber is only initialised when `RBZ_LOG` (or `RUST_LOG`) is set.

use std::str::FromStr;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Unrecognised values fall back to `Text`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        })
    }
}

impl LogFormat {
    /// Read `RBZ_LOG_FORMAT`.
    pub fn from_env() -> Self {
        std::env::var("RBZ_LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Build an `EnvFilter` from `RBZ_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("RBZ_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `RBZ_LOG` nor `RUST_LOG` is set. Output goes to
/// stderr. Calling it twice is harmless: the second registration is ignored.
pub fn init_tracing() {
    if std::env::var_os("RBZ_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    let format = LogFormat::from_env();
    // A subscriber may already be installed by an embedder or another test.
    let installed = match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    if installed.is_ok() {
        tracing::debug!(?format, "tracing initialised");
    }
}
