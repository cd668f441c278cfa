//! Logging utilities for PingRelay.
//!
//! Every binary in the workspace initializes `tracing` through this module so
//! that log lines carry the same target, file, line and thread information.

use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Target prefix shared by all workspace crates.
const CRATE_TARGET: &str = "pingrelay";

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber from a configured level name.
///
/// Unknown names fall back to INFO.
///
/// # Examples
///
/// ```
/// use pingrelay_common::logging;
///
/// logging::init_from_str("debug");
/// ```
pub fn init_from_str(level: &str) {
    init_with_level(parse_level(level));
}

/// Parse a level name such as "warn", case-insensitively. Defaults to INFO.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured for other targets; the level given here applies to
/// the workspace crates.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = Directive::from_str(&format!("{}={}", CRATE_TARGET, level)) {
        filter = filter.add_directive(directive);
    }

    // try_init: a subscriber may already be installed (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
