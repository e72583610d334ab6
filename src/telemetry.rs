//! Tracing setup for the catalog binary and its embedders.
//!
//! `RUST_LOG` wins when it is set. Otherwise `CMDB_LOG_LEVEL` decides: a
//! bare level (`info`, `debug`, ...) expands into [`filter_directives`],
//! which keeps the catalog at that level and caps the database drivers; a
//! full directive string is used as written.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_log::{AsLog, LogTracer};
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::{EnvFilter, fmt, layer::Layer, layer::SubscriberExt};

use crate::config::AppConfig;

/// Driver targets that log every statement and pool event. They stay at
/// these levels unless the catalog itself runs at `trace`.
const DRIVER_TARGETS: &[(&str, &str)] = &[
    ("sqlx", "warn"),
    ("sea_orm", "warn"),
    ("sea_orm_migration", "info"),
];

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("invalid log filter '{directives}': {source}")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Expands a configured log level into the catalog's filter directives.
///
/// Anything that is not a bare level is returned unchanged.
pub fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    let Ok(parsed) = LevelFilter::from_str(level) else {
        return level.to_string();
    };

    let mut directives = vec![level.to_string(), format!("cmdb_catalog={level}")];
    if parsed > LevelFilter::WARN && parsed < LevelFilter::TRACE {
        directives.extend(
            DRIVER_TARGETS
                .iter()
                .map(|(target, cap)| format!("{target}={cap}")),
        );
    }
    directives.join(",")
}

fn build_filter(config: &AppConfig) -> Result<EnvFilter, TelemetryInitError> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    let directives = filter_directives(&config.log_level);
    EnvFilter::try_new(&directives).map_err(|source| TelemetryInitError::Filter {
        directives,
        source,
    })
}

/// Installs the global subscriber once per process; later calls are no-ops.
///
/// Records emitted through the `log` crate (sqlx, sea-orm) are bridged into
/// tracing so they share the filter and format.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let result = build_filter(config).and_then(|filter| {
        let fmt_layer = if config.log_format == "pretty" {
            fmt::layer().pretty().boxed()
        } else {
            fmt::layer().json().boxed()
        };
        let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).map_err(TelemetryInitError::from)
    });
    if result.is_err() {
        INSTALLED.store(false, Ordering::SeqCst);
        return result;
    }

    // The bridge takes the subscriber's max level, so it must come second.
    // An embedder may already own the `log` facade; tracing still works then.
    if let Err(err) = LogTracer::builder()
        .with_max_level(LevelFilter::current().as_log())
        .init()
    {
        tracing::warn!(error = %err, "log records will not reach tracing");
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Tracing initialized"
    );
    Ok(())
}
