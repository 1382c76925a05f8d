use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

use crate::settings::LogSettings;

lazy_static! {
    pub static ref QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "trivia_questions_served_total",
        "Number of questions handed out to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED: IntCounter = register_int_counter!(
        "trivia_questions_created_total",
        "Number of questions created through the API"
    )
    .unwrap();
}

/// Installs the global subscriber. `LOG_LEVEL` overrides the configured filter.
pub fn init_tracing(log: &LogSettings) {
    let mut fmt_layer = fmt::layer();
    if log.span_events {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(&log.level))
        .unwrap_or_else(|e| {
            eprintln!("Invalid log filter {:?}: {e}", log.level);
            EnvFilter::new("info")
        });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
