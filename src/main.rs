//! "Stróż" health check runner

//! Probes configured sites once, delivers the report, exits.

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    unused_extern_crates
)]
// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


use std::process;
use stroz::*;
use tracing_subscriber::EnvFilter;


/// Initial setup of the tracing subscriber. RUST_LOG wins over configured level.
fn setup_logger(config: Option<&Config>) -> Result<(), Error> {
    let level = config
        .map(Config::get_log_level)
        .unwrap_or(tracing::level_filters::LevelFilter::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| Error::Logger(err.to_string()))
}


/// Load dotenv and configuration file, validate settings
fn load_settings() -> Result<Settings, Error> {
    let dotenv = load_dotenv();
    let config = Config::load();
    setup_logger(config.as_ref().ok())?;
    info!("Starting Stroz v{}", env!("CARGO_PKG_VERSION"));
    dotenv?;
    Ok(config?.resolve()?)
}


fn main() {
    let result = load_settings().and_then(|settings| execute(&settings));
    match result {
        Ok(summary) => {
            info!(
                "Report with {} field(s) delivered after {} attempt(s).",
                summary.report.fields.len(),
                summary.delivery.attempts
            );
        }
        Err(err) => {
            match &err {
                // logger might be unavailable here
                Error::Logger(_) => eprintln!("FATAL ERROR: {}", err),
                _ => error!("FATAL ERROR: {}", err),
            }
            process::exit(err.exit_code());
        }
    }
}
