//! crates/logging/src/subscriber.rs
//! Installs the `tracing` subscriber that renders walker diagnostics.
//!
//! Diagnostics are emitted through [`debug_log!`](crate::debug_log), which
//! consults the thread-local [`VerbosityConfig`] before handing the event to
//! `tracing`. The subscriber installed here formats those events onto
//! standard error so they never interleave with the listing written to
//! standard output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! logging::debug_log!(Scan, 1, "scanning {:?}", path);
//! ```

use super::config::VerbosityConfig;
use std::io;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that overrides the filter derived from the verbosity
/// configuration, using `tracing-subscriber` directive syntax.
pub const LOG_ENV: &str = "SYMTREE_LOG";

/// Returns the `EnvFilter` directive matching a verbosity configuration.
fn filter_directive(config: &VerbosityConfig) -> &'static str {
    if config.debug.any() {
        "symtree=debug"
    } else {
        "off"
    }
}

/// Initialize tracing with the given verbosity configuration.
///
/// The configuration is stored in the calling thread's verbosity slot and a
/// global subscriber writing to standard error is installed. Returns `false`
/// when another global subscriber was already set; the thread-local
/// configuration is updated either way.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let directive = filter_directive(&config);
    super::thread_local::init(config);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
}
