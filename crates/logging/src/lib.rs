#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the diagnostic plumbing shared by the symtree
//! workspace. Diagnostics are grouped into [`DebugFlag`] categories whose
//! levels are configured per thread through a [`VerbosityConfig`], mirroring
//! the `-v` / `--debug=FLAG[LEVEL]` switches accepted by the command line.
//!
//! # Design
//!
//! - [`VerbosityConfig`] maps a `-v` count onto per-flag levels and accepts
//!   individual `NAME[LEVEL]` tokens.
//! - [`init`] and [`debug_gte`] store and query the configuration for the
//!   current thread. The walker runs on the thread that configured it, so no
//!   synchronisation is required.
//! - [`debug_log!`] checks the flag before formatting and forwards enabled
//!   events to `tracing`.
//! - [`init_tracing`] installs a `tracing-subscriber` formatter on standard
//!   error.
//!
//! # Invariants
//!
//! - Disabled diagnostics never format their arguments.
//! - Nothing in this crate writes to standard output.
//!
//! # Examples
//!
//! ```
//! use logging::{DebugFlag, VerbosityConfig, debug_gte, init};
//!
//! let mut config = VerbosityConfig::default();
//! config.apply_debug_flag("link2").unwrap();
//! init(config);
//!
//! assert!(debug_gte(DebugFlag::Link, 2));
//! assert!(!debug_gte(DebugFlag::Scan, 1));
//! ```

mod config;
mod levels;
mod macros;
mod subscriber;
mod thread_local;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels};
pub use subscriber::{LOG_ENV, init_tracing};
pub use thread_local::{current, debug_gte, init};

#[doc(hidden)]
pub use tracing as __tracing;
