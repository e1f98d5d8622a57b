#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front-end for `symtree`. It
//! recognises a root path, an optional visit cap and a handful of switches,
//! runs the [`walk`] engine once and streams the listing to standard output.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error, so tests can drive it with in-memory buffers. A
//! [`clap`](https://docs.rs/clap/) command definition performs the parse;
//! the visit cap is validated here rather than by `clap` so that a malformed
//! value degrades to the default with a warning instead of aborting.
//!
//! # Invariants
//!
//! - `run` never panics; I/O failures surface as non-zero exit codes.
//! - Standard output only ever receives listing lines, help or version text.
//!   Warnings, usage errors and diagnostics go to standard error.
//!
//! # Errors
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | `0`  | Listing completed                                    |
//! | `1`  | Usage error (missing path, unknown option, bad flag) |
//! | `2`  | The walk failed with a fatal filesystem error        |
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["symtree"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 1);
//! assert!(stdout.is_empty());
//! assert!(String::from_utf8_lossy(&stderr).starts_with("Usage:"));
//! ```

use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use logging::VerbosityConfig;
use walk::{DEFAULT_MAX_VISITS, EntryOrder, WalkBuilder, WalkError};

/// Name used in usage, version and error output.
pub const PROGRAM_NAME: &str = "symtree";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Exit code for usage errors.
const EXIT_USAGE: i32 = 1;

/// Exit code for fatal walk errors.
const EXIT_WALK_FAILED: i32 = 2;

const USAGE: &str = "Usage: symtree [OPTIONS] <PATH> [MAX_VISITS]\n";

/// Deterministic help text describing the CLI surface.
const HELP_TEXT: &str = concat!(
    "symtree - list a directory tree, following symbolic links safely\n",
    "\n",
    "Usage: symtree [OPTIONS] <PATH> [MAX_VISITS]\n",
    "\n",
    "Arguments:\n",
    "  <PATH>        Directory to list.\n",
    "  [MAX_VISITS]  How many times any one symlink target may be entered\n",
    "                (default 3, 0 disables following symlinks).\n",
    "\n",
    "Options:\n",
    "  -s, --sort          Visit directory entries in name order instead of\n",
    "                      the order reported by the filesystem.\n",
    "  -v, --verbose       Report walker decisions on standard error\n",
    "                      (repeat for more detail).\n",
    "      --debug=FLAGS   Enable diagnostics per flag: scan, link, visit or all,\n",
    "                      each optionally followed by a level (e.g. link2).\n",
    "  -h, --help          Show this help message and exit.\n",
    "  -V, --version       Output version information and exit.\n",
);

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    sort: bool,
    verbose: u8,
    debug: Vec<OsString>,
    path: Option<OsString>,
    max_visits: Option<OsString>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .short('s')
                .help("Visit directory entries in name order.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Report walker decisions on standard error.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Enable diagnostics per flag.")
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .index(1)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("max-visits")
                .value_name("MAX_VISITS")
                .index(2)
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let debug = matches
        .remove_many::<OsString>("debug")
        .map(|values| values.collect())
        .unwrap_or_default();

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        sort: matches.get_flag("sort"),
        verbose: matches.get_count("verbose"),
        debug,
        path: matches.remove_one::<OsString>("path"),
        max_visits: matches.remove_one::<OsString>("max-visits"),
    })
}

/// Interprets the visit cap argument.
///
/// Returns `None` when the value is not an integer. Negative values disable
/// symlink traversal and clamp to `0`; values beyond `u32::MAX` saturate.
fn parse_max_visits(value: &OsStr) -> Option<u32> {
    let parsed = value.to_str()?.trim().parse::<i64>().ok()?;
    Some(u32::try_from(parsed.max(0)).unwrap_or(u32::MAX))
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{}", error.render());
            EXIT_USAGE
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        sort,
        verbose,
        debug,
        path,
        max_visits,
    } = parsed;

    if show_help {
        return if stdout.write_all(HELP_TEXT.as_bytes()).is_ok() {
            0
        } else {
            EXIT_USAGE
        };
    }

    if show_version {
        return if writeln!(stdout, "{PROGRAM_NAME} {}", env!("CARGO_PKG_VERSION")).is_ok() {
            0
        } else {
            EXIT_USAGE
        };
    }

    let Some(path) = path else {
        let _ = stderr.write_all(USAGE.as_bytes());
        return EXIT_USAGE;
    };

    let config = match verbosity_from(verbose, &debug) {
        Ok(config) => config,
        Err(message) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
            return EXIT_USAGE;
        }
    };
    if config.debug.any() {
        logging::init_tracing(config);
    } else {
        logging::init(config);
    }

    let max_visits = match max_visits {
        None => DEFAULT_MAX_VISITS,
        Some(raw) => parse_max_visits(&raw).unwrap_or_else(|| {
            let _ = writeln!(
                stderr,
                "Invalid value for max_symlink_visits. Using the default value of {DEFAULT_MAX_VISITS}."
            );
            DEFAULT_MAX_VISITS
        }),
    };

    let order = if sort {
        EntryOrder::Lexicographic
    } else {
        EntryOrder::Native
    };

    let walker = match WalkBuilder::new(PathBuf::from(path))
        .max_visits(max_visits)
        .entry_order(order)
        .build()
    {
        Ok(walker) => walker,
        Err(error) => return report_walk_error(&error, stderr),
    };

    for line in walker {
        match line {
            Ok(line) => {
                if writeln!(stdout, "{line}").is_err() {
                    return EXIT_USAGE;
                }
            }
            Err(error) => return report_walk_error(&error, stderr),
        }
    }

    if stdout.flush().is_err() {
        return EXIT_USAGE;
    }
    0
}

/// Builds the verbosity configuration from `-v` and `--debug` values.
fn verbosity_from(verbose: u8, debug: &[OsString]) -> Result<VerbosityConfig, String> {
    let mut config = VerbosityConfig::from_verbose_level(verbose);
    for tokens in debug {
        let tokens = tokens
            .to_str()
            .ok_or_else(|| format!("invalid debug flags: {}", tokens.to_string_lossy()))?;
        config.apply_debug_flags(tokens)?;
    }
    Ok(config)
}

fn report_walk_error<Err: Write>(error: &WalkError, stderr: &mut Err) -> i32 {
    let _ = writeln!(stderr, "{PROGRAM_NAME} error: {error}");
    EXIT_WALK_FAILED
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
