//! crates/logging/src/macros.rs
//! Flag-gated logging macros.

/// Emit a debug diagnostic when `FLAG` is enabled at `LEVEL` or above.
///
/// The flag is checked against the thread-local [`VerbosityConfig`](crate::VerbosityConfig)
/// before the message is formatted, so disabled diagnostics cost a single
/// lookup. Enabled diagnostics are forwarded to `tracing` with the
/// `symtree` target and the flag name recorded as a field.
///
/// # Example
/// ```ignore
/// debug_log!(Scan, 2, "found {} entries in {:?}", count, path);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::__tracing::debug!(
                target: "symtree",
                flag = $crate::DebugFlag::$flag.name(),
                debug_level = $level,
                $($arg)+
            );
        }
    };
}
