//! Tracing/logging setup shared by the client crates.

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filter, formatting).
pub mod tracing;
