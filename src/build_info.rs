//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Crate version plus build date and commit, e.g. `0.1.0 2026-10-19 (a1b2c3d)`.
pub fn version_string() -> String {
    format!(
        "{} {} ({})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
