//! Compile-time build information, generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `--version`.
pub fn version_line() -> String {
    format!(
        "flipping-bird {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}
