//! Off-grid solar sizing: daily load aggregation and panel count
//! estimation, with TOML household configs, CSV export and an optional
//! REST API.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
/// Load aggregation and panel sizing core.
pub mod sizing;
