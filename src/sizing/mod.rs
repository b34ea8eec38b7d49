//! Off-grid energy sizing: daily load aggregation and solar panel count
//! estimation.
//!
//! All units are watts (W), hours (h) and watt-hours (Wh); nothing is
//! converted internally.

pub mod error;
/// Daily load aggregation.
pub mod load;
/// Panel count estimation.
pub mod panels;
pub mod report;
pub mod types;

pub use error::SizingError;
pub use load::total_watt_hours;
pub use panels::{adjusted_usage_wh, array_watts_needed, panels_needed};
pub use report::SizingReport;
pub use types::{Appliance, DEFAULT_EFFICIENCY_LOSS, DEFAULT_SUN_HOURS, SolarSystem};
