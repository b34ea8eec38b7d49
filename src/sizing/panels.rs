//! Panel count estimation from a daily energy requirement.
//!
//! The estimate runs in three steps:
//! 1. inflate demand for system losses: `daily / (1 - efficiency_loss)`
//! 2. spread it over the peak-equivalent sun hours to get array watts
//! 3. divide by panel wattage and round up, since partial panels cannot
//!    be bought

use tracing::debug;

use super::error::{SizingError, ensure_finite};
use super::types::SolarSystem;

/// Daily demand after inflating for system losses (Wh).
///
/// # Errors
///
/// Returns [`SizingError::InvalidInput`] if `daily_usage_wh` is negative
/// or not finite, or if `system` fails [`SolarSystem::validate`].
pub fn adjusted_usage_wh(daily_usage_wh: f64, system: &SolarSystem) -> Result<f64, SizingError> {
    check_usage(daily_usage_wh)?;
    system.validate()?;
    Ok(daily_usage_wh / system.usable_fraction())
}

/// Array capacity needed to meet the adjusted demand within the sun hours (W).
///
/// # Errors
///
/// Same conditions as [`adjusted_usage_wh`].
pub fn array_watts_needed(daily_usage_wh: f64, system: &SolarSystem) -> Result<f64, SizingError> {
    Ok(adjusted_usage_wh(daily_usage_wh, system)? / system.average_sun_hours)
}

/// Smallest number of panels whose usable daily output covers
/// `daily_usage_wh`.
///
/// Zero usage needs zero panels.
///
/// # Arguments
///
/// * `daily_usage_wh` - Daily energy requirement (Wh, >= 0)
/// * `system` - Panel wattage, sun hours and loss fraction
///
/// # Errors
///
/// Returns [`SizingError::InvalidInput`] for negative or non-finite usage,
/// non-positive panel wattage or sun hours, an efficiency loss outside
/// `[0, 1)`, or a panel count too large to represent.
///
/// # Examples
///
/// ```
/// use offgrid_sizer::sizing::{SolarSystem, panels_needed};
///
/// // 1000 Wh / 0.8 = 1250 Wh; / 5 h = 250 W; ceil(250 / 300) = 1
/// assert_eq!(panels_needed(1000.0, &SolarSystem::new(300.0)).ok(), Some(1));
/// assert_eq!(panels_needed(3000.0, &SolarSystem::new(300.0)).ok(), Some(3));
/// ```
pub fn panels_needed(daily_usage_wh: f64, system: &SolarSystem) -> Result<u32, SizingError> {
    let array_watts = array_watts_needed(daily_usage_wh, system)?;
    let panels = (array_watts / system.panel_wattage).ceil();
    if panels > f64::from(u32::MAX) {
        return Err(SizingError::invalid(
            "daily_usage_wh",
            format!("requires {panels} panels, more than can be represented"),
        ));
    }
    debug!(
        daily_usage_wh,
        array_watts,
        panel_wattage = system.panel_wattage,
        panels,
        "sized panel array"
    );
    Ok(panels as u32)
}

fn check_usage(daily_usage_wh: f64) -> Result<(), SizingError> {
    if ensure_finite("daily_usage_wh", daily_usage_wh)? < 0.0 {
        return Err(SizingError::invalid("daily_usage_wh", "must be >= 0"));
    }
    Ok(())
}
