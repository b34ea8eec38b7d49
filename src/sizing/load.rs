//! Load aggregation: appliance list to daily energy requirement.

use tracing::debug;

use super::error::SizingError;
use super::types::Appliance;

/// Sums `watts * hours_per_day` over every appliance.
///
/// An empty list yields `0.0`. Order does not affect the result beyond
/// floating-point rounding.
///
/// # Arguments
///
/// * `appliances` - Household loads to aggregate
///
/// # Returns
///
/// Total daily energy use in watt-hours.
///
/// # Errors
///
/// Returns [`SizingError::InvalidInput`] for the first appliance with
/// negative watts, hours outside `[0, 24]`, or a non-finite value. The
/// field name carries the appliance index, e.g. `appliances[1].watts`.
/// A sum that overflows is reported against `appliances`.
///
/// # Examples
///
/// ```
/// use offgrid_sizer::sizing::{Appliance, total_watt_hours};
///
/// let loads = [
///     Appliance::new("Lights", 100.0, 5.0),
///     Appliance::new("Laptop", 50.0, 10.0),
/// ];
/// assert_eq!(total_watt_hours(&loads).ok(), Some(1000.0));
/// ```
pub fn total_watt_hours(appliances: &[Appliance]) -> Result<f64, SizingError> {
    let mut total = 0.0_f64;
    for (i, appliance) in appliances.iter().enumerate() {
        total += appliance.energy_wh(&format!("appliances[{i}]."))?;
    }
    if !total.is_finite() {
        return Err(SizingError::invalid(
            "appliances",
            "total energy is not representable",
        ));
    }
    debug!(count = appliances.len(), total_wh = total, "aggregated load");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(total_watt_hours(&[]), Ok(0.0));
    }

    #[test]
    fn sums_each_appliance() {
        let loads = vec![
            Appliance::new("Lights", 100.0, 5.0),
            Appliance::new("Laptop", 50.0, 10.0),
        ];
        assert_eq!(total_watt_hours(&loads), Ok(1000.0));
    }

    #[test]
    fn zero_hours_contributes_nothing() {
        let loads = vec![
            Appliance::new("Spare freezer", 200.0, 0.0),
            Appliance::new("Router", 10.0, 24.0),
        ];
        assert_eq!(total_watt_hours(&loads), Ok(240.0));
    }

    #[test]
    fn error_names_offending_index() {
        let loads = vec![
            Appliance::new("Lights", 100.0, 5.0),
            Appliance::new("Pump", 400.0, 30.0),
        ];
        let err = total_watt_hours(&loads).unwrap_err();
        assert_eq!(err.field(), "appliances[1].hours_per_day");
    }

    #[test]
    fn negative_hours_rejected() {
        let loads = vec![Appliance::new("Lights", 10.0, -1.0)];
        let err = total_watt_hours(&loads).unwrap_err();
        assert_eq!(err.field(), "appliances[0].hours_per_day");
    }

    #[test]
    fn overflowing_appliance_rejected() {
        let loads = vec![Appliance::new("Huge", 1e308, 24.0)];
        let err = total_watt_hours(&loads).unwrap_err();
        assert_eq!(err.field(), "appliances[0].watts");
    }

    #[test]
    fn overflowing_sum_rejected() {
        // Each product is finite; only the running total overflows.
        let loads = vec![
            Appliance::new("Huge", 1e307, 10.0),
            Appliance::new("Huge", 1e307, 10.0),
        ];
        let err = total_watt_hours(&loads).unwrap_err();
        assert_eq!(err.field(), "appliances");
    }

    #[test]
    fn nan_watts_rejected() {
        let loads = vec![Appliance::new("Broken", f64::NAN, 1.0)];
        let err = total_watt_hours(&loads).unwrap_err();
        assert_eq!(err.field(), "appliances[0].watts");
    }
}
