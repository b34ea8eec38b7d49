//! End-to-end sizing summary: appliance list in, panel array out.

use std::fmt;

use serde::Serialize;

use super::error::SizingError;
use super::load::total_watt_hours;
use super::panels::{adjusted_usage_wh, panels_needed};
use super::types::{Appliance, SolarSystem};

/// Result of running the load aggregator into the panel estimator.
///
/// Every derived quantity is computed from the same inputs in one pass so
/// the figures in a report always agree with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingReport {
    /// Number of appliances aggregated.
    pub appliance_count: usize,
    /// Raw daily energy use (Wh).
    pub daily_usage_wh: f64,
    /// Daily use inflated for system losses (Wh).
    pub adjusted_usage_wh: f64,
    /// Array capacity needed within the sun hours (W).
    pub array_watts_needed: f64,
    /// Panel count after rounding up.
    pub panels: u32,
    /// Rated capacity of the installed panels (W).
    pub installed_watts: f64,
    /// Usable energy the installed panels deliver per day (Wh).
    pub expected_generation_wh: f64,
    /// Usable generation minus raw daily use (Wh, >= 0).
    pub surplus_wh: f64,
    /// Parameters the report was computed with.
    pub system: SolarSystem,
}

impl SizingReport {
    /// Sizes a panel array for the given household.
    ///
    /// # Arguments
    ///
    /// * `appliances` - Household loads
    /// * `system` - Generation-side parameters
    ///
    /// # Errors
    ///
    /// Propagates [`SizingError::InvalidInput`] from either stage.
    pub fn build(appliances: &[Appliance], system: &SolarSystem) -> Result<Self, SizingError> {
        let daily = total_watt_hours(appliances)?;
        Self::for_usage(daily, appliances.len(), system)
    }

    /// Sizes a panel array for a known daily usage figure.
    ///
    /// # Errors
    ///
    /// Propagates [`SizingError::InvalidInput`] from the panel estimator.
    pub fn for_usage(
        daily_usage_wh: f64,
        appliance_count: usize,
        system: &SolarSystem,
    ) -> Result<Self, SizingError> {
        let adjusted = adjusted_usage_wh(daily_usage_wh, system)?;
        let panels = panels_needed(daily_usage_wh, system)?;
        let expected = f64::from(panels) * system.daily_yield_per_panel_wh();

        Ok(Self {
            appliance_count,
            daily_usage_wh,
            adjusted_usage_wh: adjusted,
            array_watts_needed: adjusted / system.average_sun_hours,
            panels,
            installed_watts: f64::from(panels) * system.panel_wattage,
            expected_generation_wh: expected,
            surplus_wh: (expected - daily_usage_wh).max(0.0),
            system: system.clone(),
        })
    }
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Report ---")?;
        writeln!(f, "Appliances:            {}", self.appliance_count)?;
        writeln!(f, "Daily usage:           {:.1} Wh", self.daily_usage_wh)?;
        writeln!(
            f,
            "Loss-adjusted usage:   {:.1} Wh ({:.0}% loss)",
            self.adjusted_usage_wh,
            self.system.efficiency_loss * 100.0
        )?;
        writeln!(
            f,
            "Array needed:          {:.1} W over {:.1} sun hours",
            self.array_watts_needed, self.system.average_sun_hours
        )?;
        writeln!(
            f,
            "Panels needed:         {} x {:.0} W",
            self.panels, self.system.panel_wattage
        )?;
        writeln!(f, "Installed capacity:    {:.0} W", self.installed_watts)?;
        writeln!(
            f,
            "Expected generation:   {:.1} Wh",
            self.expected_generation_wh
        )?;
        write!(f, "Daily surplus:         {:.1} Wh", self.surplus_wh)
    }
}
