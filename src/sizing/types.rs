//! Value types for the load and generation sides of a sizing calculation.

use serde::{Deserialize, Serialize};

use super::error::{SizingError, ensure_finite};

/// Default peak-equivalent sun hours per day.
pub const DEFAULT_SUN_HOURS: f64 = 5.0;

/// Default fraction of generated energy lost to wiring, charge control and
/// battery round-trip.
pub const DEFAULT_EFFICIENCY_LOSS: f64 = 0.2;

/// One electrical load in the household.
///
/// # Examples
///
/// ```
/// use offgrid_sizer::sizing::Appliance;
///
/// let fridge = Appliance::new("Fridge", 150.0, 8.0);
/// assert_eq!(fridge.watt_hours().ok(), Some(1200.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Appliance {
    /// Display name.
    pub name: String,
    /// Power draw while running (W).
    pub watts: f64,
    /// Running time per day (h, 0 to 24).
    pub hours_per_day: f64,
}

impl Appliance {
    /// Creates an appliance record. Values are checked when the appliance
    /// is aggregated, not here.
    pub fn new(name: impl Into<String>, watts: f64, hours_per_day: f64) -> Self {
        Self {
            name: name.into(),
            watts,
            hours_per_day,
        }
    }

    /// Daily energy use of this appliance (Wh).
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] if `watts` is negative,
    /// `hours_per_day` is outside `[0, 24]`, either is not finite, or the
    /// product overflows.
    pub fn watt_hours(&self) -> Result<f64, SizingError> {
        self.energy_wh("")
    }

    /// [`Appliance::watt_hours`] with `prefix` prepended to error field
    /// names (e.g. `"appliances[3]."`).
    pub(crate) fn energy_wh(&self, prefix: &str) -> Result<f64, SizingError> {
        self.validate(prefix)?;
        let wh = self.watts * self.hours_per_day;
        if !wh.is_finite() {
            return Err(SizingError::invalid(
                format!("{prefix}watts"),
                "energy use is not representable",
            ));
        }
        Ok(wh)
    }

    /// Checks the appliance against its domain constraints.
    pub(crate) fn validate(&self, prefix: &str) -> Result<(), SizingError> {
        let watts_field = format!("{prefix}watts");
        let hours_field = format!("{prefix}hours_per_day");

        if ensure_finite(&watts_field, self.watts)? < 0.0 {
            return Err(SizingError::invalid(watts_field, "must be >= 0"));
        }
        let hours = ensure_finite(&hours_field, self.hours_per_day)?;
        if !(0.0..=24.0).contains(&hours) {
            return Err(SizingError::invalid(hours_field, "must be in [0, 24]"));
        }
        Ok(())
    }
}

/// Generation-side parameters for panel sizing.
///
/// `efficiency_loss` is a loss fraction: `0.2` means 80% of generated
/// energy reaches the loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolarSystem {
    /// Rated output of one panel (W, > 0).
    pub panel_wattage: f64,
    /// Peak-equivalent sun hours per day (h, > 0).
    #[serde(default = "default_sun_hours")]
    pub average_sun_hours: f64,
    /// Fraction of energy lost between panel and load, in `[0, 1)`.
    #[serde(default = "default_efficiency_loss")]
    pub efficiency_loss: f64,
}

fn default_sun_hours() -> f64 {
    DEFAULT_SUN_HOURS
}

fn default_efficiency_loss() -> f64 {
    DEFAULT_EFFICIENCY_LOSS
}

impl SolarSystem {
    /// Creates a system with the default sun hours and efficiency loss.
    pub fn new(panel_wattage: f64) -> Self {
        Self {
            panel_wattage,
            average_sun_hours: DEFAULT_SUN_HOURS,
            efficiency_loss: DEFAULT_EFFICIENCY_LOSS,
        }
    }

    /// Creates a system from an efficiency multiplier instead of a loss
    /// fraction. `with_efficiency(w, 5.0, 0.8)` sizes identically to
    /// `SolarSystem::new(w)`.
    ///
    /// The conversion round-trips exactly (`usable_fraction() == efficiency`)
    /// for `efficiency` in `[0.5, 1]`, so legacy multipliers in that range
    /// reproduce legacy panel counts. Below 0.5 `usable_fraction` may differ
    /// from `efficiency` by one ulp.
    ///
    /// # Examples
    ///
    /// ```
    /// use offgrid_sizer::sizing::SolarSystem;
    ///
    /// let legacy = SolarSystem::with_efficiency(300.0, 5.0, 0.8);
    /// assert!((legacy.efficiency_loss - 0.2).abs() < 1e-12);
    /// ```
    pub fn with_efficiency(panel_wattage: f64, average_sun_hours: f64, efficiency: f64) -> Self {
        Self {
            panel_wattage,
            average_sun_hours,
            efficiency_loss: 1.0 - efficiency,
        }
    }

    /// Sets the sun hours, keeping other parameters.
    pub fn sun_hours(mut self, hours: f64) -> Self {
        self.average_sun_hours = hours;
        self
    }

    /// Sets the efficiency loss fraction, keeping other parameters.
    pub fn loss(mut self, loss: f64) -> Self {
        self.efficiency_loss = loss;
        self
    }

    /// Fraction of generated energy that reaches the loads.
    pub fn usable_fraction(&self) -> f64 {
        1.0 - self.efficiency_loss
    }

    /// Usable energy one panel delivers per day (Wh).
    pub fn daily_yield_per_panel_wh(&self) -> f64 {
        self.panel_wattage * self.average_sun_hours * self.usable_fraction()
    }

    /// Checks every parameter against its domain constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SizingError> {
        if ensure_finite("panel_wattage", self.panel_wattage)? <= 0.0 {
            return Err(SizingError::invalid("panel_wattage", "must be > 0"));
        }
        if ensure_finite("average_sun_hours", self.average_sun_hours)? <= 0.0 {
            return Err(SizingError::invalid("average_sun_hours", "must be > 0"));
        }
        let loss = ensure_finite("efficiency_loss", self.efficiency_loss)?;
        if !(0.0..1.0).contains(&loss) {
            return Err(SizingError::invalid("efficiency_loss", "must be in [0, 1)"));
        }
        Ok(())
    }
}
