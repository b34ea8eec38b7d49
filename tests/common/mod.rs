//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use offgrid_sizer::sizing::{Appliance, SolarSystem};

/// Two-appliance household drawing exactly 1000 Wh/day.
pub fn two_appliance_household() -> Vec<Appliance> {
    vec![
        Appliance::new("Lights", 100.0, 5.0),
        Appliance::new("Laptop", 50.0, 10.0),
    ]
}

/// Default system: 300 W panels, 5 sun hours, 20% loss.
pub fn default_system() -> SolarSystem {
    SolarSystem::new(300.0)
}

/// Usable fraction times panel output, the daily Wh one panel covers.
pub fn covered_wh(panels: u32, system: &SolarSystem) -> f64 {
    f64::from(panels) * system.panel_wattage * system.average_sun_hours * system.usable_fraction()
}
