//! TOML-based system configuration and household preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sizing::{Appliance, DEFAULT_EFFICIENCY_LOSS, DEFAULT_SUN_HOURS, SolarSystem};

/// Top-level sizing configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`SystemConfig::from_toml_file`] or pick a built-in household with
/// [`SystemConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Panel and site parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Household loads.
    #[serde(default)]
    pub appliances: Vec<Appliance>,
}

/// Panel and site parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Rated output of one panel (W).
    pub panel_wattage: f64,
    /// Peak-equivalent sun hours per day.
    pub average_sun_hours: f64,
    /// Loss fraction between panel and load, in `[0, 1)`.
    pub efficiency_loss: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            panel_wattage: 300.0,
            average_sun_hours: DEFAULT_SUN_HOURS,
            efficiency_loss: DEFAULT_EFFICIENCY_LOSS,
        }
    }
}

impl SolarConfig {
    /// Converts the table into the sizing parameter struct.
    pub fn to_system(&self) -> SolarSystem {
        SolarSystem {
            panel_wattage: self.panel_wattage,
            average_sun_hours: self.average_sun_hours,
            efficiency_loss: self.efficiency_loss,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"solar.panel_wattage"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SystemConfig {
    /// Weekend cabin: lights, phone charging, a small fridge.
    pub fn cabin() -> Self {
        Self {
            solar: SolarConfig::default(),
            appliances: vec![
                Appliance::new("LED lights", 40.0, 5.0),
                Appliance::new("Phone charging", 10.0, 3.0),
                Appliance::new("12V fridge", 60.0, 8.0),
                Appliance::new("Water pump", 100.0, 0.5),
            ],
        }
    }

    /// Full-time tiny home on a modest site.
    pub fn tiny_home() -> Self {
        Self {
            solar: SolarConfig {
                panel_wattage: 350.0,
                average_sun_hours: 4.5,
                ..SolarConfig::default()
            },
            appliances: vec![
                Appliance::new("LED lights", 60.0, 6.0),
                Appliance::new("Refrigerator", 150.0, 8.0),
                Appliance::new("Laptop", 60.0, 6.0),
                Appliance::new("Router", 10.0, 24.0),
                Appliance::new("Water pump", 250.0, 1.0),
                Appliance::new("Induction hob", 1800.0, 0.75),
            ],
        }
    }

    /// Family homestead with workshop tools and a chest freezer.
    pub fn homestead() -> Self {
        Self {
            solar: SolarConfig {
                panel_wattage: 400.0,
                average_sun_hours: 4.0,
                efficiency_loss: 0.25,
            },
            appliances: vec![
                Appliance::new("LED lights", 120.0, 6.0),
                Appliance::new("Refrigerator", 180.0, 10.0),
                Appliance::new("Chest freezer", 100.0, 12.0),
                Appliance::new("Washing machine", 500.0, 1.0),
                Appliance::new("Well pump", 750.0, 1.5),
                Appliance::new("Workshop tools", 1200.0, 1.0),
                Appliance::new("Television", 100.0, 4.0),
                Appliance::new("Laptops", 120.0, 8.0),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["cabin", "tiny_home", "homestead"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "cabin" => Ok(Self::cabin()),
            "tiny_home" => Ok(Self::tiny_home()),
            "homestead" => Ok(Self::homestead()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Solar parameters as a sizing input.
    pub fn system(&self) -> SolarSystem {
        self.solar.to_system()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.system().validate() {
            errors.push(ConfigError {
                field: format!("solar.{}", e.field()),
                message: e.message().to_string(),
            });
        }

        for (i, appliance) in self.appliances.iter().enumerate() {
            if appliance.name.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("appliances[{i}].name"),
                    message: "must not be empty".into(),
                });
            }
            if let Err(e) = appliance.watt_hours() {
                errors.push(ConfigError {
                    field: format!("appliances[{i}].{}", e.field()),
                    message: e.message().to_string(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cabin_preset_valid() {
        let cfg = SystemConfig::cabin();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "cabin should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = SystemConfig::from_preset("yacht");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in SystemConfig::PRESETS {
            let cfg = SystemConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[solar]
panel_wattage = 400.0
average_sun_hours = 6.0
efficiency_loss = 0.15

[[appliances]]
name = "Fridge"
watts = 150.0
hours_per_day = 8.0

[[appliances]]
name = "Lights"
watts = 60.0
hours_per_day = 5.0
"#;
        let cfg = SystemConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.solar.panel_wattage), Some(400.0));
        assert_eq!(cfg.as_ref().map(|c| c.appliances.len()), Some(2));
        assert_eq!(
            cfg.as_ref().map(|c| c.appliances[0].name.as_str()),
            Some("Fridge")
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[solar]
panel_wattage = 300.0
inverter = "pure sine"
"#;
        assert!(SystemConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[solar]
panel_wattage = 450.0
"#;
        let cfg = SystemConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.solar.panel_wattage), Some(450.0));
        assert_eq!(cfg.as_ref().map(|c| c.solar.average_sun_hours), Some(5.0));
        assert_eq!(cfg.as_ref().map(|c| c.solar.efficiency_loss), Some(0.2));
        assert_eq!(cfg.as_ref().map(|c| c.appliances.len()), Some(0));
    }

    #[test]
    fn validation_catches_zero_wattage() {
        let mut cfg = SystemConfig::cabin();
        cfg.solar.panel_wattage = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "solar.panel_wattage"));
    }

    #[test]
    fn validation_reports_every_bad_appliance() {
        let mut cfg = SystemConfig::cabin();
        cfg.appliances.push(Appliance::new("Heater", 2000.0, 30.0));
        cfg.appliances.push(Appliance::new("", 10.0, 1.0));
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances[4].hours_per_day"));
        assert!(errors.iter().any(|e| e.field == "appliances[5].name"));
    }

    #[test]
    fn validation_message_names_field_once() {
        let mut cfg = SystemConfig::cabin();
        cfg.solar.panel_wattage = 0.0;
        let errors = cfg.validate();
        let text = errors
            .iter()
            .find(|e| e.field == "solar.panel_wattage")
            .map(ToString::to_string);
        assert_eq!(
            text.as_deref(),
            Some("config error: solar.panel_wattage: must be > 0")
        );
    }

    #[test]
    fn homestead_uses_more_energy_than_cabin() {
        let cabin = crate::sizing::total_watt_hours(&SystemConfig::cabin().appliances);
        let home = crate::sizing::total_watt_hours(&SystemConfig::homestead().appliances);
        assert!(home.unwrap_or(0.0) > cabin.unwrap_or(f64::MAX));
    }
}
