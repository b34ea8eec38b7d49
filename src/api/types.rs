//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::sizing::{Appliance, DEFAULT_EFFICIENCY_LOSS, DEFAULT_SUN_HOURS, SolarSystem};

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is accepting requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Body of `POST /watt-hours`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WattHoursRequest {
    /// Loads to aggregate; may be empty.
    pub appliances: Vec<Appliance>,
}

/// Response of `POST /watt-hours`.
#[derive(Debug, Serialize)]
pub struct WattHoursResponse {
    /// Daily energy use (Wh).
    pub total_watt_hours: f64,
}

/// Body of `POST /panels`.
///
/// Omitted sun hours and loss fall back to the library defaults, not the
/// server configuration, so the endpoint behaves like the bare function.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelsRequest {
    /// Daily energy requirement (Wh).
    pub daily_usage_wh: f64,
    /// Rated output of one panel (W).
    pub panel_wattage: f64,
    /// Peak-equivalent sun hours per day.
    pub average_sun_hours: Option<f64>,
    /// Loss fraction in `[0, 1)`.
    pub efficiency_loss: Option<f64>,
}

impl PanelsRequest {
    /// Generation parameters with defaults filled in.
    pub fn system(&self) -> SolarSystem {
        SolarSystem {
            panel_wattage: self.panel_wattage,
            average_sun_hours: self.average_sun_hours.unwrap_or(DEFAULT_SUN_HOURS),
            efficiency_loss: self.efficiency_loss.unwrap_or(DEFAULT_EFFICIENCY_LOSS),
        }
    }
}

/// Response of `POST /panels`.
#[derive(Debug, Serialize)]
pub struct PanelsResponse {
    /// Panel count after rounding up.
    pub panels: u32,
}

/// Body of `POST /size`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRequest {
    /// Household loads.
    pub appliances: Vec<Appliance>,
    /// Generation parameters; the server's configured system when omitted.
    pub solar: Option<SolarSystem>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Offending field, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_request_fills_defaults() {
        let req: PanelsRequest =
            serde_json::from_str(r#"{"daily_usage_wh": 1000.0, "panel_wattage": 300.0}"#)
                .unwrap();
        assert_eq!(req.system(), SolarSystem::new(300.0));
    }

    #[test]
    fn panels_request_keeps_overrides() {
        let req: PanelsRequest = serde_json::from_str(
            r#"{"daily_usage_wh": 1000.0, "panel_wattage": 300.0,
                "average_sun_hours": 3.5, "efficiency_loss": 0.1}"#,
        )
        .unwrap();
        let sys = req.system();
        assert_eq!(sys.average_sun_hours, 3.5);
        assert_eq!(sys.efficiency_loss, 0.1);
    }

    #[test]
    fn error_response_omits_missing_field() {
        let body = ErrorResponse {
            error: "bad".into(),
            field: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"bad"}"#);
    }
}
