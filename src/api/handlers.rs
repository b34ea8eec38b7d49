//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{
    ErrorResponse, HealthResponse, PanelsRequest, PanelsResponse, SizeRequest, WattHoursRequest,
    WattHoursResponse,
};
use crate::sizing::{SizingError, SizingReport, panels_needed, total_watt_hours};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(route: &str, err: SizingError) -> ApiError {
    warn!(route, error = %err, "rejected sizing request");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            field: Some(err.field().to_string()),
            error: err.to_string(),
        }),
    )
}

/// `GET /health` → 200 + `HealthResponse` JSON
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Sums appliance energy use.
///
/// `POST /watt-hours` → 200 + `WattHoursResponse` JSON
/// invalid appliance → 400 + `ErrorResponse`
pub async fn post_watt_hours(
    Json(req): Json<WattHoursRequest>,
) -> Result<Json<WattHoursResponse>, ApiError> {
    let total = total_watt_hours(&req.appliances).map_err(|e| bad_request("/watt-hours", e))?;
    Ok(Json(WattHoursResponse {
        total_watt_hours: total,
    }))
}

/// Estimates a panel count for a daily usage figure.
///
/// `POST /panels` → 200 + `PanelsResponse` JSON
/// `panel_wattage <= 0` etc. → 400 + `ErrorResponse`
pub async fn post_panels(
    Json(req): Json<PanelsRequest>,
) -> Result<Json<PanelsResponse>, ApiError> {
    let panels =
        panels_needed(req.daily_usage_wh, &req.system()).map_err(|e| bad_request("/panels", e))?;
    Ok(Json(PanelsResponse { panels }))
}

/// Runs the full sizing pipeline.
///
/// `POST /size` → 200 + `SizingReport` JSON
pub async fn post_size(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SizeRequest>,
) -> Result<Json<SizingReport>, ApiError> {
    let system = req.solar.unwrap_or_else(|| state.system.clone());
    let report =
        SizingReport::build(&req.appliances, &system).map_err(|e| bad_request("/size", e))?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::header::CONTENT_TYPE;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sizing::SolarSystem;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            system: SolarSystem::new(300.0),
        })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn watt_hours_sums_appliances() {
        let app = router(make_test_state());
        let req = post_json(
            "/watt-hours",
            r#"{"appliances":[
                {"name":"Lights","watts":100,"hours_per_day":5},
                {"name":"Laptop","watts":50,"hours_per_day":10}]}"#,
        );
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["total_watt_hours"], 1000.0);
    }

    #[tokio::test]
    async fn panels_uses_defaults() {
        let app = router(make_test_state());
        let req = post_json("/panels", r#"{"daily_usage_wh":3000,"panel_wattage":300}"#);
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["panels"], 3);
    }

    #[tokio::test]
    async fn zero_wattage_returns_400() {
        let app = router(make_test_state());
        let req = post_json("/panels", r#"{"daily_usage_wh":3000,"panel_wattage":0}"#);
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["field"], "panel_wattage");
    }

    #[tokio::test]
    async fn size_falls_back_to_server_system() {
        let app = router(make_test_state());
        let req = post_json(
            "/size",
            r#"{"appliances":[{"name":"Lights","watts":100,"hours_per_day":5},
                              {"name":"Laptop","watts":50,"hours_per_day":10}]}"#,
        );
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["panels"], 1);
        assert_eq!(json["system"]["panel_wattage"], 300.0);
    }
}
