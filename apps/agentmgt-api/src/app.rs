//! Application assembly: access gate selection and the top-level router.

use std::sync::Arc;

use agentmgt_api_agents::{agents_router, AgentsState};
use agentmgt_auth::{AccessGate, BearerPresenceGate, JwtAccessGate, ValidationConfig};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ConfigError};

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health - Liveness check, no authentication.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Pick the access gate for this configuration.
///
/// With a JWT key, tokens are verified. Without one (development only,
/// enforced by [`Config`]), any bearer token is accepted.
pub fn build_gate(config: &Config) -> Result<Arc<dyn AccessGate>, ConfigError> {
    match &config.jwt {
        Some(jwt) => {
            let mut validation = ValidationConfig::default();
            if let Some(issuer) = &jwt.issuer {
                validation = validation.issuer(issuer.clone());
            }
            if !jwt.audience.is_empty() {
                validation = validation.audience(jwt.audience.clone());
            }

            let gate = JwtAccessGate::new(jwt.key.clone(), validation).map_err(|e| {
                ConfigError::InvalidValue {
                    var: jwt.key_var.to_string(),
                    message: e.to_string(),
                }
            })?;

            tracing::info!(algorithm = jwt.algorithm(), "JWT access gate enabled");
            Ok(Arc::new(gate))
        }
        None => {
            tracing::warn!(
                "No JWT key configured; accepting any bearer token with full access (development only)"
            );
            Ok(Arc::new(BearerPresenceGate))
        }
    }
}

/// Build the full application router.
pub fn build_app(state: AgentsState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(agents_router(state))
        .layer(TraceLayer::new_for_http())
}
