//! Error taxonomy for the agent management API.
//!
//! Every failure belongs to one of four kinds. Each kind has a stable code
//! and message; the concrete error supplies the description. Responses
//! carry a fresh trace id that is also written to the log, so a client
//! report can be matched to the server-side record.

use agentmgt_auth::AuthError;
use agentmgt_core::{AgentId, CredentialId, TraceId};
use agentmgt_store::StoreError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classes exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller identity missing/invalid or lacking the required scope.
    AuthenticationFailure,
    /// Request payload fails validation.
    InvalidInput,
    /// Referenced agent or credential does not exist.
    NotFound,
    /// Anything not classified above.
    InternalError,
}

impl ErrorKind {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::AuthenticationFailure => "AGT-90001",
            ErrorKind::InvalidInput => "AGT-60001",
            ErrorKind::NotFound => "AGT-70001",
            ErrorKind::InternalError => "AGT-10001",
        }
    }

    /// Short human-readable summary.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::AuthenticationFailure => "Authentication Failure.",
            ErrorKind::InvalidInput => "Invalid Input.",
            ErrorKind::NotFound => "Resource Not Found.",
            ErrorKind::InternalError => "Internal Server Error.",
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::AuthenticationFailure => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Taxonomy code, e.g. `AGT-70001`.
    pub code: String,

    /// Short summary of the kind.
    pub message: String,

    /// Explanation of this occurrence.
    pub description: String,

    /// Fresh correlation id for this failure.
    pub trace_id: String,
}

/// Agent management API errors.
#[derive(Debug, Error)]
pub enum ApiAgentsError {
    // Authentication
    /// Caller could not be authenticated or lacks the required scope.
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    // Agent errors
    /// Agent not found. Carries the id as supplied by the caller.
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// One of name, description, version is missing or empty.
    #[error("Required agent attributes missing")]
    MissingAgentAttributes,

    /// Update payload carried no fields.
    #[error("Empty update payload")]
    EmptyUpdate,

    // Credential errors
    /// Credential not found. Carries the id as supplied by the caller.
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    /// Credential exists but belongs to another agent.
    #[error("Credential {credential_id} does not belong to agent {agent_id}")]
    CredentialNotOwned {
        /// Agent named in the request path.
        agent_id: AgentId,
        /// Credential named in the request path.
        credential_id: CredentialId,
    },

    /// Credential type missing or not one of the supported values.
    #[error("Invalid or missing credential type")]
    InvalidCredentialType,

    /// Update tried to change the stored credential type.
    #[error("Credential type cannot be changed")]
    CredentialTypeImmutable,

    // General errors
    /// Request body could not be parsed.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// A path segment could not be decoded.
    #[error("Malformed request path: {0}")]
    MalformedPath(String),

    /// Storage backend failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiAgentsError {
    /// The kind this error is reported as.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiAgentsError::Authentication(_) => ErrorKind::AuthenticationFailure,

            ApiAgentsError::MissingAgentAttributes
            | ApiAgentsError::EmptyUpdate
            | ApiAgentsError::InvalidCredentialType
            | ApiAgentsError::CredentialTypeImmutable
            | ApiAgentsError::MalformedBody(_)
            | ApiAgentsError::MalformedPath(_) => ErrorKind::InvalidInput,

            ApiAgentsError::AgentNotFound(_)
            | ApiAgentsError::CredentialNotFound(_)
            | ApiAgentsError::CredentialNotOwned { .. } => ErrorKind::NotFound,

            ApiAgentsError::Store(_) | ApiAgentsError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Client-facing description.
    ///
    /// Never includes internal detail; an ownership mismatch reads exactly
    /// like a missing credential.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            ApiAgentsError::Authentication(AuthError::InsufficientScope(scope)) => {
                format!("The provided access token does not grant the '{scope}' scope.")
            }
            ApiAgentsError::Authentication(_) => {
                "The provided access token is missing, expired, or invalid.".to_string()
            }
            ApiAgentsError::AgentNotFound(id) => {
                format!("The agent with the specified ID '{id}' does not exist.")
            }
            ApiAgentsError::MissingAgentAttributes => {
                "One or more attribute values required for agent creation are invalid or missing."
                    .to_string()
            }
            ApiAgentsError::EmptyUpdate => {
                "At least one field must be provided for update.".to_string()
            }
            ApiAgentsError::CredentialNotFound(id) => {
                format!("The credential with the specified ID '{id}' does not exist.")
            }
            ApiAgentsError::CredentialNotOwned { credential_id, .. } => {
                format!("The credential with the specified ID '{credential_id}' does not exist.")
            }
            ApiAgentsError::InvalidCredentialType => {
                "Invalid or missing credential type.".to_string()
            }
            ApiAgentsError::CredentialTypeImmutable => {
                "Credential type cannot be changed.".to_string()
            }
            ApiAgentsError::MalformedBody(_) => {
                "The request body is not a valid JSON document for this operation.".to_string()
            }
            ApiAgentsError::MalformedPath(_) => {
                "The request path could not be decoded.".to_string()
            }
            ApiAgentsError::Store(_) | ApiAgentsError::Internal(_) => {
                "An unexpected error occurred while processing the request.".to_string()
            }
        }
    }

    /// Build the error payload with a fresh trace id.
    #[must_use]
    pub fn to_error_response(&self, trace_id: TraceId) -> ErrorResponse {
        let kind = self.kind();
        ErrorResponse {
            code: kind.code().to_string(),
            message: kind.message().to_string(),
            description: self.description(),
            trace_id: trace_id.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiAgentsError {
    fn from(rejection: JsonRejection) -> Self {
        ApiAgentsError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiAgentsError {
    fn from(rejection: PathRejection) -> Self {
        ApiAgentsError::MalformedPath(rejection.body_text())
    }
}

impl IntoResponse for ApiAgentsError {
    fn into_response(self) -> Response {
        let trace_id = TraceId::new();
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(trace_id = %trace_id, error = %self, "Request failed");
        } else {
            tracing::warn!(trace_id = %trace_id, error = %self, "Request rejected");
        }

        (status, Json(self.to_error_response(trace_id))).into_response()
    }
}

/// Response for a handler that panicked.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer` as the outermost
/// boundary; the panic payload is logged, never returned.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiAgentsError::Internal(format!("handler panicked: {detail}")).into_response()
}
