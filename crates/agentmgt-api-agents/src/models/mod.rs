//! Request and response DTOs for the agent management API.

pub mod requests;
pub mod responses;

pub use requests::{CreateAgentRequest, CredentialRequest, UpdateAgentRequest};
pub use responses::{CredentialView, MaskedCredentialDetails};
