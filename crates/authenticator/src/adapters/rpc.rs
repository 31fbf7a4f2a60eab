//! # Request Handler
//!
//! JSON request/response boundary for relayers and query clients.
//!
//! ```text
//! {"method":"authenticate","user":"0x7099…","signature":"0xd5fa…1b"}
//!   → {"status":"ok","user":"0x7099…","nonce":"0","next_nonce":"1"}
//! {"method":"get_nonce","user":"0x7099…"}
//!   → {"status":"ok","user":"0x7099…","nonce":"1"}
//! {"method":"authenticate", …bad signature…}
//!   → {"status":"error","error":"Invalid signature"}
//! ```
//!
//! Nonces travel as decimal strings since they can exceed a JSON number.

use super::bus::{AuthenticatorBusAdapter, EventBusAdapter};
use crate::domain::errors::AuthenticatorError;
use crate::ports::inbound::AuthenticatorApi;
use serde::{Deserialize, Serialize};
use shared_bus::EventPublisher;
use shared_types::{decode_hex, format_address, format_hash, parse_address, ParseError};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Request handling errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    /// The request body is not a recognised request.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The `user` field is not a 20-byte hex address.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] ParseError),

    /// The registry rejected the call.
    #[error(transparent)]
    Rejected(#[from] AuthenticatorError),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Inbound request, tagged by `method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AuthRequest {
    Authenticate { user: String, signature: String },
    IsAuthenticated { user: String },
    GetNonce { user: String },
    Authenticated { user: String },
    Domain,
}

/// Outbound response, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthResponse {
    Ok(ResponseBody),
    Error { error: String },
}

/// Successful response payloads.
///
/// Untagged; variants with more fields come first so deserialization picks
/// the most specific match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Authenticated {
        user: String,
        nonce: String,
        next_nonce: String,
    },
    Domain {
        name: String,
        version: String,
        chain_id: u64,
        verifying_contract: String,
        domain_separator: String,
    },
    Flag {
        user: String,
        authenticated: bool,
    },
    Nonce {
        user: String,
        nonce: String,
    },
}

// =============================================================================
// HANDLER
// =============================================================================

/// Dispatches requests to a registry; successful authentications are
/// published on the bus.
pub struct RequestHandler<S, P>
where
    S: AuthenticatorApi,
    P: EventPublisher,
{
    adapter: EventBusAdapter<S, P>,
}

impl<S, P> RequestHandler<S, P>
where
    S: AuthenticatorApi,
    P: EventPublisher,
{
    pub fn new(adapter: EventBusAdapter<S, P>) -> Self {
        Self { adapter }
    }

    /// Handle one decoded request.
    pub async fn handle(&self, request: AuthRequest) -> AuthResponse {
        match self.dispatch(request).await {
            Ok(body) => AuthResponse::Ok(body),
            Err(e) => AuthResponse::Error {
                error: e.to_string(),
            },
        }
    }

    /// Handle one JSON-encoded request and return the JSON response.
    pub async fn handle_json(&self, line: &str) -> String {
        let response = match serde_json::from_str::<AuthRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                debug!(error = %e, "Malformed request");
                AuthResponse::Error {
                    error: HandlerError::MalformedRequest(e.to_string()).to_string(),
                }
            }
        };

        // Plain enums of strings and integers always serialize
        serde_json::to_string(&response)
            .unwrap_or_else(|_| r#"{"status":"error","error":"Internal error"}"#.to_string())
    }

    async fn dispatch(&self, request: AuthRequest) -> Result<ResponseBody, HandlerError> {
        let service = self.adapter.service();

        match request {
            AuthRequest::Authenticate { user, signature } => {
                let address = parse_address(&user)?;
                // Undecodable signature bytes are just another invalid signature
                let bytes =
                    decode_hex(&signature).map_err(|_| AuthenticatorError::InvalidSignature)?;

                let (receipt, _) = self.adapter.authenticate_and_publish(address, &bytes).await?;

                Ok(ResponseBody::Authenticated {
                    user: format_address(&address),
                    nonce: receipt.event.nonce.to_string(),
                    next_nonce: receipt.next_nonce.to_string(),
                })
            }
            AuthRequest::IsAuthenticated { user } => {
                let address = parse_address(&user)?;
                Ok(ResponseBody::Flag {
                    user: format_address(&address),
                    authenticated: service.is_authenticated(&address),
                })
            }
            AuthRequest::Authenticated { user } => {
                let address = parse_address(&user)?;
                Ok(ResponseBody::Flag {
                    user: format_address(&address),
                    authenticated: service.authenticated(&address),
                })
            }
            AuthRequest::GetNonce { user } => {
                let address = parse_address(&user)?;
                Ok(ResponseBody::Nonce {
                    user: format_address(&address),
                    nonce: service.get_nonce(&address).to_string(),
                })
            }
            AuthRequest::Domain => {
                let domain = service.domain();
                Ok(ResponseBody::Domain {
                    name: domain.name().to_string(),
                    version: domain.version().to_string(),
                    chain_id: domain.chain_id().0,
                    verifying_contract: format_address(&domain.verifying_contract()),
                    domain_separator: format_hash(&domain.domain_separator()),
                })
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
