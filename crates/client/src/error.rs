//! Error taxonomy for gateway calls and dashboard operations.

use thiserror::Error;

use aula_auth::Capability;

/// Failure of a single HTTP exchange with the API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The server answered with a non-2xx status. The body `msg` is carried
    /// verbatim for display.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Transport-level failure (DNS, refused connection, aborted request).
    #[error("connection error: {0}")]
    Connection(String),

    /// A 2xx response whose body did not parse as the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// An authenticated call was attempted with no credential present.
    #[error("no active session")]
    NoSession,
}

/// Classification of a dashboard operation failure, surfaced through the
/// operation outcome. No variant is fatal; the controller stays usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server rejected the request; its message is shown as-is.
    #[error("{0}")]
    Rejected(String),

    /// The API could not be reached.
    #[error("could not reach the API")]
    Connection,

    /// The current role lacks the capability. Checked before dispatch, so
    /// no request is sent.
    #[error("missing capability {0}")]
    PermissionDenied(Capability),

    /// The credential was rejected or absent; the session has been closed.
    #[error("session is no longer valid")]
    SessionInvalid,
}

impl From<GatewayError> for ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { status: 401, .. } | GatewayError::NoSession => {
                ClientError::SessionInvalid
            }
            GatewayError::Rejected { message, .. } => ClientError::Rejected(message),
            GatewayError::Connection(_) | GatewayError::Decode(_) => ClientError::Connection,
        }
    }
}
