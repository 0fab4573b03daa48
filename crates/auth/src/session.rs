//! Session lifecycle: the sole owner of the credential token.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::claims::{TokenError, identity_from_token};
use crate::identity::Identity;

/// Returned when an `Authorization` header is requested while logged out.
///
/// Callers are expected to guard with [`SessionManager::is_authenticated`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no credential present")]
pub struct NoCredentialError;

#[derive(Debug)]
struct ActiveSession {
    token: String,
    identity: Identity,
}

/// Owner of the credential token and the identity derived from it.
///
/// Cloning yields a handle to the same session. The session manager is the
/// only writer of the credential; collaborators read the identity and may
/// force a logout (the dashboard does so when the API rejects the token).
///
/// States: logged out, or logged in with a decoded identity. A token that
/// fails to decode never becomes the current credential — the session is
/// left (or put back) in the logged-out state.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    inner: Arc<RwLock<Option<ActiveSession>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential and derive the current identity from it.
    pub fn login(&self, token: impl Into<String>) -> Result<Identity, TokenError> {
        let token = token.into();
        match identity_from_token(&token) {
            Ok(identity) => {
                *self.inner.write() = Some(ActiveSession { token, identity });
                tracing::info!(user = %identity.id, role = %identity.role, "session opened");
                Ok(identity)
            }
            Err(err) => {
                // Fail closed: an undecodable token invalidates whatever
                // session was active.
                *self.inner.write() = None;
                tracing::warn!(error = %err, "rejected credential token; logged out");
                Err(err)
            }
        }
    }

    /// Clear the credential and identity.
    pub fn logout(&self) {
        if self.inner.write().take().is_some() {
            tracing::info!("session closed");
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.read().as_ref().map(|session| session.identity)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Build the `Authorization` header value for the current credential.
    pub fn auth_header(&self) -> Result<String, NoCredentialError> {
        self.inner
            .read()
            .as_ref()
            .map(|session| format!("Bearer {}", session.token))
            .ok_or(NoCredentialError)
    }
}
