//! Credential token payload decoding.
//!
//! The token is an opaque signed string issued by the API at login. The
//! client never verifies the signature — the server is the authority — it
//! only reads the embedded payload. Any token that does not decode cleanly
//! is rejected outright and never trusted, even partially.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;

use aula_core::UserId;

use crate::identity::Identity;
use crate::role::Role;

/// Raw payload embedded in the credential token.
///
/// Extra fields (`iat`, `exp`, ...) are tolerated and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    pub uid: i64,
    pub rol: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is not a three-segment compact token")]
    Malformed,

    #[error("token payload is not valid base64url")]
    PayloadEncoding,

    #[error("token payload is missing the expected fields")]
    PayloadShape,

    #[error("token carries unknown role code {0}")]
    UnknownRole(i64),
}

/// Extract the `{uid, rol}` payload from a compact token.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(TokenError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::PayloadEncoding)?;

    serde_json::from_slice(&bytes).map_err(|_| TokenError::PayloadShape)
}

/// Derive a full identity from a credential token.
///
/// An unknown role code fails like any other malformed payload; the caller
/// must fall back to the logged-out state.
pub fn identity_from_token(token: &str) -> Result<Identity, TokenError> {
    let claims = decode_claims(token)?;
    let role = Role::from_code(claims.rol).ok_or(TokenError::UnknownRole(claims.rol))?;
    Ok(Identity {
        id: UserId::new(claims.uid),
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        format!("{header}.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn decodes_uid_and_rol() {
        let token = token_with_payload(r#"{"uid": 2, "rol": 3, "iat": 1700000000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims, TokenClaims { uid: 2, rol: 3 });

        let identity = identity_from_token(&token).unwrap();
        assert_eq!(identity.id, UserId::new(2));
        assert_eq!(identity.role, Role::Student);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(decode_claims("onlyonepart"), Err(TokenError::Malformed));
        assert_eq!(decode_claims("two.parts"), Err(TokenError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(TokenError::Malformed));
    }

    #[test]
    fn rejects_bad_base64_payload() {
        assert_eq!(
            decode_claims("header.!!not-base64!!.sig"),
            Err(TokenError::PayloadEncoding)
        );
    }

    #[test]
    fn rejects_payload_missing_fields() {
        let token = token_with_payload(r#"{"uid": 2}"#);
        assert_eq!(decode_claims(&token), Err(TokenError::PayloadShape));
    }

    #[test]
    fn rejects_unknown_role_code() {
        let token = token_with_payload(r#"{"uid": 2, "rol": 7}"#);
        assert_eq!(identity_from_token(&token), Err(TokenError::UnknownRole(7)));
    }
}
