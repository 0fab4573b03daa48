//! `aula-auth` — session and authorization boundary for the enrollment
//! client.
//!
//! Pure state and decoding, no HTTP. The session manager is the sole owner
//! of the credential token; identity and capabilities derive from it.

pub mod capability;
pub mod claims;
pub mod identity;
pub mod role;
pub mod session;

pub use capability::{Capability, CapabilitySet, capabilities};
pub use claims::{TokenClaims, TokenError, decode_claims, identity_from_token};
pub use identity::Identity;
pub use role::{Role, UnknownRoleError};
pub use session::{NoCredentialError, SessionManager};
