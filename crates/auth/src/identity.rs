//! The authenticated identity derived from the credential token.

use aula_core::UserId;

use crate::capability::CapabilitySet;
use crate::role::Role;

/// Who the current user is, as stated by the token payload.
///
/// Recomputed whenever the credential changes; never cached past it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
}

impl Identity {
    /// The capability set granted by this identity's role.
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::of(self.role)
    }
}
