//! Dashboard views and their capability gating.

use aula_auth::{Capability, CapabilitySet, Role};
use aula_core::SubjectId;

/// The closed set of dashboard views.
///
/// `SubjectRoster` carries the subject it was opened for; there is no
/// string-keyed view state anywhere.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum View {
    /// Students see their own enrollments here; management roles a
    /// navigation placeholder.
    Profile,
    Students,
    Subjects,
    Enrollment,
    SubjectRoster(SubjectId),
}

impl View {
    /// Capability required to enter the view, if any.
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            View::Profile => None,
            View::Students => Some(Capability::ViewAllStudents),
            View::Subjects => Some(Capability::ViewAllSubjects),
            View::Enrollment => Some(Capability::EnrollAny),
            View::SubjectRoster(_) => Some(Capability::ViewSubjectRoster),
        }
    }

    pub fn permitted_for(&self, caps: CapabilitySet) -> bool {
        self.required_capability()
            .is_none_or(|capability| caps.allows(capability))
    }

    /// Landing view for a role; also the fallback when a transition is
    /// rejected.
    pub fn default_for(role: Role) -> View {
        match role {
            Role::Student => View::Profile,
            Role::Admin | Role::Coordinator => View::Students,
        }
    }
}
