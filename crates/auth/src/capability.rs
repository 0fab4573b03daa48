//! Capability sets derived from roles.
//!
//! Every gate in the client (rendered actions, permitted network calls,
//! reachable views) derives from this one mapping. Call sites never combine
//! ad hoc role booleans.

use crate::role::Role;

/// A single operation a role may invoke.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewOwnEnrollments,
    EnrollSelf,
    UnenrollSelf,
    ViewAllSubjects,
    ViewAllStudents,
    ViewSubjectRoster,
    CreateSubject,
    CreateStudent,
    DeactivateStudent,
    ReactivateStudent,
    EnrollAny,
    UnenrollAny,
}

impl Capability {
    /// Dotted `area.action` name, used in log lines and denial messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewOwnEnrollments => "enrollments.view_own",
            Capability::EnrollSelf => "enrollments.enroll_self",
            Capability::UnenrollSelf => "enrollments.unenroll_self",
            Capability::ViewAllSubjects => "subjects.view",
            Capability::ViewAllStudents => "students.view",
            Capability::ViewSubjectRoster => "subjects.roster",
            Capability::CreateSubject => "subjects.create",
            Capability::CreateStudent => "students.create",
            Capability::DeactivateStudent => "students.deactivate",
            Capability::ReactivateStudent => "students.reactivate",
            Capability::EnrollAny => "enrollments.enroll_any",
            Capability::UnenrollAny => "enrollments.unenroll_any",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

const STUDENT: &[Capability] = &[
    Capability::ViewOwnEnrollments,
    Capability::EnrollSelf,
    Capability::UnenrollSelf,
];

const COORDINATOR: &[Capability] = &[
    Capability::ViewAllSubjects,
    Capability::ViewAllStudents,
    Capability::ViewSubjectRoster,
];

// Admin is the coordinator set plus every management mutation.
const ADMIN: &[Capability] = &[
    Capability::ViewAllSubjects,
    Capability::ViewAllStudents,
    Capability::ViewSubjectRoster,
    Capability::CreateSubject,
    Capability::CreateStudent,
    Capability::DeactivateStudent,
    Capability::ReactivateStudent,
    Capability::EnrollAny,
    Capability::UnenrollAny,
];

/// The capabilities granted to a role.
///
/// Pure; no IO, no policy source. The server enforces the same rules
/// authoritatively — this mapping exists for gating and to avoid needless
/// round trips.
pub fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin => ADMIN,
        Role::Coordinator => COORDINATOR,
        Role::Student => STUDENT,
    }
}

/// Capability query bound to a role.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    role: Role,
}

impl CapabilitySet {
    pub fn of(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn allows(&self, capability: Capability) -> bool {
        capabilities(self.role).contains(&capability)
    }
}
