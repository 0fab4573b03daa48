//! Dashboard state: active view, datasets, operation outcome.

use aula_auth::{Capability, Identity};
use aula_core::{EnrolledSubject, Student, Subject, SubjectId};

use crate::view::View;

/// Transient message pair surfaced after mutations and failed fetches.
///
/// Cleared at the start of the next view change or mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Outcome {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(text.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Records backing the active view; replaced wholesale on every fetch,
/// never merged incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dataset {
    #[default]
    Empty,
    Students(Vec<Student>),
    Subjects(Vec<Subject>),
    Enrollments(Vec<EnrolledSubject>),
    Roster(Vec<Student>),
}

/// Mutable dashboard state behind the controller's lock.
#[derive(Debug)]
pub(crate) struct DashboardState {
    pub view: View,
    pub dataset: Dataset,
    /// Subjects catalog backing the enrollment availability check.
    pub subjects: Vec<Subject>,
    pub outcome: Outcome,
    pub loading: bool,
    /// Bumped on every view change; a fetch keyed to an older generation
    /// must not commit its result.
    pub generation: u64,
}

impl DashboardState {
    pub fn new(view: View) -> Self {
        Self {
            view,
            dataset: Dataset::Empty,
            subjects: Vec::new(),
            outcome: Outcome::default(),
            loading: false,
            generation: 0,
        }
    }

    /// Drop everything derived from the previous identity.
    pub fn clear_data(&mut self) {
        self.dataset = Dataset::Empty;
        self.subjects.clear();
        self.loading = false;
    }
}

/// Immutable copy of the dashboard handed to a renderer.
///
/// The helper predicates mirror what the UI derives from state, so a
/// renderer needs no gating logic of its own.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub identity: Option<Identity>,
    pub view: View,
    pub dataset: Dataset,
    pub subjects: Vec<Subject>,
    pub outcome: Outcome,
    pub loading: bool,
}

impl DashboardSnapshot {
    fn allows(&self, capability: Capability) -> bool {
        self.identity
            .is_some_and(|identity| identity.capabilities().allows(capability))
    }

    /// True when the signed-in student already has the subject; drives the
    /// disabled state of the enroll control.
    pub fn is_enrolled(&self, subject: SubjectId) -> bool {
        matches!(&self.dataset, Dataset::Enrollments(list)
            if list.iter().any(|enrolled| enrolled.id == subject))
    }

    /// Active subjects the signed-in student could still enroll in.
    pub fn enrollable_subjects(&self) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|subject| subject.is_active() && !self.is_enrolled(subject.id))
            .collect()
    }

    /// Deactivation is offered only on active students, to roles holding
    /// the capability.
    pub fn can_deactivate(&self, student: &Student) -> bool {
        self.allows(Capability::DeactivateStudent) && student.is_active()
    }

    /// Reactivation is only meaningful on a deactivated student.
    pub fn can_reactivate(&self, student: &Student) -> bool {
        self.allows(Capability::ReactivateStudent) && !student.is_active()
    }

    /// Students split into (active, inactive) for the enrollment panels.
    pub fn students_by_activity(&self) -> (Vec<&Student>, Vec<&Student>) {
        match &self.dataset {
            Dataset::Students(list) => list.iter().partition(|student| student.is_active()),
            _ => (Vec::new(), Vec::new()),
        }
    }

    /// Active subjects from the catalog (enrollment view side panel).
    pub fn active_subjects(&self) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|subject| subject.is_active())
            .collect()
    }

    /// Roster rows when a subject roster view is active.
    pub fn roster(&self) -> Option<&[Student]> {
        match &self.dataset {
            Dataset::Roster(list) => Some(list),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_auth::Role;
    use aula_core::{StudentId, UserId};
    use chrono::{TimeZone, Utc};

    fn subject(id: i64, active: bool) -> Subject {
        Subject {
            id: SubjectId::new(id),
            name: format!("Materia {id}"),
            career: "Sistemas".into(),
            deactivated_at: (!active).then(|| Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
        }
    }

    fn student(id: i64, active: bool) -> Student {
        Student {
            id: StudentId::new(id),
            name: format!("Alumno {id}"),
            username: format!("user{id}"),
            mail: format!("user{id}@example.edu"),
            deactivated_at: (!active).then(|| Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
        }
    }

    fn snapshot_for(role: Role) -> DashboardSnapshot {
        DashboardSnapshot {
            identity: Some(Identity {
                id: UserId::new(1),
                role,
            }),
            view: View::Profile,
            dataset: Dataset::Empty,
            subjects: Vec::new(),
            outcome: Outcome::default(),
            loading: false,
        }
    }

    #[test]
    fn enrolled_subjects_are_not_enrollable() {
        let mut snapshot = snapshot_for(Role::Student);
        snapshot.subjects = vec![subject(1, true), subject(2, true), subject(3, false)];
        snapshot.dataset = Dataset::Enrollments(vec![EnrolledSubject {
            id: SubjectId::new(1),
            name: "Materia 1".into(),
            career: "Sistemas".into(),
        }]);

        assert!(snapshot.is_enrolled(SubjectId::new(1)));
        assert!(!snapshot.is_enrolled(SubjectId::new(2)));

        let enrollable: Vec<_> = snapshot
            .enrollable_subjects()
            .iter()
            .map(|subject| subject.id)
            .collect();
        // Already enrolled (1) and deactivated (3) are excluded.
        assert_eq!(enrollable, vec![SubjectId::new(2)]);
    }

    #[test]
    fn deactivate_and_reactivate_availability() {
        let snapshot = snapshot_for(Role::Admin);
        let active = student(1, true);
        let inactive = student(2, false);

        assert!(snapshot.can_deactivate(&active));
        assert!(!snapshot.can_deactivate(&inactive));
        assert!(!snapshot.can_reactivate(&active));
        assert!(snapshot.can_reactivate(&inactive));
    }

    #[test]
    fn coordinator_gets_no_student_lifecycle_actions() {
        let snapshot = snapshot_for(Role::Coordinator);
        assert!(!snapshot.can_deactivate(&student(1, true)));
        assert!(!snapshot.can_reactivate(&student(2, false)));
    }

    #[test]
    fn students_partition_by_activity() {
        let mut snapshot = snapshot_for(Role::Admin);
        snapshot.dataset =
            Dataset::Students(vec![student(1, true), student(2, false), student(3, true)]);

        let (active, inactive) = snapshot.students_by_activity();
        assert_eq!(active.len(), 2);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, StudentId::new(2));
    }
}
