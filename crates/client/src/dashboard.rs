//! The role-gated dashboard controller.
//!
//! Owns the current-view state machine, the per-view dataset, and the
//! mutation flows. Identity and capabilities are read from the session
//! manager on every operation; the controller never mutates the credential
//! directly (it only forces a logout when the API rejects it).

use std::sync::Arc;

use tokio::sync::Mutex;

use aula_auth::{Capability, CapabilitySet, Identity, Role, SessionManager};
use aula_core::{Student, StudentId, Subject, SubjectId};

use crate::error::{ClientError, GatewayError};
use crate::gateway::{Ack, EnrollmentRequest, Gateway, NewStudent, NewSubject, UnenrollmentRequest};
use crate::state::{DashboardSnapshot, DashboardState, Dataset, Outcome};
use crate::view::View;

/// Key identifying the state a fetch was dispatched for.
///
/// A response only commits while the key still matches; a view change or a
/// different identity in the meantime makes the response stale and it is
/// dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct FetchKey {
    generation: u64,
    view: View,
    identity: Identity,
}

/// What a single refresh resolved for the active view.
struct Fetched {
    dataset: Dataset,
    subjects: Option<Vec<Subject>>,
}

/// Role-gated view controller over the enrollment API.
///
/// Cloning yields a handle to the same dashboard; state lives behind a
/// shared lock so a handle can be moved into spawned tasks.
#[derive(Clone)]
pub struct Dashboard {
    session: SessionManager,
    gateway: Arc<dyn Gateway>,
    state: Arc<Mutex<DashboardState>>,
}

impl Dashboard {
    pub fn new(session: SessionManager, gateway: Arc<dyn Gateway>) -> Self {
        let view = session
            .identity()
            .map_or(View::Profile, |identity| View::default_for(identity.role));
        Self {
            session,
            gateway,
            state: Arc::new(Mutex::new(DashboardState::new(view))),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Immutable copy of the current state for rendering.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let st = self.state.lock().await;
        DashboardSnapshot {
            identity: self.session.identity(),
            view: st.view,
            dataset: st.dataset.clone(),
            subjects: st.subjects.clone(),
            outcome: st.outcome.clone(),
            loading: st.loading,
        }
    }

    pub async fn view(&self) -> View {
        self.state.lock().await.view
    }

    pub async fn outcome(&self) -> Outcome {
        self.state.lock().await.outcome.clone()
    }

    // ── View transitions ────────────────────────────────────────────────

    /// Apply a view transition, substituting the role default when the
    /// target is not permitted. Returns the view actually applied.
    pub async fn set_view(&self, view: View) -> View {
        let Some(identity) = self.session.identity() else {
            return self.state.lock().await.view;
        };
        let caps = identity.capabilities();
        let target = if view.permitted_for(caps) {
            view
        } else {
            tracing::debug!(requested = ?view, role = %identity.role, "view not permitted; using role default");
            View::default_for(identity.role)
        };

        {
            let mut st = self.state.lock().await;
            st.outcome = Outcome::default();
            st.generation += 1;
            st.view = target;
            // View data (rosters included) is view-scoped; drop it now so a
            // renderer never shows the previous view's records.
            st.dataset = Dataset::Empty;
        }
        self.refresh().await;
        target
    }

    /// Enter the roster view for a subject.
    pub async fn open_subject_roster(&self, subject: SubjectId) -> View {
        self.set_view(View::SubjectRoster(subject)).await
    }

    /// Re-fetch the dataset(s) for the active view.
    ///
    /// Only the latest refresh for the current (generation, view, identity)
    /// key commits; superseded completions are discarded.
    pub async fn refresh(&self) {
        let Some(identity) = self.session.identity() else {
            return;
        };
        let caps = identity.capabilities();

        let key = {
            let mut st = self.state.lock().await;
            if !st.view.permitted_for(caps) {
                // The role changed under the current view (fresh login).
                st.view = View::default_for(identity.role);
                st.dataset = Dataset::Empty;
                st.generation += 1;
            }
            st.loading = true;
            FetchKey {
                generation: st.generation,
                view: st.view,
                identity,
            }
        };

        tracing::debug!(view = ?key.view, "refreshing dataset");
        let result = self.load(key.view, identity, caps).await;

        let mut st = self.state.lock().await;
        if st.generation != key.generation || self.session.identity() != Some(key.identity) {
            tracing::debug!(view = ?key.view, "discarding stale fetch result");
            return;
        }
        st.loading = false;
        match result {
            Ok(fetched) => {
                st.dataset = fetched.dataset;
                if let Some(subjects) = fetched.subjects {
                    st.subjects = subjects;
                }
            }
            Err(err) => {
                let invalid = err == ClientError::SessionInvalid;
                st.outcome = Outcome::error(err.to_string());
                if invalid {
                    st.clear_data();
                    drop(st);
                    tracing::warn!("API rejected the credential; closing session");
                    self.session.logout();
                }
            }
        }
    }

    /// Resolve the fetches the view needs.
    async fn load(
        &self,
        view: View,
        identity: Identity,
        caps: CapabilitySet,
    ) -> Result<Fetched, ClientError> {
        match view {
            View::Profile => {
                if caps.allows(Capability::ViewOwnEnrollments) {
                    let own = self
                        .gateway
                        .enrollments_of(StudentId::from(identity.id))
                        .await?;
                    let subjects = self.gateway.subjects(false).await?;
                    Ok(Fetched {
                        dataset: Dataset::Enrollments(own),
                        subjects: Some(subjects),
                    })
                } else {
                    // Management roles get a navigation placeholder here.
                    Ok(Fetched {
                        dataset: Dataset::Empty,
                        subjects: None,
                    })
                }
            }
            View::Students => Ok(Fetched {
                dataset: Dataset::Students(self.gateway.students(true).await?),
                subjects: None,
            }),
            View::Subjects => {
                // Only administrators see deactivated subjects in the list.
                let include_inactive = identity.role == Role::Admin;
                let list = self.gateway.subjects(include_inactive).await?;
                Ok(Fetched {
                    dataset: Dataset::Subjects(list.clone()),
                    subjects: Some(list),
                })
            }
            View::Enrollment => {
                let students = self.gateway.students(true).await?;
                let subjects = self.gateway.subjects(true).await?;
                Ok(Fetched {
                    dataset: Dataset::Students(students),
                    subjects: Some(subjects),
                })
            }
            View::SubjectRoster(subject) => Ok(Fetched {
                dataset: Dataset::Roster(self.gateway.subject_roster(subject).await?),
                subjects: None,
            }),
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Enroll a student (the caller when `student` is `None`) in a subject.
    pub async fn enroll(&self, subject: SubjectId, student: Option<StudentId>) -> Outcome {
        let (identity, caps) = match self.begin().await {
            Ok(context) => context,
            Err(outcome) => return outcome,
        };
        let own = StudentId::from(identity.id);
        let target = student.unwrap_or(own);
        let self_target = target == own;
        if !Self::may_enroll(caps, self_target) {
            let needed = if self_target {
                Capability::EnrollSelf
            } else {
                Capability::EnrollAny
            };
            return self.deny(needed).await;
        }

        let request = EnrollmentRequest {
            subject,
            student: (!self_target).then_some(target),
        };
        let result = self.gateway.enroll(&request).await;
        self.settle(result, self_target).await
    }

    /// Remove an enrollment; same self/any distinction as [`Self::enroll`].
    pub async fn unenroll(&self, subject: SubjectId, student: Option<StudentId>) -> Outcome {
        let (identity, caps) = match self.begin().await {
            Ok(context) => context,
            Err(outcome) => return outcome,
        };
        let own = StudentId::from(identity.id);
        let target = student.unwrap_or(own);
        let self_target = target == own;
        if !Self::may_unenroll(caps, self_target) {
            let needed = if self_target {
                Capability::UnenrollSelf
            } else {
                Capability::UnenrollAny
            };
            return self.deny(needed).await;
        }

        let request = UnenrollmentRequest {
            student: target,
            subject,
        };
        let result = self.gateway.unenroll(&request).await;
        self.settle(result, self_target).await
    }

    pub async fn create_student(&self, fields: NewStudent) -> Outcome {
        let (_identity, caps) = match self.begin().await {
            Ok(context) => context,
            Err(outcome) => return outcome,
        };
        if !caps.allows(Capability::CreateStudent) {
            return self.deny(Capability::CreateStudent).await;
        }
        let result = self.gateway.create_student(&fields).await;
        self.settle(result, true).await
    }

    pub async fn create_subject(&self, fields: NewSubject) -> Outcome {
        let (_identity, caps) = match self.begin().await {
            Ok(context) => context,
            Err(outcome) => return outcome,
        };
        if !caps.allows(Capability::CreateSubject) {
            return self.deny(Capability::CreateSubject).await;
        }
        let result = self.gateway.create_subject(&fields).await;
        self.settle(result, true).await
    }

    /// Logical delete: the record stays, marked deactivated.
    pub async fn deactivate_student(&self, student: StudentId) -> Outcome {
        let (_identity, caps) = match self.begin().await {
            Ok(context) => context,
            Err(outcome) => return outcome,
        };
        if !caps.allows(Capability::DeactivateStudent) {
            return self.deny(Capability::DeactivateStudent).await;
        }
        if let Some(existing) = self.known_student(student).await {
            if !existing.is_active() {
                return self.finish_noop("student is already deactivated").await;
            }
        }
        let result = self.gateway.deactivate_student(student).await;
        self.settle(result, true).await
    }

    /// Clear the deactivation marker; only meaningful on a deactivated
    /// student.
    pub async fn reactivate_student(&self, student: StudentId) -> Outcome {
        let (_identity, caps) = match self.begin().await {
            Ok(context) => context,
            Err(outcome) => return outcome,
        };
        if !caps.allows(Capability::ReactivateStudent) {
            return self.deny(Capability::ReactivateStudent).await;
        }
        if let Some(existing) = self.known_student(student).await {
            if existing.is_active() {
                return self.finish_noop("student is already active").await;
            }
        }
        let result = self.gateway.reactivate_student(student).await;
        self.settle(result, true).await
    }

    // ── Shared mutation plumbing ────────────────────────────────────────

    fn may_enroll(caps: CapabilitySet, self_target: bool) -> bool {
        // enroll(any) covers every student, the caller included.
        caps.allows(Capability::EnrollAny)
            || (self_target && caps.allows(Capability::EnrollSelf))
    }

    fn may_unenroll(caps: CapabilitySet, self_target: bool) -> bool {
        caps.allows(Capability::UnenrollAny)
            || (self_target && caps.allows(Capability::UnenrollSelf))
    }

    /// Start a mutation: clear the previous outcome and require a session.
    async fn begin(&self) -> Result<(Identity, CapabilitySet), Outcome> {
        let mut st = self.state.lock().await;
        st.outcome = Outcome::default();
        match self.session.identity() {
            Some(identity) => Ok((identity, identity.capabilities())),
            None => {
                let outcome = Outcome::error(ClientError::SessionInvalid.to_string());
                st.outcome = outcome.clone();
                Err(outcome)
            }
        }
    }

    /// Record a pre-dispatch denial; no request is sent.
    async fn deny(&self, capability: Capability) -> Outcome {
        tracing::debug!(%capability, "operation denied before dispatch");
        let outcome = Outcome::error(ClientError::PermissionDenied(capability).to_string());
        self.state.lock().await.outcome = outcome.clone();
        outcome
    }

    /// Record a client-side no-op (record already in the requested state).
    async fn finish_noop(&self, message: &str) -> Outcome {
        let outcome = Outcome::message(message);
        self.state.lock().await.outcome = outcome.clone();
        outcome
    }

    /// Record a mutation result; on success optionally re-fetch the active
    /// view so the dataset reflects the server's state.
    async fn settle(&self, result: Result<Ack, GatewayError>, refresh_after: bool) -> Outcome {
        let outcome = match result {
            Ok(ack) => Outcome::message(ack.msg),
            Err(err) => {
                let err = ClientError::from(err);
                if err == ClientError::SessionInvalid {
                    tracing::warn!("API rejected the credential; closing session");
                    self.session.logout();
                    self.state.lock().await.clear_data();
                }
                Outcome::error(err.to_string())
            }
        };
        let succeeded = outcome.is_ok();
        self.state.lock().await.outcome = outcome.clone();
        if succeeded && refresh_after {
            self.refresh().await;
        }
        outcome
    }

    /// Look a student up in the currently displayed list, if one is shown.
    async fn known_student(&self, student: StudentId) -> Option<Student> {
        let st = self.state.lock().await;
        match &st.dataset {
            Dataset::Students(list) => list.iter().find(|row| row.id == student).cloned(),
            _ => None,
        }
    }
}
