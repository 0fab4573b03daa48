//! Gateway abstraction over the enrollment API.
//!
//! One method per endpoint. Production uses the HTTP implementation in
//! [`crate::http`]; tests drive the dashboard against in-memory stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use aula_core::{CareerId, EnrolledSubject, Student, StudentId, Subject, SubjectId};

use crate::error::GatewayError;

/// Credentials for `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Body for `POST /inscripciones`.
///
/// `student` is present only when an administrator enrolls someone else;
/// otherwise the server resolves the caller from the token.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentRequest {
    #[serde(rename = "materia_id")]
    pub subject: SubjectId,
    #[serde(rename = "alumno_id", skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentId>,
}

/// Body for `DELETE /inscripciones`.
#[derive(Debug, Clone, Serialize)]
pub struct UnenrollmentRequest {
    #[serde(rename = "alumno_id")]
    pub student: StudentId,
    #[serde(rename = "materia_id")]
    pub subject: SubjectId,
}

/// Body for `POST /alumnos`.
#[derive(Debug, Clone, Serialize)]
pub struct NewStudent {
    #[serde(rename = "nombre")]
    pub name: String,
    pub mail: String,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

/// Body for `POST /materias`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubject {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "carrera_id")]
    pub career: CareerId,
}

/// Acknowledgement body (`{msg}`) returned by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub msg: String,
}

/// Async boundary to the enrollment API.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `POST /login`; returns the credential token.
    async fn login(&self, credentials: &Credentials) -> Result<String, GatewayError>;

    /// `GET /materias`, optionally including deactivated subjects.
    async fn subjects(&self, include_inactive: bool) -> Result<Vec<Subject>, GatewayError>;

    /// `GET /materias/:id/alumnos`.
    async fn subject_roster(&self, subject: SubjectId) -> Result<Vec<Student>, GatewayError>;

    /// `GET /alumnos`, optionally including deactivated students.
    async fn students(&self, include_inactive: bool) -> Result<Vec<Student>, GatewayError>;

    /// `GET /alumnos/:id/materias` — the student's own enrollments.
    async fn enrollments_of(&self, student: StudentId)
    -> Result<Vec<EnrolledSubject>, GatewayError>;

    /// `POST /inscripciones`.
    async fn enroll(&self, request: &EnrollmentRequest) -> Result<Ack, GatewayError>;

    /// `DELETE /inscripciones`.
    async fn unenroll(&self, request: &UnenrollmentRequest) -> Result<Ack, GatewayError>;

    /// `POST /alumnos`.
    async fn create_student(&self, request: &NewStudent) -> Result<Ack, GatewayError>;

    /// `POST /materias`.
    async fn create_subject(&self, request: &NewSubject) -> Result<Ack, GatewayError>;

    /// `DELETE /alumnos/:id` — logical deactivation, not a physical delete.
    async fn deactivate_student(&self, student: StudentId) -> Result<Ack, GatewayError>;

    /// `PUT /alumnos/:id/reactivar`.
    async fn reactivate_student(&self, student: StudentId) -> Result<Ack, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_body_omits_absent_student() {
        let own = EnrollmentRequest {
            subject: SubjectId::new(4),
            student: None,
        };
        assert_eq!(
            serde_json::to_string(&own).unwrap(),
            r#"{"materia_id":4}"#
        );

        let other = EnrollmentRequest {
            subject: SubjectId::new(4),
            student: Some(StudentId::new(9)),
        };
        assert_eq!(
            serde_json::to_string(&other).unwrap(),
            r#"{"materia_id":4,"alumno_id":9}"#
        );
    }

    #[test]
    fn request_bodies_use_wire_field_names() {
        let credentials = Credentials {
            username: "admin".into(),
            password: "123456".into(),
        };
        assert_eq!(
            serde_json::to_string(&credentials).unwrap(),
            r#"{"usuario":"admin","contrasena":"123456"}"#
        );

        let subject = NewSubject {
            name: "Redes".into(),
            career: CareerId::new(1),
        };
        assert_eq!(
            serde_json::to_string(&subject).unwrap(),
            r#"{"nombre":"Redes","carrera_id":1}"#
        );
    }
}
