//! Read models matching the API response shapes.
//!
//! Field names on the wire are Spanish (`materia`, `carrera`, `fecha_baja`,
//! ...); the structs keep English names and rename on (de)serialization.
//!
//! A record with `fecha_baja == null` is active; a non-null value marks a
//! logical deactivation. Only null vs non-null is load-bearing — the client
//! never does arithmetic on the timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{StudentId, SubjectId};

/// A subject as returned by `GET /materias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    #[serde(rename = "materia")]
    pub name: String,
    #[serde(rename = "carrera")]
    pub career: String,
    #[serde(rename = "fecha_baja", default)]
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Subject {
    pub fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }
}

/// A student row as returned by `GET /alumnos`.
///
/// Roster responses (`GET /materias/:id/alumnos`) omit `fecha_baja`; the
/// field defaults to active there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub username: String,
    pub mail: String,
    #[serde(rename = "fecha_baja", default)]
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }
}

/// A subject the calling student is enrolled in
/// (`GET /alumnos/:id/materias`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledSubject {
    pub id: SubjectId,
    #[serde(rename = "materia")]
    pub name: String,
    #[serde(rename = "carrera")]
    pub career: String,
}
