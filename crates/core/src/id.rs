//! Strongly-typed identifiers used across the client.
//!
//! The API numbers every record with plain integers; the newtypes keep a
//! subject id from ever being passed where a student id is expected.

use core::num::ParseIntError;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of an authenticated user (any role).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a student record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i64);

/// Identifier of a subject.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(i64);

/// Identifier of a career (degree program) a subject belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerId(i64);

/// Parse failure for an identifier typed in by a user (e.g. an enrollment
/// form field).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {source}")]
pub struct InvalidIdError {
    kind: &'static str,
    #[source]
    source: ParseIntError,
}

macro_rules! impl_numeric_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = InvalidIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = i64::from_str(s.trim()).map_err(|source| InvalidIdError {
                    kind: $name,
                    source,
                })?;
                Ok(Self(value))
            }
        }
    };
}

impl_numeric_newtype!(UserId, "UserId");
impl_numeric_newtype!(StudentId, "StudentId");
impl_numeric_newtype!(SubjectId, "SubjectId");
impl_numeric_newtype!(CareerId, "CareerId");

// The API numbers students by their user id, so a signed-in student's own
// record is addressed with the id from the token.
impl From<UserId> for StudentId {
    fn from(value: UserId) -> Self {
        Self(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_form_input() {
        let id: StudentId = " 42 ".parse().unwrap();
        assert_eq!(id, StudentId::new(42));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<SubjectId>().unwrap_err();
        assert!(err.to_string().contains("SubjectId"));
    }

    #[test]
    fn student_id_tracks_user_id() {
        assert_eq!(StudentId::from(UserId::new(7)), StudentId::new(7));
    }
}
