//! HTTP implementation of the gateway.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use aula_auth::SessionManager;
use aula_core::{EnrolledSubject, Student, StudentId, Subject, SubjectId};

use crate::config::ClientConfig;
use crate::error::GatewayError;
use crate::gateway::{
    Ack, Credentials, EnrollmentRequest, Gateway, NewStudent, NewSubject, UnenrollmentRequest,
};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// `reqwest`-backed gateway talking to the configured API base URL.
///
/// Every call except `login` carries `Authorization: Bearer <token>` taken
/// from the session manager at dispatch time.
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
    session: SessionManager,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig, session: SessionManager) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode the JSON body, mapping non-2xx responses to
    /// [`GatewayError::Rejected`] with the server's `msg` when present.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        authenticated: bool,
    ) -> Result<T, GatewayError> {
        let request = if authenticated {
            let header = self
                .session
                .auth_header()
                .map_err(|_| GatewayError::NoSession)?;
            request.header(reqwest::header::AUTHORIZATION, header)
        } else {
            request
        };

        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Connection(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| GatewayError::Decode(err.to_string()))
        } else {
            let message = response
                .json::<Ack>()
                .await
                .map(|ack| ack.msg)
                .unwrap_or_else(|_| format!("request failed with status {status}"));
            tracing::debug!(status = status.as_u16(), %message, "API rejected request");
            Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<String, GatewayError> {
        let response: LoginResponse = self
            .execute(self.http.post(self.url("/login")).json(credentials), false)
            .await?;
        Ok(response.token)
    }

    async fn subjects(&self, include_inactive: bool) -> Result<Vec<Subject>, GatewayError> {
        let path = if include_inactive {
            "/materias?todos=true"
        } else {
            "/materias"
        };
        self.execute(self.http.get(self.url(path)), true).await
    }

    async fn subject_roster(&self, subject: SubjectId) -> Result<Vec<Student>, GatewayError> {
        let path = format!("/materias/{subject}/alumnos");
        self.execute(self.http.get(self.url(&path)), true).await
    }

    async fn students(&self, include_inactive: bool) -> Result<Vec<Student>, GatewayError> {
        let path = if include_inactive {
            "/alumnos?todos=true"
        } else {
            "/alumnos"
        };
        self.execute(self.http.get(self.url(path)), true).await
    }

    async fn enrollments_of(
        &self,
        student: StudentId,
    ) -> Result<Vec<EnrolledSubject>, GatewayError> {
        let path = format!("/alumnos/{student}/materias");
        self.execute(self.http.get(self.url(&path)), true).await
    }

    async fn enroll(&self, request: &EnrollmentRequest) -> Result<Ack, GatewayError> {
        self.execute(
            self.http.post(self.url("/inscripciones")).json(request),
            true,
        )
        .await
    }

    async fn unenroll(&self, request: &UnenrollmentRequest) -> Result<Ack, GatewayError> {
        self.execute(
            self.http.delete(self.url("/inscripciones")).json(request),
            true,
        )
        .await
    }

    async fn create_student(&self, request: &NewStudent) -> Result<Ack, GatewayError> {
        self.execute(self.http.post(self.url("/alumnos")).json(request), true)
            .await
    }

    async fn create_subject(&self, request: &NewSubject) -> Result<Ack, GatewayError> {
        self.execute(self.http.post(self.url("/materias")).json(request), true)
            .await
    }

    async fn deactivate_student(&self, student: StudentId) -> Result<Ack, GatewayError> {
        let path = format!("/alumnos/{student}");
        self.execute(self.http.delete(self.url(&path)), true).await
    }

    async fn reactivate_student(&self, student: StudentId) -> Result<Ack, GatewayError> {
        let path = format!("/alumnos/{student}/reactivar");
        self.execute(self.http.put(self.url(&path)), true).await
    }
}
