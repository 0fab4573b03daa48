//! `aula-client` — dashboard controller and API gateway for the enrollment
//! client.
//!
//! This crate hosts the role-gated view state machine, the per-view dataset
//! handling, and the mutation flows, all driven through an injectable
//! [`Gateway`] so the controller can be exercised without a server. The
//! session manager from `aula-auth` stays the sole owner of the credential.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod http;
pub mod state;
pub mod view;

pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use error::{ClientError, GatewayError};
pub use gateway::{
    Ack, Credentials, EnrollmentRequest, Gateway, NewStudent, NewSubject, UnenrollmentRequest,
};
pub use http::HttpGateway;
pub use state::{DashboardSnapshot, Dataset, Outcome};
pub use view::View;
