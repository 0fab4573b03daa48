//! Minimal console shell: sign in with env-provided credentials and dump
//! the landing view's dataset. Useful as a smoke check against a running
//! API.

use std::sync::Arc;

use aula_auth::SessionManager;
use aula_client::{ClientConfig, Credentials, Dashboard, Dataset, Gateway, HttpGateway};

#[tokio::main]
async fn main() {
    aula_observability::init();

    let username = std::env::var("AULA_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("AULA_PASSWORD").unwrap_or_else(|_| "123456".to_string());

    let config = ClientConfig::from_env();
    let session = SessionManager::new();
    let gateway = Arc::new(HttpGateway::new(&config, session.clone()));

    let token = gateway
        .login(&Credentials { username, password })
        .await
        .expect("login failed");
    let identity = session
        .login(token)
        .expect("API returned an undecodable token");
    tracing::info!(user = %identity.id, role = %identity.role, "signed in");

    let dashboard = Dashboard::new(session, gateway);
    dashboard.refresh().await;

    let snapshot = dashboard.snapshot().await;
    tracing::info!(view = ?snapshot.view, "landing view");
    match &snapshot.dataset {
        Dataset::Students(rows) | Dataset::Roster(rows) => {
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.id,
                    row.name,
                    row.username,
                    if row.is_active() { "activo" } else { "baja" }
                );
            }
        }
        Dataset::Subjects(rows) => {
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.id,
                    row.name,
                    row.career,
                    if row.is_active() { "activa" } else { "baja" }
                );
            }
        }
        Dataset::Enrollments(rows) => {
            for row in rows {
                println!("{}\t{}\t{}", row.id, row.name, row.career);
            }
        }
        Dataset::Empty => println!("(no dataset for this view)"),
    }

    if let Some(error) = &snapshot.outcome.error {
        eprintln!("error: {error}");
    }
}
