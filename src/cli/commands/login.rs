//! Login command implementation
//!
//! Signs in against `POST /auth/login` and persists the session for the
//! following commands.

use super::common::{exit, report_failure, Workspace};
use crate::config::secret_string;
use crate::core::login::sign_in;
use crate::core::messages::Operation;
use crate::core::scope::ScopeHandle;
use crate::core::Route;
use crate::domain::models::Credentials;
use crate::domain::Session;
use crate::services::AuthService;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username; defaults to `credentials.username` from the configuration
    #[arg(short, long, env = "PTRACK_USERNAME")]
    pub username: Option<String>,

    /// Password; defaults to `credentials.password` from the configuration
    #[arg(short, long, env = "PTRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str, scope: ScopeHandle) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };

        let username = self
            .username
            .clone()
            .or_else(|| workspace.config.credentials.username.clone());
        let password = self
            .password
            .clone()
            .map(secret_string)
            .or_else(|| workspace.config.credentials.password.clone());

        let (Some(username), Some(password)) = (username, password) else {
            eprintln!("Error: username and password are required");
            eprintln!("   Pass --username/--password or set PTRACK_USERNAME/PTRACK_PASSWORD");
            return Ok(exit::CONFIGURATION);
        };

        tracing::info!(username = %username, "Signing in");
        let credentials = Credentials::new(username, password);
        let auth = AuthService::new(workspace.client.clone());

        match scope
            .run(sign_in(&auth, &workspace.context, &credentials))
            .await
        {
            Ok(landing) => {
                println!("{}", signed_in_summary(&workspace.context.session(), landing));
                Ok(exit::OK)
            }
            Err(e) => Ok(report_failure(&e, Operation::Login)),
        }
    }
}

/// Plain-text lines printed after a successful sign-in
fn signed_in_summary(session: &Session, landing: Route) -> String {
    let role = session
        .role
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unknown role".to_string());
    let mut lines = vec![format!("Signed in as {role}")];
    if let Some(organization) = &session.organization_name {
        lines.push(format!("Organization: {organization}"));
    }
    lines.push(format!("Landing: {landing}"));
    lines.join("\n")
}
