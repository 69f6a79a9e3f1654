//! Logout command implementation

use super::common::{exit, Workspace};
use crate::core::scope::ScopeHandle;
use crate::services::AuthService;
use clap::Args;

/// Arguments for the logout command
#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Only clear the local session, without notifying the server
    #[arg(long)]
    pub local: bool,
}

impl LogoutArgs {
    /// Execute the logout command
    ///
    /// The server is told first when a session exists; whatever it answers,
    /// the local session is cleared.
    pub async fn execute(&self, config_path: &str, scope: ScopeHandle) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };

        if workspace.context.is_authenticated() && !self.local {
            let auth = AuthService::new(workspace.client.clone());
            if let Err(e) = scope.run(auth.logout()).await {
                tracing::warn!(error = %e, "Server-side logout failed, clearing local session anyway");
            }
        }

        if let Err(e) = workspace.context.logout() {
            eprintln!("Error: failed to clear session: {e}");
            return Ok(exit::FATAL);
        }

        println!("Signed out");
        Ok(exit::OK)
    }
}
