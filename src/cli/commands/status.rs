//! Status command implementation
//!
//! Shows the persisted session without contacting the backend.

use super::common::{exit, Workspace};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the session as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };

        let session = workspace.context.session();
        let authenticated = workspace.context.is_authenticated();

        if self.json {
            let body = serde_json::json!({
                "authenticated": authenticated,
                "role": session.role,
                "organizationId": session.organization_id,
                "organizationName": session.organization_name,
                "userId": session.user_id,
                "baseUrl": workspace.client.base_url(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(exit::OK);
        }

        println!("📊 Session Status");
        println!();
        println!("  API: {}", workspace.client.base_url());
        println!("  Session file: {}", workspace.config.session.path);

        match session.role.filter(|_| authenticated) {
            Some(role) => {
                println!("  Signed in: yes");
                println!("  Role: {role}");
                if let Some(ref name) = session.organization_name {
                    println!("  Organization: {name}");
                }
                if let Some(id) = session.organization_id {
                    println!("  Organization ID: {id}");
                }
                if let Some(id) = session.user_id {
                    println!("  User ID: {id}");
                }
            }
            None => println!("  Signed in: no"),
        }

        Ok(exit::OK)
    }
}
