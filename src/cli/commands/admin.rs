//! Admin commands: user management

use super::common::{emit, parse_data, report_failure, Workspace};
use crate::core::guard::Route;
use crate::core::messages::Operation;
use crate::core::scope::ScopeHandle;
use crate::domain::models::CreateUserRequest;
use crate::domain::UserId;
use crate::services::AdminService;
use clap::{Args, Subcommand};

/// Arguments for the admin command group
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List all users
    Users,
    /// List doctors
    Doctors,
    /// List patients
    Patients,
    /// Show one user
    User { id: UserId },
    /// Create a user from JSON (`--data '{...}'` or `--data @file.json`)
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace a user's details
    Update {
        id: UserId,
        #[arg(long)]
        data: String,
    },
    /// Activate a user account
    Activate { id: UserId },
    /// Deactivate a user account
    Deactivate { id: UserId },
    /// Delete a user
    Delete { id: UserId },
    /// Show dashboard counters
    Stats,
}

impl AdminArgs {
    /// Execute an admin command
    pub async fn execute(&self, config_path: &str, scope: ScopeHandle) -> anyhow::Result<i32> {
        let workspace = match Workspace::open_or_exit(config_path) {
            Ok(w) => w,
            Err(code) => return Ok(code),
        };
        if let Some(code) = workspace.enter(Route::Admin) {
            return Ok(code);
        }

        let admin = AdminService::new(workspace.client.clone());

        let code = match &self.command {
            AdminCommand::Users => emit(&scope, Operation::Load, admin.list_users()).await,
            AdminCommand::Doctors => emit(&scope, Operation::Load, admin.list_doctors()).await,
            AdminCommand::Patients => emit(&scope, Operation::Load, admin.list_patients()).await,
            AdminCommand::User { id } => emit(&scope, Operation::Load, admin.get_user(*id)).await,
            AdminCommand::Create { data } => match parse_data::<CreateUserRequest>(data) {
                Ok(request) => emit(&scope, Operation::Create, admin.create_user(&request)).await,
                Err(e) => report_failure(&e, Operation::Create),
            },
            AdminCommand::Update { id, data } => match parse_data::<CreateUserRequest>(data) {
                Ok(request) => {
                    emit(&scope, Operation::Update, admin.update_user(*id, &request)).await
                }
                Err(e) => report_failure(&e, Operation::Update),
            },
            AdminCommand::Activate { id } => {
                emit(&scope, Operation::Update, admin.activate_user(*id)).await
            }
            AdminCommand::Deactivate { id } => {
                emit(&scope, Operation::Update, admin.deactivate_user(*id)).await
            }
            AdminCommand::Delete { id } => {
                emit(&scope, Operation::Delete, admin.delete_user(*id)).await
            }
            AdminCommand::Stats => emit(&scope, Operation::Load, admin.stats()).await,
        };

        Ok(code)
    }
}
