//! Plumbing shared by the command implementations

use crate::adapters::http::{ApiClient, LoggingNavigator};
use crate::adapters::storage::FileSessionStore;
use crate::config::{load_config_or_default, PortalConfig};
use crate::core::guard::{GuardDecision, Route, RouteGuard};
use crate::core::messages::{user_message, Operation};
use crate::core::scope::ScopeHandle;
use crate::core::AuthContext;
use crate::domain::{Result, TrackError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Process exit codes
pub mod exit {
    pub const OK: i32 = 0;
    pub const REQUEST_FAILED: i32 = 1;
    pub const CONFIGURATION: i32 = 2;
    pub const REDIRECTED_TO_LOGIN: i32 = 3;
    pub const FATAL: i32 = 5;
}

/// Everything a command needs to talk to the backend
pub struct Workspace {
    pub config: PortalConfig,
    pub context: AuthContext,
    pub client: ApiClient,
    pub guard: RouteGuard,
}

impl Workspace {
    /// Load configuration, restore the persisted session and build the client
    pub fn open(config_path: &str) -> Result<Self> {
        let config = load_config_or_default(config_path)?;
        let store = FileSessionStore::open(&config.session.path)?;
        let context = AuthContext::init(Arc::new(store))?;
        let client = ApiClient::new(&config, context.clone(), Arc::new(LoggingNavigator))?;
        let guard = RouteGuard::new(context.clone());

        Ok(Self {
            config,
            context,
            client,
            guard,
        })
    }

    /// Open the workspace, reporting a failure as an exit code
    pub fn open_or_exit(config_path: &str) -> std::result::Result<Self, i32> {
        Self::open(config_path).map_err(|e| {
            tracing::error!(error = %e, "Failed to prepare session");
            eprintln!("Error: {e}");
            match e {
                TrackError::Configuration(_) => exit::CONFIGURATION,
                _ => exit::FATAL,
            }
        })
    }

    /// Apply the route guard; `Some(code)` means the command must stop
    pub fn enter(&self, route: Route) -> Option<i32> {
        match self.guard.check(route) {
            GuardDecision::Render => None,
            GuardDecision::RedirectToLogin => {
                eprintln!(
                    "Error: {} requires a matching sign-in. Run `ptrack login` first.",
                    route.path()
                );
                Some(exit::REDIRECTED_TO_LOGIN)
            }
        }
    }
}

/// Run one user action inside the screen scope and print its result as JSON
pub async fn emit<T, F>(scope: &ScopeHandle, operation: Operation, work: F) -> i32
where
    T: Serialize,
    F: Future<Output = Result<T>>,
{
    match scope.clone().run(work).await {
        Ok(value) => match print_json(&value) {
            Ok(()) => exit::OK,
            Err(e) => report_failure(&e, operation),
        },
        Err(e) => report_failure(&e, operation),
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Show the user-facing message for a failed action and pick the exit code
pub fn report_failure(error: &TrackError, operation: Operation) -> i32 {
    tracing::debug!(error = %error, operation = %operation, "Command failed");
    eprintln!("Error: {}", user_message(error, operation));

    match error {
        TrackError::Api(_) if error.is_unauthorized() && operation != Operation::Login => {
            eprintln!("   Session cleared. Run `ptrack login` to sign in again.");
            exit::REDIRECTED_TO_LOGIN
        }
        TrackError::MissingIdentity(_) => exit::REDIRECTED_TO_LOGIN,
        TrackError::Configuration(_) => exit::CONFIGURATION,
        _ => exit::REQUEST_FAILED,
    }
}

/// Parse a `--data` argument: inline JSON, or `@path` to read a file
pub fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T> {
    let raw = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => data.to_string(),
    };
    serde_json::from_str(&raw).map_err(|e| TrackError::Validation(format!("Invalid --data: {e}")))
}
