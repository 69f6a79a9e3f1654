//! Session and navigation logic for Patient Track.
//!
//! # Modules
//!
//! - [`context`] - Observable authentication state over the session store
//! - [`login`] - Sign-in flow: token response to stored session
//! - [`guard`] - Route table and the access decision
//! - [`scope`] - Cancellation of work tied to a screen
//! - [`messages`] - Error to user-facing text
//!
//! # Session lifecycle
//!
//! 1. **Restore**: [`AuthContext::init`] reads the persisted session
//! 2. **Sign in**: [`login::sign_in`] stores the token, role and identity
//! 3. **Guard**: every screen checks [`guard::RouteGuard::check`]
//! 4. **Teardown**: logout, or any 401, clears all five session keys
//!
//! # Example
//!
//! ```rust,no_run
//! use patient_track::adapters::http::{ApiClient, LoggingNavigator};
//! use patient_track::adapters::storage::FileSessionStore;
//! use patient_track::config::secret_string;
//! use patient_track::core::context::AuthContext;
//! use patient_track::core::login::sign_in;
//! use patient_track::domain::models::Credentials;
//! use patient_track::services::AuthService;
//! use std::sync::Arc;
//!
//! # async fn example() -> patient_track::domain::Result<()> {
//! let context = AuthContext::init(Arc::new(FileSessionStore::open(".ptrack/session.json")?))?;
//! let client = ApiClient::with_base_url("http://localhost:8080", context.clone(), Arc::new(LoggingNavigator))?;
//!
//! let credentials = Credentials::new("doctor", secret_string("password".to_string()));
//! let landing = sign_in(&AuthService::new(client), &context, &credentials).await?;
//! println!("Signed in, landing on {landing}");
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod guard;
pub mod login;
pub mod messages;
pub mod scope;

pub use context::AuthContext;
pub use guard::{decide, GuardDecision, Route, RouteAccessRule, RouteGuard};
pub use scope::{ScopeHandle, ScreenScope};
