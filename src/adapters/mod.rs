//! External integrations for Patient Track.
//!
//! - [`http`] - the backend API: base URL selection, session headers,
//!   failure classification and the global 401 teardown
//! - [`storage`] - where the session is persisted between runs
//!
//! # Example
//!
//! ```rust,no_run
//! use patient_track::adapters::http::{ApiClient, LoggingNavigator};
//! use patient_track::adapters::storage::FileSessionStore;
//! use patient_track::config::load_config;
//! use patient_track::core::AuthContext;
//! use std::sync::Arc;
//!
//! # fn example() -> patient_track::domain::Result<()> {
//! let config = load_config("ptrack.toml")?;
//! let store = FileSessionStore::open(&config.session.path)?;
//! let context = AuthContext::init(Arc::new(store))?;
//! let client = ApiClient::new(&config, context, Arc::new(LoggingNavigator))?;
//! println!("Talking to {}", client.base_url());
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod storage;
