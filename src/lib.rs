// Patient Track - Global Patient Track API Client
// Copyright (c) 2025 Patient Track Contributors
// Licensed under the MIT License

//! # Patient Track - Global Patient Track API Client
//!
//! Patient Track is a client for the Global Patient Track healthcare
//! platform. Administrators, doctors, patients and lab technicians sign in
//! against the platform's gateway and work with users, patient records,
//! visit history, lab prescriptions and lab results.
//!
//! ## Overview
//!
//! This library provides:
//! - **Session management**: a persisted session of five keys, restored on
//!   start and torn down on logout or whenever the backend answers 401
//! - **A single HTTP client** that adds the bearer and `X-User-Id`
//!   headers and classifies failures
//! - **Service facades**, one method per backend route
//! - **Role-based route guarding**
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Auth context, sign-in, route guard, cancellation, messages
//! - [`services`] - Service facades over the backend routes
//! - [`adapters`] - HTTP client and session storage
//! - [`domain`] - Domain types, wire records and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use patient_track::adapters::http::{ApiClient, LoggingNavigator};
//! use patient_track::adapters::storage::FileSessionStore;
//! use patient_track::config::{load_config, secret_string};
//! use patient_track::core::login::sign_in;
//! use patient_track::core::AuthContext;
//! use patient_track::domain::models::Credentials;
//! use patient_track::services::{AuthService, DoctorService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ptrack.toml")?;
//!     let context = AuthContext::init(Arc::new(FileSessionStore::open(&config.session.path)?))?;
//!     let client = ApiClient::new(&config, context.clone(), Arc::new(LoggingNavigator))?;
//!
//!     let credentials = Credentials::new("doctor", secret_string("password".to_string()));
//!     let landing = sign_in(&AuthService::new(client.clone()), &context, &credentials).await?;
//!     println!("Landing on {landing}");
//!
//!     let patients = DoctorService::new(client).patients().await?;
//!     println!("{} patients", patients.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]. Backend failures
//! arrive as [`domain::ApiError`] inside [`domain::TrackError::Api`];
//! [`core::messages::user_message`] turns any error into the text shown to
//! the user.
//!
//! ## Logging
//!
//! Patient Track logs through `tracing`. Bearer tokens and passwords never
//! reach a log record.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod services;
