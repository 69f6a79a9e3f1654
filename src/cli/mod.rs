//! CLI interface and argument parsing
//!
//! This module provides the `ptrack` command-line interface using clap.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | Success |
//! | 1 | The request failed |
//! | 2 | Configuration error |
//! | 3 | Not signed in with the required role (or the session expired) |
//! | 5 | Fatal error |

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::common::exit;

/// Patient Track - command-line client for the Global Patient Track API
#[derive(Parser, Debug)]
#[command(name = "ptrack")]
#[command(version, about, long_about = None)]
#[command(author = "Patient Track Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ptrack.toml", env = "PTRACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PTRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login(commands::login::LoginArgs),

    /// Sign out and clear the stored session
    Logout(commands::logout::LogoutArgs),

    /// Show the stored session
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// User administration (ADMIN)
    Admin(commands::admin::AdminArgs),

    /// Patient records and lab orders (DOCTOR)
    Doctor(commands::doctor::DoctorArgs),

    /// Own records and visit history (PATIENT)
    Patient(commands::patient::PatientArgs),

    /// Prescription queue and result entry (LABTECHNICIAN)
    Technician(commands::technician::TechnicianArgs),
}
