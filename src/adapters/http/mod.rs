//! HTTP egress
//!
//! - [`ApiClient`] - the single point every backend call goes through
//! - [`resolve_base_url`] - development gateway vs. same-origin proxy
//! - [`Navigator`] - where the client sends the user after a 401

pub mod base_url;
pub mod client;
pub mod navigator;

pub use base_url::resolve_base_url;
pub use client::{ApiClient, USER_ID_HEADER};
pub use navigator::{LoggingNavigator, Navigator, RecordingNavigator};
