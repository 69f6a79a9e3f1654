//! CLI command implementations
//!
//! Session commands (`login`, `logout`, `status`), configuration commands
//! (`validate-config`, `init`) and one command group per role. Role groups
//! pass the route guard before any request is made.

pub mod admin;
pub mod common;
pub mod doctor;
pub mod init;
pub mod login;
pub mod logout;
pub mod patient;
pub mod status;
pub mod technician;
pub mod validate;
