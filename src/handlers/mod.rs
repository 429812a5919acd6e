//! Handlers module
//!
//! This module contains the user-facing entry points:
//! - Admin panel controllers for organizers
//! - The command-line front end dispatching to them

pub mod admin;
pub mod cli;

// Re-export commonly used handler types
pub use admin::PanelState;
pub use cli::{Cli, Command};
