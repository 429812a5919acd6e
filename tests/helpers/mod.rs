//! Test helpers module
//!
//! This module provides utilities and helpers for testing the JornadaPortal client.
//! It includes the mock backend, canned payloads and test context setup.

#![allow(dead_code)]

pub mod portal_mock;
pub mod test_context;
pub mod test_data;

pub use portal_mock::*;
pub use test_context::*;
pub use test_data::*;
