//! Test helpers module
//!
//! This module provides utilities for testing the TechClub site: an in-process
//! application with memory-backed stores, a Postgres test database, and
//! generated form data.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use test_context::*;
pub use test_data::*;
