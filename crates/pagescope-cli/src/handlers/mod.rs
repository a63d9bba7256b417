//! Command handlers - kept out of main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod check;
pub mod read;

pub use check::{execute_check, load_page};
pub use read::{execute_read, fixture_for, read_all, requested_paths, summary};
