//! Tests for template engine
//!
//! Organized into focused submodules, one per pipeline stage.

use super::*;

// Test helper functions
mod helpers;

mod tokenize;


// Error and property tests
mod errors;
