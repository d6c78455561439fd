//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific part of the
//! dashboard against mock backend adapters. Everything runs on the host
//! with no hosted backend required.

mod dashboard_tests;
mod feed_tests;
