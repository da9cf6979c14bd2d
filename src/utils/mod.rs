//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `ridelink` crate.
//!
//! This module centralizes reusable components, such as the crate-wide error
//! type and logging initialization, to promote consistency and reduce
//! duplication.

pub mod error;
pub mod logging;
