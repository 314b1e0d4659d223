//! Core types for the user registry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod age;
pub mod email;

pub use age::{MinimumAge, MinimumAgeError};
pub use email::{Email, EmailError};
