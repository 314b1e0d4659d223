//! User Registry Core - Domain types and validation rules.
//!
//! This crate provides the types shared by the registry components:
//! - `server` - HTTP service exposing the `/users` resource
//! - `integration-tests` - End-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no clocks,
//! no HTTP. Anything time-dependent takes `today` as an argument so callers
//! decide where the current date comes from.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails and the minimum eligibility age
//! - [`user`] - The stored `User` record and its create/update/patch payloads
//! - [`validation`] - Field-level rules applied before a user is accepted

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod user;
pub mod validation;

pub use types::*;
pub use user::{User, UserPatch, UserPayload, UserReplacement};
pub use validation::{Violation, validate_new_user};
