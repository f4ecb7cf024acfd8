//! Shared test utilities for the Infisical login action.
//!
//! This crate provides:
//! - Proptest generators for enumeration tokens, tokens, and headers
//! - Mock implementations of the runner host and ID token provider
//! - Test fixtures with sample API payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{HostCall, MockActionHost, StaticIdTokenProvider};
