//! Shared plumbing for the Infisical login action.
//!
//! This crate provides:
//! - An error type classified into validation, transport, and generic kinds
//! - A request client factory bound to a base domain and default headers
//! - The runner command sink ([`ActionHost`]) and its GitHub Actions implementation
//! - A terminal error reporter
//! - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod host;
pub mod http;
pub mod report;
pub mod tracing_config;

pub use error::{ActionError, ActionResult, ErrorKind};
pub use host::{ActionHost, GithubActionsHost, WorkflowCommand};
pub use http::{HttpConfig, RequestClient, build_http_client, create_client, create_client_with_config};
pub use report::report_error;
pub use tracing_config::{TracingConfig, init_tracing};
