//! # iam-cli
//!
//! Administrative client for IAM/STS compatible identity services.
//!
//! This crate provides:
//! - Account bootstrap (unauthenticated `CreateAccount`)
//! - User management (create, list, update, delete)
//! - Access key management (create, list, update, delete)
//! - SAML provider management (create, list, delete)
//! - Temporary credentials (federation tokens, assume role with SAML)

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
// Allow some clippy lints for now - these are stylistic and will be addressed later
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::use_self)]
#![allow(clippy::option_if_let_else)]

pub mod bootstrap;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod output;
pub mod registry;

pub use cli::Cli;
pub use config::CliConfig;
pub use credentials::{CredentialOverrides, CredentialResolver, Credentials};
pub use error::{CliError, CliResult, CredentialError};
pub use registry::{ArgKey, Command, CommandInvocation};
