//! A command-line client for a token-authenticated JSON REST API.
//!
//! The crate resolves short endpoint names to path templates, logs in once
//! per process and reuses the token, and either prints a diagnostic report
//! of a response or returns its raw body.
//!
//! # Modules
//!
//! - `actions`: Command flows (generic call, file download, configuration)
//! - `auth`: Login and single-flight token caching
//! - `client`: HTTP client, request builder and response formatting
//! - `commands`: CLI command and parameter definitions
//! - `configuration`: YAML configuration loading and saving
//! - `endpoints`: Built-in endpoint name registry
//! - `error`: Errors reported by the command flows
//! - `exit_codes`: Process exit codes

pub mod actions;
pub mod auth;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod endpoints;
pub mod error;
pub mod exit_codes;
