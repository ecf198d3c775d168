//! Command flows invoked by the binary after argument parsing.

pub mod call;
pub mod config;
pub mod download;
pub mod output;
