//! CLI command definitions and argument parsing.
//!
//! The root command itself is the generic "call a named endpoint" command;
//! `download-file` and `config` are subcommands next to it.

use clap::Command;

pub mod config;
pub mod download;
pub mod params;

use params::{
    base_parameter, body_parameter, config_file_parameter, endpoint_parameter, header_parameter,
    list_parameter, method_parameter, output_file_parameter, param_parameter, timeout_parameter,
    verbose_parameter,
};

/// Build the complete command-line interface.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .arg_required_else_help(true)
        .arg(verbose_parameter())
        .arg(config_file_parameter())
        .arg(endpoint_parameter())
        .arg(base_parameter())
        .arg(method_parameter())
        .arg(param_parameter())
        .arg(header_parameter())
        .arg(body_parameter())
        .arg(timeout_parameter())
        .arg(output_file_parameter())
        .arg(list_parameter())
        .subcommand(download::download_file_command())
        .subcommand(config::config_command())
}
