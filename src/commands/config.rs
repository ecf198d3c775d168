//! Configuration command definitions.

use crate::commands::params::{
    force_parameter, COMMAND_CONFIG, COMMAND_INIT, COMMAND_PATH, COMMAND_SHOW,
};
use clap::Command;

/// Create the configuration command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(Command::new(COMMAND_PATH).about("Show the configuration file path"))
        .subcommand(
            Command::new(COMMAND_SHOW)
                .about("Show the effective configuration (password masked)"),
        )
        .subcommand(
            Command::new(COMMAND_INIT)
                .about("Write a configuration file with default values")
                .arg(force_parameter()),
        )
}
