//! Shared command parameters for all CLI commands.
//!
//! This module defines the parameter names and the argument factories used by
//! the command modules.

use clap::{Arg, ArgAction};
use std::path::PathBuf;

// Commands
pub const COMMAND_DOWNLOAD_FILE: &str = "download-file";
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_PATH: &str = "path";
pub const COMMAND_SHOW: &str = "show";
pub const COMMAND_INIT: &str = "init";

// Parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_CONFIG_FILE: &str = "config-file";
pub const PARAMETER_ENDPOINT: &str = "endpoint";
pub const PARAMETER_BASE: &str = "base";
pub const PARAMETER_METHOD: &str = "method";
pub const PARAMETER_PARAM: &str = "param";
pub const PARAMETER_HEADER: &str = "header";
pub const PARAMETER_BODY: &str = "body";
pub const PARAMETER_TIMEOUT: &str = "timeout";
pub const PARAMETER_OUTPUT: &str = "output";
pub const PARAMETER_LIST: &str = "list";
pub const PARAMETER_FILE_ID: &str = "file-id";
pub const PARAMETER_FULL: &str = "full";
pub const PARAMETER_FORCE: &str = "force";

// Environment variables
pub const ENV_BASE_URL: &str = "RESTCLI_BASE_URL";
pub const ENV_TIMEOUT: &str = "RESTCLI_TIMEOUT";

/// Global flag enabling verbose output and debug logging
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output")
}

/// Global option selecting a configuration file other than the default one
pub fn config_file_parameter() -> Arg {
    Arg::new(PARAMETER_CONFIG_FILE)
        .long("config")
        .num_args(1)
        .required(false)
        .global(true)
        .help("Configuration file to use instead of the default one")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn output_file_parameter() -> Arg {
    Arg::new(PARAMETER_OUTPUT)
        .short('o')
        .long(PARAMETER_OUTPUT)
        .num_args(1)
        .required(false)
        .help("Output file path")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn endpoint_parameter() -> Arg {
    Arg::new(PARAMETER_ENDPOINT)
        .required(false)
        .help("Name of the endpoint to call (see --list)")
}

pub fn base_parameter() -> Arg {
    Arg::new(PARAMETER_BASE)
        .long(PARAMETER_BASE)
        .num_args(1)
        .required(false)
        .env(ENV_BASE_URL)
        .help("Base address of the API, overrides the configured one")
}

pub fn method_parameter() -> Arg {
    Arg::new(PARAMETER_METHOD)
        .short('m')
        .long(PARAMETER_METHOD)
        .num_args(1)
        .default_value("GET")
        .help("HTTP method")
}

pub fn param_parameter() -> Arg {
    Arg::new(PARAMETER_PARAM)
        .short('p')
        .long(PARAMETER_PARAM)
        .num_args(1)
        .action(ArgAction::Append)
        .help("Path parameter in the form key=value (repeatable)")
}

pub fn header_parameter() -> Arg {
    Arg::new(PARAMETER_HEADER)
        .short('H')
        .long(PARAMETER_HEADER)
        .num_args(1)
        .action(ArgAction::Append)
        .help("Request header in the form \"Key:Value\" (repeatable)")
}

pub fn body_parameter() -> Arg {
    Arg::new(PARAMETER_BODY)
        .short('b')
        .long(PARAMETER_BODY)
        .num_args(1)
        .help("JSON request body (POST, PUT and PATCH only)")
}

pub fn timeout_parameter() -> Arg {
    Arg::new(PARAMETER_TIMEOUT)
        .short('t')
        .long(PARAMETER_TIMEOUT)
        .num_args(1)
        .env(ENV_TIMEOUT)
        .help("Request timeout in seconds, overrides the configured one")
        .value_parser(clap::value_parser!(u64).range(1..))
}

pub fn list_parameter() -> Arg {
    Arg::new(PARAMETER_LIST)
        .short('l')
        .long(PARAMETER_LIST)
        .action(ArgAction::SetTrue)
        .help("List the available endpoints and exit")
}

pub fn file_id_parameter() -> Arg {
    Arg::new(PARAMETER_FILE_ID)
        .required(true)
        .help("File ID to download")
}

pub fn full_parameter() -> Arg {
    Arg::new(PARAMETER_FULL)
        .short('F')
        .long(PARAMETER_FULL)
        .action(ArgAction::SetTrue)
        .help("Download full file information")
}

pub fn force_parameter() -> Arg {
    Arg::new(PARAMETER_FORCE)
        .long(PARAMETER_FORCE)
        .action(ArgAction::SetTrue)
        .help("Overwrite an existing configuration file")
}
