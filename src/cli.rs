use std::path::{Path, PathBuf};

use clap::ArgMatches;
use restcli::{
    actions::{
        call::{call_endpoint, list_endpoints, CallOptions},
        config::{
            configuration_path, init_configuration, load_configuration, print_configuration_path,
            show_configuration,
        },
        download::{download_file, DownloadOptions},
    },
    commands::params::{
        COMMAND_CONFIG, COMMAND_DOWNLOAD_FILE, COMMAND_INIT, COMMAND_PATH, COMMAND_SHOW,
        PARAMETER_CONFIG_FILE, PARAMETER_FORCE, PARAMETER_VERBOSE,
    },
    endpoints::EndpointRegistry,
    error::CliError,
};
use tracing::trace;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    let message = match sub_matches.subcommand() {
        Some(m) => m.0,
        None => "unknown",
    };

    message.to_string()
}

fn config_file(matches: &ArgMatches) -> Option<&Path> {
    matches
        .get_one::<PathBuf>(PARAMETER_CONFIG_FILE)
        .map(PathBuf::as_path)
}

/// True when `--verbose` was given at any level of the command line
pub fn verbose_requested(matches: &ArgMatches) -> bool {
    matches.get_flag(PARAMETER_VERBOSE)
        || matches
            .subcommand()
            .is_some_and(|(_, sub_matches)| verbose_requested(sub_matches))
}

pub async fn execute_command(matches: ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_DOWNLOAD_FILE, sub_matches)) => {
            trace!("Command: {}", COMMAND_DOWNLOAD_FILE);
            let options = DownloadOptions::from_args(sub_matches)?;
            let configuration = load_configuration(config_file(sub_matches))?;
            download_file(&configuration, &options).await
        }
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_PATH, sub_matches)) => {
                print_configuration_path(config_file(sub_matches))
            }
            Some((COMMAND_SHOW, sub_matches)) => {
                let configuration = load_configuration(config_file(sub_matches))?;
                show_configuration(&configuration)
            }
            Some((COMMAND_INIT, sub_matches)) => {
                let path = configuration_path(config_file(sub_matches))?;
                init_configuration(&path, sub_matches.get_flag(PARAMETER_FORCE))
            }
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((name, _)) => Err(CliError::UnsupportedSubcommand(name.to_string())),
        None => {
            let registry = EndpointRegistry::builtin();
            let options = CallOptions::from_args(&matches);
            if options.list {
                return list_endpoints(&registry);
            }

            let configuration = load_configuration(config_file(&matches))?;
            call_endpoint(&configuration, &registry, &options).await
        }
    }
}
