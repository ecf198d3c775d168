use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{configuration::Configuration, error::CliError};

/// The explicitly selected configuration file, or the default location
pub fn configuration_path(explicit: Option<&Path>) -> Result<PathBuf, CliError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Configuration::get_default_configuration_file_path()?),
    }
}

/// Load the explicitly selected file, or the default one when it exists.
pub fn load_configuration(explicit: Option<&Path>) -> Result<Configuration, CliError> {
    let configuration = match explicit {
        Some(path) => Configuration::load_from_file(path)?,
        None => Configuration::load_or_default()?,
    };
    Ok(configuration)
}

pub fn print_configuration_path(explicit: Option<&Path>) -> Result<(), CliError> {
    println!("{}", configuration_path(explicit)?.display());
    Ok(())
}

pub fn show_configuration(configuration: &Configuration) -> Result<(), CliError> {
    print!("{}", configuration.redacted().to_yaml()?);
    Ok(())
}

/// Write a configuration file holding the default values.
///
/// An existing file is only replaced when `force` is set.
pub fn init_configuration(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::ConfigurationExists(path.to_path_buf()));
    }

    debug!("Writing default configuration to {}", path.display());
    Configuration::default().save(path)?;
    println!("Configuration written to: {}", path.display());
    Ok(())
}
