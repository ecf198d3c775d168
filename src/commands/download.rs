//! File download command definition.

use crate::commands::params::{
    file_id_parameter, full_parameter, output_file_parameter, COMMAND_DOWNLOAD_FILE,
};
use clap::Command;

pub fn download_file_command() -> Command {
    Command::new(COMMAND_DOWNLOAD_FILE)
        .about("Download a file from the API")
        .arg(file_id_parameter())
        .arg(full_parameter())
        .arg(output_file_parameter())
}
