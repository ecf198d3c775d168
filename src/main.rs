use restcli::{commands::cli_command, exit_codes::AppExitCode};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{execute_command, verbose_requested};

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = match cli_command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // help and version requests end up here too
            let _ = e.print();
            let code = if e.use_stderr() {
                AppExitCode::Failure
            } else {
                AppExitCode::Success
            };
            std::process::exit(code.code());
        }
    };

    let verbose = verbose_requested(&matches);

    // Initialize the logging subsystem
    let filter = if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("restcli=debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(matches).await {
        eprintln!("Error: {}", e);
        if verbose {
            eprintln!("Details: {:?}", e);
        }
        std::process::exit(e.exit_code().code());
    }
}
