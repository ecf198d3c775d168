//! Generic "call any named endpoint" flow.

use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;
use tracing::{debug, trace};

use crate::{
    actions::output::emit,
    client::{parse_headers, ApiClient, ApiRequest, ClientConfig, FormattedResponse, RequestParameters},
    commands::params::{
        PARAMETER_BASE, PARAMETER_BODY, PARAMETER_ENDPOINT, PARAMETER_HEADER, PARAMETER_LIST,
        PARAMETER_METHOD, PARAMETER_OUTPUT, PARAMETER_PARAM, PARAMETER_TIMEOUT, PARAMETER_VERBOSE,
    },
    configuration::Configuration,
    endpoints::EndpointRegistry,
    error::CliError,
};

/// Everything the generic call flow reads from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct CallOptions {
    pub endpoint: Option<String>,
    pub base_address: Option<String>,
    pub method: String,
    /// Raw `key=value` strings
    pub parameters: Vec<String>,
    /// Raw `Key:Value` strings
    pub headers: Vec<String>,
    pub body: Option<String>,
    pub timeout: Option<u64>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub list: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            endpoint: None,
            base_address: None,
            method: "GET".to_string(),
            parameters: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: None,
            output: None,
            verbose: false,
            list: false,
        }
    }
}

impl CallOptions {
    pub fn from_args(matches: &ArgMatches) -> Self {
        let strings = |id: &str| -> Vec<String> {
            matches
                .get_many::<String>(id)
                .map(|values| values.cloned().collect())
                .unwrap_or_default()
        };

        Self {
            endpoint: matches.get_one::<String>(PARAMETER_ENDPOINT).cloned(),
            base_address: matches.get_one::<String>(PARAMETER_BASE).cloned(),
            method: matches
                .get_one::<String>(PARAMETER_METHOD)
                .cloned()
                .unwrap_or_else(|| "GET".to_string()),
            parameters: strings(PARAMETER_PARAM),
            headers: strings(PARAMETER_HEADER),
            body: matches.get_one::<String>(PARAMETER_BODY).cloned(),
            timeout: matches.get_one::<u64>(PARAMETER_TIMEOUT).copied(),
            output: matches.get_one::<PathBuf>(PARAMETER_OUTPUT).cloned(),
            verbose: matches.get_flag(PARAMETER_VERBOSE),
            list: matches.get_flag(PARAMETER_LIST),
        }
    }
}

/// Parse `key=value` strings into request parameters.
///
/// The string is split on the first `=`; the key is trimmed, the value is
/// kept as given.
///
/// # Errors
///
/// * `CliError::InvalidParameter` - no `=` or an empty key
/// * `CliError::DuplicateParameter` - the same key given twice
pub fn parse_parameters<S: AsRef<str>>(raw_parameters: &[S]) -> Result<RequestParameters, CliError> {
    let mut parameters = RequestParameters::new();

    for raw in raw_parameters {
        let raw = raw.as_ref();
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| CliError::InvalidParameter(raw.to_string()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::InvalidParameter(raw.to_string()));
        }
        if parameters.insert(key.to_string(), value.to_string()).is_some() {
            return Err(CliError::DuplicateParameter(key.to_string()));
        }
    }

    Ok(parameters)
}

pub fn list_endpoints(registry: &EndpointRegistry) -> Result<(), CliError> {
    println!("{}", registry.render());
    Ok(())
}

/// Resolve, build and send the request; return the diagnostic report.
pub async fn perform_call(
    configuration: &Configuration,
    registry: &EndpointRegistry,
    options: &CallOptions,
) -> Result<FormattedResponse, CliError> {
    let base_address = match options.base_address.as_deref().map(str::trim) {
        Some(base_address) if !base_address.is_empty() => base_address.to_string(),
        _ => configuration
            .require_base_address()
            .map_err(|_| {
                CliError::MissingRequiredArgument(format!(
                    "--{} (or api.base_address in the configuration)",
                    PARAMETER_BASE
                ))
            })?
            .to_string(),
    };

    let endpoint = options
        .endpoint
        .as_deref()
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_ENDPOINT.to_string()))?;
    let template = registry.resolve(endpoint)?;
    trace!("Endpoint \"{}\" resolved to \"{}\"", endpoint, template);

    let parameters = parse_parameters(&options.parameters)?;
    let headers = parse_headers(&options.headers);

    let mut config = ClientConfig::from_configuration(configuration)
        .with_base_address(base_address)
        .with_verbose(options.verbose);
    if let Some(timeout) = options.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    let client = ApiClient::new(config)?;

    let mut request = ApiRequest::new(template)
        .method(options.method.as_str())
        .parameters(parameters)
        .headers(headers);
    if let Some(body) = &options.body {
        request = request.body(body.as_str());
    }

    debug!("Calling endpoint \"{}\" ({})", endpoint, request.path());
    Ok(client.call(&request).await?)
}

/// Run the generic call flow and print or save its report.
///
/// The report is emitted even for a non-success status, which is then
/// returned as `CliError::UnsuccessfulStatus`.
pub async fn call_endpoint(
    configuration: &Configuration,
    registry: &EndpointRegistry,
    options: &CallOptions,
) -> Result<(), CliError> {
    let response = perform_call(configuration, registry, options).await?;

    emit(&response.text, options.output.as_deref()).await?;

    if response.is_success() {
        Ok(())
    } else {
        Err(CliError::UnsuccessfulStatus {
            status: response.status,
        })
    }
}
