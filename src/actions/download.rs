use std::path::PathBuf;

use clap::ArgMatches;
use tracing::debug;

use crate::{
    actions::output::emit,
    auth::Authenticator,
    client::{ApiClient, ApiRequest, ClientConfig},
    commands::params::{PARAMETER_FILE_ID, PARAMETER_FULL, PARAMETER_OUTPUT, PARAMETER_VERBOSE},
    configuration::Configuration,
    error::CliError,
};

const FILE_PATH_TEMPLATE: &str = "files/{fileId}";
const FULL_FILE_PATH_TEMPLATE: &str = "files/{fileId}/full";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    pub file_id: String,
    pub full: bool,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl DownloadOptions {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            full: false,
            output: None,
            verbose: false,
        }
    }

    pub fn from_args(matches: &ArgMatches) -> Result<Self, CliError> {
        let file_id = matches
            .get_one::<String>(PARAMETER_FILE_ID)
            .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_FILE_ID.to_string()))?;

        Ok(Self {
            file_id: file_id.clone(),
            full: matches.get_flag(PARAMETER_FULL),
            output: matches.get_one::<PathBuf>(PARAMETER_OUTPUT).cloned(),
            verbose: matches.get_flag(PARAMETER_VERBOSE),
        })
    }
}

pub fn file_path_template(full: bool) -> &'static str {
    if full {
        FULL_FILE_PATH_TEMPLATE
    } else {
        FILE_PATH_TEMPLATE
    }
}

/// Log in (or reuse the cached token) and fetch the file contents.
///
/// No file request is sent when authentication fails.
pub async fn fetch_file(
    client: &ApiClient,
    authenticator: &Authenticator,
    options: &DownloadOptions,
) -> Result<String, CliError> {
    debug!("Authenticating...");
    let token = authenticator.get_token().await?;
    debug!("Authentication successful");

    let request = ApiRequest::new(file_path_template(options.full))
        .parameter("fileId", options.file_id.as_str())
        .bearer(token);

    debug!("Downloading {}", request.path());
    Ok(client.fetch(&request).await?)
}

pub async fn download_file(
    configuration: &Configuration,
    options: &DownloadOptions,
) -> Result<(), CliError> {
    debug!("Starting download-file command (file ID: {})", options.file_id);

    configuration.require_base_address()?;
    let config = ClientConfig::from_configuration(configuration).with_verbose(options.verbose);
    let client = ApiClient::new(config)?;
    let authenticator = Authenticator::from_configuration(client.clone(), configuration);

    let content = fetch_file(&client, &authenticator, options).await?;
    emit(&content, options.output.as_deref()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::client::ClientError;
    use crate::configuration::{ApiSettings, AuthenticationSettings, ConfigurationError};
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn configuration_for(server: &MockServer) -> Configuration {
        Configuration::new(
            ApiSettings {
                base_address: server.uri(),
                login: "alice".to_string(),
                password: "secret".to_string(),
                timeout_seconds: 5,
            },
            AuthenticationSettings::default(),
        )
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({"username": "alice", "password": "secret"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc123"})),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_file_path_template() {
        assert_eq!(file_path_template(false), "files/{fileId}");
        assert_eq!(file_path_template(true), "files/{fileId}/full");
    }

    #[tokio::test]
    async fn test_fetch_file_sends_token() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/files/42"))
            .and(header("Authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("contents of 42"))
            .expect(1)
            .mount(&server)
            .await;

        let configuration = configuration_for(&server);
        let client = ApiClient::new(ClientConfig::from_configuration(&configuration)).unwrap();
        let authenticator = Authenticator::from_configuration(client.clone(), &configuration);

        let content = fetch_file(&client, &authenticator, &DownloadOptions::new("42"))
            .await
            .unwrap();
        assert_eq!(content, "contents of 42");
    }

    #[tokio::test]
    async fn test_fetch_full_file_reuses_token() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/files/7/full"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":7}"))
            .expect(2)
            .mount(&server)
            .await;

        let configuration = configuration_for(&server);
        let client = ApiClient::new(ClientConfig::from_configuration(&configuration)).unwrap();
        let authenticator = Authenticator::from_configuration(client.clone(), &configuration);
        let options = DownloadOptions {
            full: true,
            ..DownloadOptions::new("7")
        };

        fetch_file(&client, &authenticator, &options).await.unwrap();
        let content = fetch_file(&client, &authenticator, &options).await.unwrap();
        assert_eq!(content, "{\"id\":7}");
    }

    #[tokio::test]
    async fn test_fetch_file_reports_status() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/files/404"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such file"))
            .mount(&server)
            .await;

        let configuration = configuration_for(&server);
        let client = ApiClient::new(ClientConfig::from_configuration(&configuration)).unwrap();
        let authenticator = Authenticator::from_configuration(client.clone(), &configuration);

        let error = fetch_file(&client, &authenticator, &DownloadOptions::new("404"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            CliError::RequestError(ClientError::Request { status: 404, ref body }) if body == "no such file"
        ));
    }

    #[tokio::test]
    async fn test_fetch_file_stops_when_login_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let configuration = configuration_for(&server);
        let client = ApiClient::new(ClientConfig::from_configuration(&configuration)).unwrap();
        let authenticator = Authenticator::from_configuration(client.clone(), &configuration);

        let error = fetch_file(&client, &authenticator, &DownloadOptions::new("1"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            CliError::AuthenticationError(AuthError::LoginFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_download_file_writes_output() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/files/42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("saved contents"))
            .mount(&server)
            .await;

        let directory = TempDir::new().unwrap();
        let output = directory.path().join("file-42.txt");
        let options = DownloadOptions {
            output: Some(output.clone()),
            ..DownloadOptions::new("42")
        };

        download_file(&configuration_for(&server), &options)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "saved contents");
    }

    #[tokio::test]
    async fn test_download_file_requires_base_address() {
        let error = download_file(&Configuration::default(), &DownloadOptions::new("42"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            CliError::ConfigurationError(ConfigurationError::MissingRequiredPropertyValue { .. })
        ));
    }
}
