use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_APPLICATION_ID: &str = "restcli";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENV: &str = "RESTCLI_CONFIG_DIR";

pub const DEFAULT_LOGIN_ENDPOINT: &str = "auth/login";
pub const DEFAULT_TOKEN_HEADER_NAME: &str = "Authorization";
pub const DEFAULT_TOKEN_PREFIX: &str = "Bearer";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const MASKED_VALUE: &str = "********";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data from {path:?}, because of: {cause}")]
    FailedToLoadData {
        path: PathBuf,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to write configuration data to file, because of: {cause}")]
    FailedToWriteData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
}

/// Connection and credential settings for the target API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_address: String,
    pub login: String,
    pub password: String,
    pub timeout_seconds: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_address: String::new(),
            login: String::new(),
            password: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// How the login call is made and how its token is presented afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticationSettings {
    pub login_endpoint: String,
    pub token_header_name: String,
    pub token_prefix: String,
}

impl Default for AuthenticationSettings {
    fn default() -> Self {
        Self {
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_string(),
            token_header_name: DEFAULT_TOKEN_HEADER_NAME.to_string(),
            token_prefix: DEFAULT_TOKEN_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    api: ApiSettings,
    authentication: AuthenticationSettings,
}

impl Configuration {
    pub fn new(api: ApiSettings, authentication: AuthenticationSettings) -> Self {
        Self {
            api,
            authentication,
        }
    }

    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub fn authentication(&self) -> &AuthenticationSettings {
        &self.authentication
    }

    /// The configured base address, or an error when none was set
    pub fn require_base_address(&self) -> Result<&str, ConfigurationError> {
        let base_address = self.api.base_address.trim();
        if base_address.is_empty() {
            Err(ConfigurationError::MissingRequiredPropertyValue {
                name: "api.base_address".to_string(),
            })
        } else {
            Ok(base_address)
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(configuration_directory) => {
                let mut default_config_file_path = configuration_directory;
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);

                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Load the default configuration file, falling back to built-in defaults
    /// when the file does not exist yet
    pub fn load_or_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!(
            "Loading configuration from {}...",
            default_file_path.display()
        );

        if !default_file_path.exists() {
            debug!("Configuration file not found, using default configuration");
            return Ok(Configuration::default());
        }

        Configuration::load_from_file(&default_file_path)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let content =
            fs::read_to_string(path).map_err(|cause| ConfigurationError::FailedToLoadData {
                path: path.to_path_buf(),
                cause: Box::new(cause),
            })?;

        serde_yaml::from_str(&content).map_err(|cause| ConfigurationError::FailedToLoadData {
            path: path.to_path_buf(),
            cause: Box::new(cause),
        })
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), ConfigurationError> {
        serde_yaml::to_writer(writer, self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        // first check if the parent directory exists and try to create it if not
        match path.parent() {
            Some(directory) => {
                fs::create_dir_all(directory)
                    .map_err(|_| ConfigurationError::FailedToFindConfigurationDirectory)?;
            }
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        let file = File::create(path)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })?;
        self.write(file)
    }

    /// A copy that is safe to print: the password is masked
    pub fn redacted(&self) -> Configuration {
        let mut copy = self.clone();
        if !copy.api.password.is_empty() {
            copy.api.password = MASKED_VALUE.to_string();
        }
        copy
    }

    /// YAML representation of the configuration
    pub fn to_yaml(&self) -> Result<String, ConfigurationError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }
}
