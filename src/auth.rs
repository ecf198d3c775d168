//! Login and token caching.
//!
//! The [`Authenticator`] performs the login call once, extracts the token and
//! keeps it in memory until [`Authenticator::clear_cache`] is called. Callers
//! that ask for a token while a login is in flight wait for that same login
//! and receive its outcome.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::client::{ApiClient, ApiRequest, ClientError};
use crate::configuration::Configuration;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication failed: {0}")]
    LoginFailed(#[from] ClientError),
    #[error("Authentication failed: login response is not valid JSON: {0}")]
    InvalidResponse(String),
    #[error("Authentication failed: could not find token in authentication response. Expected 'token', 'accessToken', or 'data.token' field.")]
    MissingToken,
    #[error("Authentication failed: field '{0}' does not hold a string token")]
    InvalidToken(&'static str),
    #[error("Authentication failed: authentication token is empty")]
    EmptyToken,
}

/// Username and password sent to the login endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Where a token may live inside a login response
#[derive(Debug, Clone, Copy)]
struct TokenRule {
    field: &'static str,
    pointer: &'static str,
}

/// Tried in order; the first field present in the response wins.
const TOKEN_RULES: [TokenRule; 3] = [
    TokenRule {
        field: "token",
        pointer: "/token",
    },
    TokenRule {
        field: "accessToken",
        pointer: "/accessToken",
    },
    TokenRule {
        field: "data.token",
        pointer: "/data/token",
    },
];

/// Extract the token from a login response body.
///
/// # Errors
///
/// * `AuthError::InvalidResponse` - the body is not JSON
/// * `AuthError::MissingToken` - none of the known fields is present
/// * `AuthError::InvalidToken` - the matching field is not a string
/// * `AuthError::EmptyToken` - the matching field is null or empty
pub fn extract_token(body: &str) -> Result<String, AuthError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

    let (rule, value) = TOKEN_RULES
        .iter()
        .find_map(|rule| document.pointer(rule.pointer).map(|value| (rule, value)))
        .ok_or(AuthError::MissingToken)?;

    trace!("Token found in field \"{}\"", rule.field);

    match value {
        Value::Null => Err(AuthError::EmptyToken),
        Value::String(token) if token.is_empty() => Err(AuthError::EmptyToken),
        Value::String(token) => Ok(token.clone()),
        _ => Err(AuthError::InvalidToken(rule.field)),
    }
}

type LoginFlight = Shared<BoxFuture<'static, Result<String, AuthError>>>;

enum TokenState {
    Unauthenticated,
    LoginPending(LoginFlight),
    Authenticated(String),
}

/// Obtains and caches the API token for the lifetime of the process
pub struct Authenticator {
    client: ApiClient,
    login_endpoint: String,
    credentials: LoginCredentials,
    state: Mutex<TokenState>,
}

impl Authenticator {
    pub fn new(
        client: ApiClient,
        login_endpoint: impl Into<String>,
        credentials: LoginCredentials,
    ) -> Self {
        Self {
            client,
            login_endpoint: login_endpoint.into(),
            credentials,
            state: Mutex::new(TokenState::Unauthenticated),
        }
    }

    pub fn from_configuration(client: ApiClient, configuration: &Configuration) -> Self {
        let credentials = LoginCredentials::new(
            configuration.api().login.clone(),
            configuration.api().password.clone(),
        );
        Self::new(
            client,
            configuration.authentication().login_endpoint.clone(),
            credentials,
        )
    }

    /// The cached token, logging in first when there is none.
    ///
    /// At most one login request is in flight at any time. A failed login
    /// leaves nothing cached, so the call can simply be repeated.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let flight = {
            let mut state = self.lock_state();
            match &*state {
                TokenState::Authenticated(token) => return Ok(token.clone()),
                TokenState::LoginPending(flight) => {
                    trace!("Waiting for the login already in flight");
                    flight.clone()
                }
                TokenState::Unauthenticated => {
                    let flight = self.start_login();
                    *state = TokenState::LoginPending(flight.clone());
                    flight
                }
            }
        };

        let outcome = flight.clone().await;

        let mut state = self.lock_state();
        // a clear_cache() during the login wins over its outcome
        if let TokenState::LoginPending(current) = &*state {
            if current.ptr_eq(&flight) {
                *state = match &outcome {
                    Ok(token) => TokenState::Authenticated(token.clone()),
                    Err(_) => TokenState::Unauthenticated,
                };
            }
        }

        outcome
    }

    /// Forget the cached token
    pub fn clear_cache(&self) {
        trace!("Clearing cached token");
        *self.lock_state() = TokenState::Unauthenticated;
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.lock_state(), TokenState::Authenticated(_))
    }

    fn lock_state(&self) -> MutexGuard<'_, TokenState> {
        // every TokenState value is valid, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_login(&self) -> LoginFlight {
        let client = self.client.clone();
        let endpoint = self.login_endpoint.clone();
        let credentials = self.credentials.clone();

        async move { login(&client, &endpoint, &credentials).await }
            .boxed()
            .shared()
    }
}

async fn login(
    client: &ApiClient,
    endpoint: &str,
    credentials: &LoginCredentials,
) -> Result<String, AuthError> {
    debug!(
        "Authenticating as \"{}\" with {}",
        credentials.username,
        client.url(endpoint)
    );

    let body = serde_json::json!({
        "username": credentials.username,
        "password": credentials.password,
    });
    let request = ApiRequest::new(endpoint)
        .method("POST")
        .body(body.to_string());

    let response = client.fetch(&request).await?;
    let token = extract_token(&response)?;

    debug!("Authentication successful, received token");
    Ok(token)
}
