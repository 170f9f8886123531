use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

use super::types::ORIGINAL_REQUEST_KEY;
use crate::error::{Result, TcatError};

const USER_AGENT: &str = concat!("tcat/", env!("CARGO_PKG_VERSION"));

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Username and password for HTTP basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// Build the API endpoint (`<url>/api/`) for a TCAT deployment
pub fn api_endpoint(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{trimmed}/api/"))
        .map_err(|e| TcatError::InvalidArgument(format!("Invalid TCAT URL '{base_url}': {e}")))
}

/// Blocking HTTP transport for the TCAT API
pub struct TcatClient {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl TcatClient {
    /// Create a new client for the deployment at `base_url`
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Self::with_timeout(base_url, credentials, DEFAULT_TIMEOUT)
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let endpoint = api_endpoint(base_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    /// The API root this client talks to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Make an authenticated GET request, failing on any non-2xx status
    fn get(&self, url: Url) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(TcatError::api(status.as_u16(), message));
        }

        Ok(response)
    }

    /// Check connectivity and credentials against the API root
    pub fn handshake(&self) -> Result<()> {
        self.get(self.endpoint.clone())?;
        Ok(())
    }

    /// Resolve `<endpoint><action>[/<param>]`, encoding `param` as one segment
    pub fn action_url(&self, action: &str, param: Option<&str>) -> Result<Url> {
        let mut url = self
            .endpoint
            .join(action)
            .map_err(|e| TcatError::InvalidArgument(format!("Invalid API action '{action}': {e}")))?;

        if let Some(param) = param.filter(|p| !p.is_empty()) {
            url.path_segments_mut()
                .map_err(|_| TcatError::InvalidArgument(format!("Cannot append to URL for action '{action}'")))?
                .push(param);
        }

        Ok(url)
    }

    /// Query an API action and return its JSON object without the request echo
    pub fn query(&self, action: &str, param: Option<&str>) -> Result<Map<String, Value>> {
        let url = self.action_url(action, param)?;
        let body = self.get(url)?.text()?;
        parse_response(&body)
    }
}

/// Decode a response object, dropping the request echo and keeping key order
fn parse_response(body: &str) -> Result<Map<String, Value>> {
    let mut data: Map<String, Value> = serde_json::from_str(body)?;
    data.shift_remove(ORIGINAL_REQUEST_KEY);
    Ok(data)
}
