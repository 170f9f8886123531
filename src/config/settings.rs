use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::Paths;
use crate::api::{Credentials, DEFAULT_TIMEOUT};
use crate::error::{Result, TcatError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TCAT deployment to connect to
    #[serde(default)]
    pub instance: InstanceConfig,

    /// HTTP client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Connection settings for a TCAT deployment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Base URL of the deployment (the API lives under `<url>/api/`)
    pub url: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let paths = Paths::new()?;
        Self::load_from(&paths)
    }

    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        if config.client.timeout_secs == 0 {
            return Err(TcatError::Config(format!(
                "client.timeout_secs must be at least 1 in {}",
                paths.config_file.display()
            )));
        }
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let paths = Paths::new()?;
        self.save_to(&paths)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        // The file holds the instance password
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }

    /// Get the instance URL or return an error with instructions
    pub fn require_url(&self) -> Result<&str> {
        self.instance.url.as_deref().ok_or_else(|| {
            TcatError::config_missing(
                "TCAT URL not configured. Run 'tcat config init' or pass --url.",
            )
        })
    }

    /// Get the credentials or return an error with instructions
    pub fn require_credentials(&self) -> Result<Credentials> {
        match (&self.instance.username, &self.instance.password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            _ => Err(TcatError::config_missing(
                "TCAT credentials not configured. Run 'tcat config init' or pass --username/--password.",
            )),
        }
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.client.timeout_secs)
    }

    /// Apply command line or environment overrides on top of the file values
    pub fn apply_overrides(
        &mut self,
        url: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) {
        if let Some(url) = url {
            self.instance.url = Some(url.to_string());
        }
        if let Some(username) = username {
            self.instance.username = Some(username.to_string());
        }
        if let Some(password) = password {
            self.instance.password = Some(password.to_string());
        }
    }

    /// Set a value by its dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "instance.url" => self.instance.url = Some(value.to_string()),
            "instance.username" => self.instance.username = Some(value.to_string()),
            "instance.password" => self.instance.password = Some(value.to_string()),
            "client.timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| {
                    TcatError::InvalidArgument(
                        "client.timeout_secs must be a whole number of seconds".to_string(),
                    )
                })?;
                if secs == 0 {
                    return Err(TcatError::InvalidArgument(
                        "client.timeout_secs must be at least 1".to_string(),
                    ));
                }
                self.client.timeout_secs = secs;
            }
            "output.format" => {
                if value != "pretty" && value != "json" {
                    return Err(TcatError::InvalidArgument(
                        "output.format must be 'pretty' or 'json'".to_string(),
                    ));
                }
                self.output.format = value.to_string();
            }
            _ => {
                return Err(TcatError::InvalidArgument(format!(
                    "Unknown config key: {}. Valid keys: instance.url, instance.username, instance.password, client.timeout_secs, output.format",
                    key
                )));
            }
        }
        Ok(())
    }
}
