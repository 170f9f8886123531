use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, debug_span, Span};
use url::Url;

use super::client::{Credentials, TcatClient, DEFAULT_TIMEOUT};
use super::types::{ExportFormat, QueryBin};
use crate::cache::{CacheMap, Cached};
use crate::config::Config;
use crate::error::{Result, TcatError};

/// API action listing and describing query bins
const QUERYBIN_ACTION: &str = "querybin.php";

/// Options for connecting to a TCAT instance
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Fetch every bin's metadata right after the handshake
    pub load_bins: bool,
    /// Per-request timeout
    pub timeout: Duration,
    /// Span that all of the instance's trace events are recorded in
    pub span: Option<Span>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            load_bins: false,
            timeout: DEFAULT_TIMEOUT,
            span: None,
        }
    }
}

/// A handle on one TCAT deployment, caching the bins it has fetched
pub struct Tcat {
    client: TcatClient,
    span: Span,
    bin_names: Cached<Vec<String>>,
    bins: CacheMap<String, QueryBin>,
}

impl Tcat {
    /// Connect to the TCAT instance at `url`, performing the handshake
    pub fn new(url: &str, credentials: Credentials, load_bins: bool) -> Result<Self> {
        Self::connect(
            url,
            credentials,
            ConnectOptions {
                load_bins,
                ..ConnectOptions::default()
            },
        )
    }

    /// Connect with explicit options
    pub fn connect(url: &str, credentials: Credentials, options: ConnectOptions) -> Result<Self> {
        let client = TcatClient::with_timeout(url, credentials, options.timeout)?;
        let span = options
            .span
            .unwrap_or_else(|| debug_span!("tcat", endpoint = %client.endpoint()));

        let mut tcat = Self {
            client,
            span,
            bin_names: Cached::new(),
            bins: CacheMap::new(),
        };

        tcat.handshake()?;
        if options.load_bins {
            tcat.load_all_bins(false)?;
        }

        Ok(tcat)
    }

    /// Connect using the instance settings from a configuration file
    pub fn from_config(config: &Config, load_bins: bool) -> Result<Self> {
        let url = config.require_url()?;
        let credentials = config.require_credentials()?;

        Self::connect(
            url,
            credentials,
            ConnectOptions {
                load_bins,
                timeout: config.timeout(),
                span: None,
            },
        )
    }

    /// The `<url>/api/` endpoint of this instance
    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    /// Check connectivity and credentials
    pub fn handshake(&self) -> Result<()> {
        let _guard = self.span.enter();
        debug!("handshake");
        self.client.handshake()
    }

    /// Names of the bins on this instance
    ///
    /// The list is fetched once and served from cache afterwards; `reload`
    /// forces a new listing. Names keep the order the server sent them in.
    pub fn bins(&mut self, reload: bool) -> Result<&[String]> {
        let _guard = self.span.enter();
        let client = &self.client;

        let names = self.bin_names.get_or_load(reload, || {
            debug!("refreshing bin names");
            let data = client.query(QUERYBIN_ACTION, None)?;
            data.into_iter()
                .map(|(key, value)| match value {
                    Value::String(name) => Ok(name),
                    other => Err(TcatError::invalid_field(
                        key,
                        format!("expected a bin name, got {other}"),
                    )),
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(names.as_slice())
    }

    /// Metadata for one bin, fetched on first access
    ///
    /// With `reload` the cached record is evicted before refetching, so a
    /// failed reload leaves no record cached for `name`.
    pub fn get_bin(&mut self, name: &str, reload: bool) -> Result<&QueryBin> {
        let _guard = self.span.enter();
        let client = &self.client;

        self.bins.get_or_load(name.to_string(), reload, |name| {
            debug!(bin = %name, "fetching bin");
            let data = client.query(QUERYBIN_ACTION, Some(name.as_str()))?;
            QueryBin::from_fields(&data)
        })
    }

    /// Re-run the handshake, then fetch and cache every bin
    pub fn load_all_bins(&mut self, reload: bool) -> Result<()> {
        self.handshake()?;

        let names = self.bins(reload)?.to_vec();
        for name in &names {
            self.get_bin(name, reload)?;
        }

        let _guard = self.span.enter();
        debug!(count = names.len(), "loaded all bins");
        Ok(())
    }

    /// Whether `name` currently has a cached record
    pub fn is_bin_cached(&self, name: &str) -> bool {
        self.bins.contains(name)
    }

    /// Records currently held in the cache, in no particular order
    pub fn cached_bins(&self) -> impl Iterator<Item = &QueryBin> {
        self.bins.values()
    }

    /// Count the tweets captured in a bin between two instants
    pub fn count_tweets(
        &self,
        _bin: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<u64> {
        Err(TcatError::NotImplemented("count_tweets"))
    }

    /// Export the tweets of a bin between two instants
    pub fn export_tweets(
        &self,
        _bin: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _format: ExportFormat,
    ) -> Result<String> {
        Err(TcatError::NotImplemented("export_tweets"))
    }

    /// Delete the tweets of a bin between two instants
    pub fn purge_tweets(
        &self,
        _bin: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<()> {
        Err(TcatError::NotImplemented("purge_tweets"))
    }
}

impl std::fmt::Debug for Tcat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tcat")
            .field("endpoint", &self.client.endpoint().as_str())
            .field("cached_bins", &self.bins.len())
            .finish()
    }
}
