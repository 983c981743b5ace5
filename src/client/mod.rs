//! Lookup service clients.
//!
//! The validator talks to the carrier lookup service through the [`LookupClient`]
//! trait. [`HttpLookupClient`] is the production implementation: a synchronous
//! `ureq` client that callers in async contexts should drive through
//! `tokio::task::spawn_blocking` (see [`crate::validator::AsyncPhoneNumberValidator`]).
//!
//! The `legacy` submodule adapts transports that hand back raw JSON payloads.

mod legacy;
pub use legacy::{LegacyPayloadAdapter, RawLookupTransport};

use crate::config::Config;
use crate::error::{LookupError, LookupResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{LookupErrorBody, PhoneNumberLookup};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;

/// Lookup type requesting carrier enrichment.
pub const CARRIER_LOOKUP_TYPE: &str = "carrier";

/// Options sent along with a lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    /// Enrichment types to request; always includes `carrier`
    pub types: Vec<String>,

    /// Country hint for numbers in national format
    pub country_code: Option<String>,
}

impl LookupOptions {
    /// Options requesting carrier enrichment and nothing else.
    pub fn carrier() -> Self {
        Self {
            types: vec![CARRIER_LOOKUP_TYPE.to_string()],
            country_code: None,
        }
    }

    /// Add a country hint.
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// Query parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs: Vec<(&'static str, &str)> =
            self.types.iter().map(|t| ("Type", t.as_str())).collect();
        if let Some(country_code) = &self.country_code {
            pairs.push(("CountryCode", country_code.as_str()));
        }
        pairs
    }
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self::carrier()
    }
}

/// Capability to ask the lookup service whether a phone number resolves.
///
/// Implementations must be safe to call from several threads at once; the
/// validator shares a single client across every call.
pub trait LookupClient: Send + Sync {
    /// Look up `number`. A number the service does not know yields an error
    /// for which [`LookupError::is_lookup_failure`] is true.
    fn lookup_phone_number(
        &self,
        number: &str,
        options: &LookupOptions,
    ) -> LookupResult<PhoneNumberLookup>;

    /// Whether the client forwards country hints to the service.
    fn supports_country_code(&self) -> bool {
        true
    }
}

/// HTTP client for the carrier lookup REST API.
///
/// Uses `ureq` for synchronous requests. The underlying agent keeps a
/// connection pool and is shared between clones.
#[derive(Clone)]
pub struct HttpLookupClient {
    /// Base URL for the lookup API
    base_url: String,

    /// Precomputed `Authorization` header value
    auth_header: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl HttpLookupClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.lookup_api_url.clone(),
            &config.account_sid,
            &config.auth_token,
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, account_sid: &str, auth_token: &str) -> Self {
        Self::build(base_url, account_sid, auth_token, Duration::from_secs(10))
    }

    fn build(base_url: String, account_sid: &str, auth_token: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let credentials = STANDARD.encode(format!("{}:{}", account_sid, auth_token));

        Self {
            base_url,
            auth_header: format!("Basic {}", credentials),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build the resource URL for a number.
    fn build_url(&self, number: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/v1/PhoneNumbers/{}", base, urlencoding::encode(number))
    }

    /// Execute the lookup GET request with authentication.
    fn get(&self, number: &str, options: &LookupOptions) -> Result<ureq::Response, ureq::Error> {
        let url = self.build_url(number);
        tracing::debug!("GET {} {:?}", url, options.query_pairs());

        let mut request = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth_header)
            .set("Accept", "application/json");
        for (key, value) in options.query_pairs() {
            request = request.query(key, value);
        }

        request.call()
    }

    /// Map a ureq error to a LookupError.
    fn map_error(&self, error: ureq::Error) -> LookupError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let message = Self::error_message(&body);

                match code {
                    400 => LookupError::InvalidRequest(message),
                    401 => LookupError::Unauthorized,
                    404 => LookupError::NotFound(message),
                    429 => LookupError::RateLimitExceeded,
                    _ => LookupError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    LookupError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    LookupError::Timeout
                } else {
                    LookupError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Prefer the `message` field of a JSON error document over the raw body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<LookupErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .unwrap_or_else(|| body.to_string())
    }
}

impl LookupClient for HttpLookupClient {
    fn lookup_phone_number(
        &self,
        number: &str,
        options: &LookupOptions,
    ) -> LookupResult<PhoneNumberLookup> {
        let timer = HttpTimer::new(self.metrics.clone());

        let response = match self.get(number, options) {
            Ok(response) => response,
            Err(e) => {
                let err = self.map_error(e);
                if err.is_lookup_failure() {
                    timer.complete();
                    self.metrics.record_unresolved();
                    tracing::debug!("Lookup for {} did not resolve: {}", number, err);
                } else {
                    timer.complete_with_error();
                    tracing::error!("Lookup for {} failed: {:?}", number, err);
                }
                return Err(err);
            }
        };

        let body = response.into_string();
        timer.complete();
        let body = body.map_err(|e| {
            self.metrics.record_lookup_error();
            LookupError::HttpError(e.to_string())
        })?;

        let lookup: PhoneNumberLookup = serde_json::from_str(&body).map_err(|e| {
            self.metrics.record_lookup_error();
            LookupError::JsonError(e)
        })?;

        self.metrics.record_resolved();
        tracing::debug!(
            "Lookup for {} resolved to {} ({:?})",
            number,
            lookup.phone_number,
            lookup.country_code
        );
        Ok(lookup)
    }
}

impl RawLookupTransport for HttpLookupClient {
    /// Returns the response body for any HTTP status; only transport
    /// failures are errors.
    fn fetch_raw(&self, number: &str, options: &LookupOptions) -> LookupResult<String> {
        let timer = HttpTimer::new(self.metrics.clone());

        let response = match self.get(number, options) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!("Raw lookup for {} returned status {}", number, code);
                response
            }
            Err(e) => {
                timer.complete_with_error();
                let err = self.map_error(e);
                tracing::error!("Raw lookup for {} failed: {:?}", number, err);
                return Err(err);
            }
        };
        timer.complete();

        response
            .into_string()
            .map_err(|e| LookupError::HttpError(e.to_string()))
    }
}
