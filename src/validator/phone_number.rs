//! Phone number validation backed by the carrier lookup service.

use super::{MessageKey, MessageMode, ValidationResult, Validator};
use crate::client::{LookupClient, LookupOptions};
use crate::config::Config;
use crate::error::{ConfigError, ConfigResult, ValidatorError, ValidatorResult};
use std::fmt;
use std::sync::Arc;

/// Construction options for [`PhoneNumberValidator`].
#[derive(Clone)]
pub struct ValidatorOptions {
    /// Lookup client; required
    pub client: Option<Arc<dyn LookupClient>>,

    /// Country hint; blank is the same as unset
    pub country_code: Option<String>,

    /// Reject empty input without calling the service (default: true)
    pub short_circuit_empty: bool,

    /// How failure messages are keyed (default: country aware)
    pub message_mode: MessageMode,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self {
            client: None,
            country_code: None,
            short_circuit_empty: true,
            message_mode: MessageMode::default(),
        }
    }

    /// Options taking the country hint from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            country_code: config.country_code.clone(),
            ..Self::new()
        }
    }

    pub fn client(mut self, client: Arc<dyn LookupClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn short_circuit_empty(mut self, enabled: bool) -> Self {
        self.short_circuit_empty = enabled;
        self
    }

    pub fn message_mode(mut self, mode: MessageMode) -> Self {
        self.message_mode = mode;
        self
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorOptions")
            .field("client", &self.client.as_ref().map(|_| "<LookupClient>"))
            .field("country_code", &self.country_code)
            .field("short_circuit_empty", &self.short_circuit_empty)
            .field("message_mode", &self.message_mode)
            .finish()
    }
}

/// Validates phone numbers by asking the lookup service whether they resolve.
///
/// Each [`validate`](Validator::validate) issues at most one lookup. A number
/// the service does not know produces an invalid result with one message;
/// failing to reach the service produces [`ValidatorError::Transport`].
///
/// # Example
///
/// ```no_run
/// use phone_lookup_validator::{Config, HttpLookupClient, PhoneNumberValidator, Validator, ValidatorOptions};
/// use std::sync::Arc;
///
/// let config = Config::from_env()?;
/// let client = Arc::new(HttpLookupClient::new(&config));
/// let validator = PhoneNumberValidator::new(ValidatorOptions::new().client(client))?;
///
/// let result = validator.validate("+15108675310")?;
/// assert!(result.is_valid());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct PhoneNumberValidator {
    client: Arc<dyn LookupClient>,
    country_code: Option<String>,
    short_circuit_empty: bool,
    message_mode: MessageMode,
}

impl PhoneNumberValidator {
    /// Build a validator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingClient` if `options.client` is `None`.
    pub fn new(options: ValidatorOptions) -> ConfigResult<Self> {
        let client = options.client.ok_or(ConfigError::MissingClient)?;

        let country_code = options
            .country_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            client,
            country_code,
            short_circuit_empty: options.short_circuit_empty,
            message_mode: options.message_mode,
        })
    }

    /// The configured country hint, if any.
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn message_mode(&self) -> MessageMode {
        self.message_mode
    }

    /// Country hint that actually reaches the service.
    fn effective_country_code(&self) -> Option<&str> {
        if self.client.supports_country_code() {
            self.country_code()
        } else {
            None
        }
    }

    fn failure_key(&self) -> MessageKey {
        self.message_mode
            .key_for(self.effective_country_code().is_some())
    }

    fn lookup_options(&self) -> LookupOptions {
        match self.effective_country_code() {
            Some(country_code) => LookupOptions::carrier().with_country_code(country_code),
            None => LookupOptions::carrier(),
        }
    }
}

impl Validator for PhoneNumberValidator {
    fn validate(&self, value: &str) -> ValidatorResult<ValidationResult> {
        if value.is_empty() && self.short_circuit_empty {
            tracing::debug!("Rejecting empty phone number without lookup");
            return Ok(ValidationResult::invalid(self.failure_key(), value));
        }

        let options = self.lookup_options();
        match self.client.lookup_phone_number(value, &options) {
            Ok(_) => Ok(ValidationResult::valid()),
            Err(e) if e.is_lookup_failure() => {
                let key = self.failure_key();
                tracing::warn!("Phone number '{}' rejected ({}): {}", value, key, e);
                Ok(ValidationResult::invalid(key, value))
            }
            Err(e) => {
                tracing::error!("Could not validate phone number '{}': {}", value, e);
                Err(ValidatorError::Transport(e))
            }
        }
    }
}

impl fmt::Debug for PhoneNumberValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneNumberValidator")
            .field("country_code", &self.country_code)
            .field("short_circuit_empty", &self.short_circuit_empty)
            .field("message_mode", &self.message_mode)
            .finish_non_exhaustive()
    }
}
