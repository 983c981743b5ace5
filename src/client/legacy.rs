//! Adapter for transports that return raw JSON payloads.
//!
//! Older deployments received the lookup response as an undecoded string, with
//! error statuses carried inside the document rather than raised. The adapter
//! turns such a transport into a [`LookupClient`].

use super::{LookupClient, LookupOptions};
use crate::error::{LookupError, LookupResult};
use crate::models::PhoneNumberLookup;
use serde_json::Value;

/// Status value inside a payload that marks an unknown number.
const NOT_FOUND_STATUS: u64 = 404;

/// A transport that returns the lookup response body as-is.
pub trait RawLookupTransport: Send + Sync {
    /// Fetch the raw response body for `number`. Error statuses are returned
    /// as bodies; only transport failures are errors.
    fn fetch_raw(&self, number: &str, options: &LookupOptions) -> LookupResult<String>;
}

/// Interprets raw payloads from a [`RawLookupTransport`].
///
/// A payload whose `status` is 404 is an unknown number. Any other parseable
/// JSON is treated as a resolved number, even when fields are missing. A body
/// that is not JSON at all is reported as [`LookupError::JsonError`].
///
/// Country hints are never forwarded.
pub struct LegacyPayloadAdapter<T> {
    transport: T,
}

impl<T: RawLookupTransport> LegacyPayloadAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn interpret(payload: &str) -> LookupResult<PhoneNumberLookup> {
        let value: Value = serde_json::from_str(payload)?;

        if Self::is_not_found(&value) {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("The requested resource was not found")
                .to_string();
            return Err(LookupError::NotFound(message));
        }

        Ok(PhoneNumberLookup::from_value_lenient(&value))
    }

    fn is_not_found(value: &Value) -> bool {
        match value.get("status") {
            Some(Value::Number(n)) => n.as_u64() == Some(NOT_FOUND_STATUS),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok() == Some(NOT_FOUND_STATUS),
            _ => false,
        }
    }
}

impl<T: RawLookupTransport> LookupClient for LegacyPayloadAdapter<T> {
    fn lookup_phone_number(
        &self,
        number: &str,
        options: &LookupOptions,
    ) -> LookupResult<PhoneNumberLookup> {
        let options = LookupOptions {
            country_code: None,
            ..options.clone()
        };

        let payload = self.transport.fetch_raw(number, &options)?;
        let result = Self::interpret(&payload);

        match &result {
            Ok(_) => tracing::debug!("Legacy lookup for {} resolved", number),
            Err(LookupError::NotFound(_)) => {
                tracing::debug!("Legacy lookup for {} reported status 404", number)
            }
            Err(e) => tracing::error!("Legacy payload for {} could not be read: {}", number, e),
        }

        result
    }

    fn supports_country_code(&self) -> bool {
        false
    }
}
