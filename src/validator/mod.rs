//! Validators exposed to the surrounding input-validation framework.
//!
//! A validator answers with a [`ValidationResult`]: a verdict plus, on
//! failure, exactly one user-facing message keyed by a [`MessageKey`].

mod async_validator;
mod phone_number;

pub use async_validator::{AsyncPhoneNumberValidator, AsyncValidator};
pub use phone_number::{PhoneNumberValidator, ValidatorOptions};

use crate::error::ValidatorResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder substituted with the rejected value in message templates.
const VALUE_PLACEHOLDER: &str = "%value%";

/// Keys under which failure messages are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKey {
    /// Single-mode key, used regardless of country code
    PhoneNumber,
    /// No country code configured: the value had to be E.164
    PhoneNumberIntl,
    /// Country code configured: the value was read as a national number
    PhoneNumberNtl,
}

impl MessageKey {
    pub const PHONE_NUMBER: &'static str = "phone_number";
    pub const PHONE_NUMBER_INTL: &'static str = "phone_number_intl";
    pub const PHONE_NUMBER_NTL: &'static str = "phone_number_ntl";

    /// The key as exposed in [`ValidationResult::messages`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhoneNumber => Self::PHONE_NUMBER,
            Self::PhoneNumberIntl => Self::PHONE_NUMBER_INTL,
            Self::PhoneNumberNtl => Self::PHONE_NUMBER_NTL,
        }
    }

    /// Message template containing the `%value%` placeholder.
    pub fn template(&self) -> &'static str {
        match self {
            Self::PhoneNumber | Self::PhoneNumberIntl => {
                "'%value%' is not a valid phone number in E.164 format."
            }
            Self::PhoneNumberNtl => "'%value%' is not a valid nationally formatted phone number.",
        }
    }

    /// Render the template for `value`.
    pub fn render(&self, value: &str) -> String {
        self.template().replace(VALUE_PLACEHOLDER, value)
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How failure messages are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageMode {
    /// Always [`MessageKey::PhoneNumber`]
    Single,
    /// [`MessageKey::PhoneNumberIntl`] or [`MessageKey::PhoneNumberNtl`]
    /// depending on whether a country code is configured
    #[default]
    CountryAware,
}

impl MessageMode {
    /// Pick the key for a failure, given whether a country code applied.
    pub fn key_for(&self, has_country_code: bool) -> MessageKey {
        match (self, has_country_code) {
            (Self::Single, _) => MessageKey::PhoneNumber,
            (Self::CountryAware, false) => MessageKey::PhoneNumberIntl,
            (Self::CountryAware, true) => MessageKey::PhoneNumberNtl,
        }
    }
}

/// Outcome of validating one value.
///
/// `messages` is empty exactly when the value is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    messages: BTreeMap<String, String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            messages: BTreeMap::new(),
        }
    }

    /// A failing result carrying the rendered message for `value`.
    pub fn invalid(key: MessageKey, value: &str) -> Self {
        let mut messages = BTreeMap::new();
        messages.insert(key.as_str().to_string(), key.render(value));
        Self {
            is_valid: false,
            messages,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Failure messages keyed by message key.
    pub fn messages(&self) -> &BTreeMap<String, String> {
        &self.messages
    }

    /// The message recorded under `key`, if any.
    pub fn message(&self, key: MessageKey) -> Option<&str> {
        self.messages.get(key.as_str()).map(String::as_str)
    }
}

/// A validator usable by the input-validation framework.
pub trait Validator: Send + Sync {
    /// Validate `value`.
    ///
    /// `Ok` carries the verdict. `Err` means no verdict could be reached, for
    /// example because a remote dependency was unreachable.
    fn validate(&self, value: &str) -> ValidatorResult<ValidationResult>;

    /// Shorthand for `validate(value)?.is_valid()`.
    fn is_valid(&self, value: &str) -> ValidatorResult<bool> {
        Ok(self.validate(value)?.is_valid())
    }
}
