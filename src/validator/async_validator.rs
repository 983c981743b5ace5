//! Async wrapper around the synchronous phone number validator.
//!
//! Lookups block on HTTP, so each validation runs on tokio's blocking thread
//! pool via `tokio::task::spawn_blocking` instead of on a runtime worker.

use super::{PhoneNumberValidator, ValidationResult, Validator};
use crate::error::{ValidatorError, ValidatorResult};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Async counterpart of [`Validator`].
#[async_trait]
pub trait AsyncValidator: Send + Sync {
    async fn validate(&self, value: &str) -> ValidatorResult<ValidationResult>;

    /// Validate several values concurrently. Results keep the input order.
    async fn validate_all(&self, values: &[String]) -> Vec<ValidatorResult<ValidationResult>>;
}

/// Async facade over [`PhoneNumberValidator`].
#[derive(Clone, Debug)]
pub struct AsyncPhoneNumberValidator {
    validator: Arc<PhoneNumberValidator>,
}

impl AsyncPhoneNumberValidator {
    pub fn new(validator: PhoneNumberValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }

    /// The wrapped synchronous validator.
    pub fn inner(&self) -> &PhoneNumberValidator {
        &self.validator
    }
}

#[async_trait]
impl AsyncValidator for AsyncPhoneNumberValidator {
    async fn validate(&self, value: &str) -> ValidatorResult<ValidationResult> {
        let validator = self.validator.clone();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || validator.validate(&value))
            .await
            .map_err(|e| ValidatorError::Task(format!("Task join error: {}", e)))?
    }

    async fn validate_all(&self, values: &[String]) -> Vec<ValidatorResult<ValidationResult>> {
        tracing::debug!("Validating {} phone numbers", values.len());
        join_all(values.iter().map(|value| self.validate(value))).await
    }
}
