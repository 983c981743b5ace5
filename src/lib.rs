//! Phone Lookup Validator - phone number validation backed by a carrier lookup service.
//!
//! The validator never parses numbers itself. It forwards the candidate to a
//! remote lookup service and turns the answer into a verdict plus, on failure,
//! one user-facing message.
//!
//! # Architecture
//!
//! - **validator**: `Validator` trait, `PhoneNumberValidator` and its async facade
//! - **client**: `LookupClient` trait, the HTTP client, and the legacy raw-payload adapter
//! - **models**: Lookup service response documents
//! - **error**: Error types for configuration, lookups and validation
//! - **config**: Configuration management from environment variables
//! - **metrics**: Counters for lookup traffic

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod validator;

pub use client::{
    HttpLookupClient, LegacyPayloadAdapter, LookupClient, LookupOptions, RawLookupTransport,
};
pub use config::Config;
pub use error::{ConfigError, LookupError, ValidatorError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{CarrierInfo, PhoneNumberLookup};
pub use validator::{
    AsyncPhoneNumberValidator, AsyncValidator, MessageKey, MessageMode, PhoneNumberValidator,
    ValidationResult, Validator, ValidatorOptions,
};
