//! Data models for the carrier lookup service.
//!
//! These structures mirror the JSON documents the lookup service returns for
//! resolved numbers and for error responses.

pub mod lookup;

pub use lookup::{CarrierInfo, LookupErrorBody, PhoneNumberLookup};
