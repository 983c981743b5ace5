//! Lookup response models.

use serde::{Deserialize, Serialize};

/// Carrier metadata attached to a resolved number when `Type=carrier` is requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CarrierInfo {
    /// Carrier name (e.g. "verizon")
    pub name: Option<String>,

    /// Line type: "mobile", "landline" or "voip"
    #[serde(rename = "type")]
    pub line_type: Option<String>,

    pub mobile_country_code: Option<String>,

    pub mobile_network_code: Option<String>,

    /// Carrier-side error code, if the carrier lookup itself failed
    pub error_code: Option<i64>,
}

/// A number the lookup service resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PhoneNumberLookup {
    /// The number in E.164 format
    pub phone_number: String,

    /// ISO 3166-1 alpha-2 country of the number
    pub country_code: Option<String>,

    /// The number in its country's national format
    pub national_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<CarrierInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_name: Option<serde_json::Value>,

    /// Canonical resource URL
    pub url: Option<String>,
}

impl PhoneNumberLookup {
    /// Build a lookup from a loosely shaped JSON document.
    ///
    /// Fields with unexpected types are ignored instead of failing, so that any
    /// document the service sends back can be represented.
    pub fn from_value_lenient(value: &serde_json::Value) -> Self {
        if let Ok(lookup) = serde_json::from_value::<PhoneNumberLookup>(value.clone()) {
            return lookup;
        }

        let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Self {
            phone_number: text("phone_number").unwrap_or_default(),
            country_code: text("country_code"),
            national_format: text("national_format"),
            carrier: value
                .get("carrier")
                .and_then(|c| serde_json::from_value(c.clone()).ok()),
            caller_name: value.get("caller_name").filter(|v| !v.is_null()).cloned(),
            url: text("url"),
        }
    }
}

/// Error document the lookup service returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LookupErrorBody {
    /// Service-specific error code (e.g. 20404)
    pub code: Option<i64>,

    pub message: Option<String>,

    pub more_info: Option<String>,

    /// HTTP status echoed in the body
    pub status: Option<u16>,
}
