//! Phone Lookup Validator - command line entry point
//!
//! Validates each phone number given on the command line against the lookup
//! service and prints one JSON document per number to stdout.

use anyhow::{bail, Result};
use phone_lookup_validator::{
    AsyncPhoneNumberValidator, AsyncValidator, Config, HttpLookupClient, PhoneNumberValidator,
    ValidatorOptions,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let numbers: Vec<String> = std::env::args().skip(1).collect();
    if numbers.is_empty() {
        bail!("usage: phone-lookup-validator <phone-number>...");
    }

    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Using lookup service at {}", config.lookup_api_url);

    let client = HttpLookupClient::new(&config);
    let metrics = client.metrics().clone();
    let options = ValidatorOptions::from_config(&config).client(Arc::new(client));
    let validator = AsyncPhoneNumberValidator::new(PhoneNumberValidator::new(options)?);

    let mut failures = 0;
    for (number, result) in numbers
        .iter()
        .zip(validator.validate_all(&numbers).await)
    {
        let line = match result {
            Ok(result) => json!({
                "value": number,
                "is_valid": result.is_valid(),
                "messages": result.messages(),
            }),
            Err(e) => {
                error!("Validation of {} failed: {}", number, e);
                failures += 1;
                json!({ "value": number, "error": e.to_string() })
            }
        };
        println!("{}", line);
    }

    let summary = metrics.summary();
    info!(
        "Lookups: {} total, {} resolved, {} unresolved, {} errors, {:.1} ms avg",
        summary.lookups_total,
        summary.numbers_resolved_total,
        summary.numbers_unresolved_total,
        summary.lookup_errors_total,
        summary.lookup_duration_avg_ms
    );

    if failures > 0 {
        bail!("{} of {} numbers could not be validated", failures, numbers.len());
    }
    Ok(())
}
