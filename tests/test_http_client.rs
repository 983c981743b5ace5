//! Integration tests for HttpLookupClient using mockito for HTTP mocking.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mockito::{Matcher, Server};
use phone_lookup_validator::{
    HttpLookupClient, LookupClient, LookupError, LookupOptions, MessageKey,
    PhoneNumberValidator, ValidatorError, Validator, ValidatorOptions,
};
use std::sync::Arc;

const ACCOUNT_SID: &str = "AC0123456789abcdef0123456789abcdef";
const AUTH_TOKEN: &str = "test-auth-token";

const RESOLVED_BODY: &str = r#"{
    "caller_name": null,
    "carrier": {
        "error_code": null,
        "mobile_country_code": "310",
        "mobile_network_code": "456",
        "name": "verizon",
        "type": "mobile"
    },
    "country_code": "US",
    "national_format": "(510) 867-5310",
    "phone_number": "+15108675310",
    "add_ons": null,
    "url": "https://lookups.twilio.com/v1/PhoneNumbers/+15108675310"
}"#;

const NOT_FOUND_BODY: &str = r#"{
    "code": 20404,
    "message": "The requested resource /PhoneNumbers/+100 was not found",
    "more_info": "https://www.twilio.com/docs/errors/20404",
    "status": 404
}"#;

fn basic_auth() -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", ACCOUNT_SID, AUTH_TOKEN))
    )
}

fn number_path(encoded: &str) -> Matcher {
    Matcher::Regex(format!(r"^/v1/PhoneNumbers/{}$", encoded))
}

fn client(server: &Server) -> HttpLookupClient {
    HttpLookupClient::with_base_url(server.url(), ACCOUNT_SID, AUTH_TOKEN)
}

#[test]
fn test_lookup_resolved_number() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", number_path(r"(%2B|\+)15108675310"))
        .match_query(Matcher::UrlEncoded("Type".into(), "carrier".into()))
        .match_header("authorization", basic_auth().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESOLVED_BODY)
        .create();

    let client = client(&server);
    let lookup = client
        .lookup_phone_number("+15108675310", &LookupOptions::carrier())
        .unwrap();

    mock.assert();
    assert_eq!(lookup.phone_number, "+15108675310");
    assert_eq!(lookup.country_code.as_deref(), Some("US"));
    assert_eq!(
        lookup.carrier.and_then(|c| c.name).as_deref(),
        Some("verizon")
    );
    assert_eq!(client.metrics().lookups_total(), 1);
    assert_eq!(client.metrics().numbers_resolved_total(), 1);
}

#[test]
fn test_lookup_sends_country_code() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", number_path("5108675310"))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("Type".into(), "carrier".into()),
            Matcher::UrlEncoded("CountryCode".into(), "US".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESOLVED_BODY)
        .create();

    let client = client(&server);
    let options = LookupOptions::carrier().with_country_code("US");
    let result = client.lookup_phone_number("5108675310", &options);

    mock.assert();
    assert!(result.is_ok());
}

#[test]
fn test_lookup_not_found() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", number_path(r"(%2B|\+)100"))
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(NOT_FOUND_BODY)
        .create();

    let client = client(&server);
    let result = client.lookup_phone_number("+100", &LookupOptions::carrier());

    mock.assert();
    match result {
        Err(LookupError::NotFound(msg)) => assert!(msg.contains("was not found")),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
    assert_eq!(client.metrics().numbers_unresolved_total(), 1);
    assert_eq!(client.metrics().lookup_errors_total(), 0);
}

#[test]
fn test_lookup_error_statuses() {
    let cases: [(usize, fn(&LookupError) -> bool); 4] = [
        (400, |e| matches!(e, LookupError::InvalidRequest(_))),
        (401, |e| matches!(e, LookupError::Unauthorized)),
        (429, |e| matches!(e, LookupError::RateLimitExceeded)),
        (500, |e| matches!(e, LookupError::ApiError { status: 500, .. })),
    ];

    for (status, check) in cases {
        let mut server = Server::new();
        let mock = server
            .mock("GET", Matcher::Any)
            .with_status(status)
            .with_body(r#"{"message": "nope"}"#)
            .create();

        let err = client(&server)
            .lookup_phone_number("+15108675310", &LookupOptions::carrier())
            .unwrap_err();

        mock.assert();
        assert!(check(&err), "status {} mapped to {:?}", status, err);
    }
}

#[test]
fn test_lookup_malformed_body() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create();

    let client = client(&server);
    let result = client.lookup_phone_number("+15108675310", &LookupOptions::carrier());

    mock.assert();
    assert!(matches!(result, Err(LookupError::JsonError(_))));
    assert_eq!(client.metrics().lookup_errors_total(), 1);
}

#[test]
fn test_validator_over_http() {
    let mut server = Server::new();

    let resolved = server
        .mock("GET", number_path(r"(%2B|\+)4910000000000"))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"phone_number": "+4910000000000", "country_code": "DE"}"#)
        .create();
    let missing = server
        .mock("GET", number_path(r"(%2B|\+)100"))
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(NOT_FOUND_BODY)
        .create();

    let validator = PhoneNumberValidator::new(
        ValidatorOptions::new().client(Arc::new(client(&server))),
    )
    .unwrap();

    let ok = validator.validate("+4910000000000").unwrap();
    assert!(ok.is_valid());
    assert!(ok.messages().is_empty());

    let bad = validator.validate("+100").unwrap();
    assert!(!bad.is_valid());
    assert_eq!(
        bad.message(MessageKey::PhoneNumberIntl),
        Some("'+100' is not a valid phone number in E.164 format.")
    );

    resolved.assert();
    missing.assert();
}

#[test]
fn test_validator_surfaces_unauthorized() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(401)
        .with_body(r#"{"code": 20003, "message": "Authenticate", "status": 401}"#)
        .create();

    let validator = PhoneNumberValidator::new(
        ValidatorOptions::new().client(Arc::new(client(&server))),
    )
    .unwrap();

    let result = validator.validate("+15108675310");

    mock.assert();
    assert!(matches!(
        result,
        Err(ValidatorError::Transport(LookupError::Unauthorized))
    ));
}

#[test]
fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 9 of localhost in the test environment
    let client = HttpLookupClient::with_base_url(
        "http://127.0.0.1:9".to_string(),
        ACCOUNT_SID,
        AUTH_TOKEN,
    );

    let err = client
        .lookup_phone_number("+15108675310", &LookupOptions::carrier())
        .unwrap_err();

    assert!(!err.is_lookup_failure());
    assert_eq!(client.metrics().lookup_errors_total(), 1);
}
