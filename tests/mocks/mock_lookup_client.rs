use phone_lookup_validator::error::{LookupError, LookupResult};
use phone_lookup_validator::{LookupClient, LookupOptions, PhoneNumberLookup};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What the mock answers for a number.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    Resolve,
    NotFound,
    Reject,
    Unauthorized,
    Timeout,
    ServerError,
}

/// Mock lookup client for testing.
///
/// Answers from a per-number table (falling back to a default outcome) and
/// records every call so tests can verify what reached the service.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockLookupClient {
    outcomes: Arc<Mutex<HashMap<String, MockOutcome>>>,
    default_outcome: MockOutcome,
    calls: Arc<Mutex<Vec<(String, LookupOptions)>>>,
}

#[allow(dead_code)]
impl MockLookupClient {
    /// A mock that answers every number with `outcome`.
    pub fn answering(outcome: MockOutcome) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(HashMap::new())),
            default_outcome: outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the outcome for one number.
    pub fn set_outcome(&self, number: &str, outcome: MockOutcome) {
        let mut outcomes = self.outcomes.lock().unwrap();
        outcomes.insert(number.to_string(), outcome);
    }

    /// Number of lookups made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Options passed to the most recent lookup.
    pub fn last_options(&self) -> Option<LookupOptions> {
        self.calls.lock().unwrap().last().map(|(_, o)| o.clone())
    }

    /// Numbers looked up, in call order.
    pub fn numbers(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }
}

impl LookupClient for MockLookupClient {
    fn lookup_phone_number(
        &self,
        number: &str,
        options: &LookupOptions,
    ) -> LookupResult<PhoneNumberLookup> {
        self.calls
            .lock()
            .unwrap()
            .push((number.to_string(), options.clone()));

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .get(number)
            .copied()
            .unwrap_or(self.default_outcome);

        match outcome {
            MockOutcome::Resolve => Ok(PhoneNumberLookup {
                phone_number: number.to_string(),
                country_code: options.country_code.clone(),
                ..Default::default()
            }),
            MockOutcome::NotFound => Err(LookupError::NotFound(format!(
                "The requested resource /PhoneNumbers/{} was not found",
                number
            ))),
            MockOutcome::Reject => Err(LookupError::InvalidRequest("Invalid number".into())),
            MockOutcome::Unauthorized => Err(LookupError::Unauthorized),
            MockOutcome::Timeout => Err(LookupError::Timeout),
            MockOutcome::ServerError => Err(LookupError::ApiError {
                status: 503,
                message: "Service unavailable".into(),
            }),
        }
    }
}
