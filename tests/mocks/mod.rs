mod mock_lookup_client;

pub use mock_lookup_client::{MockLookupClient, MockOutcome};
