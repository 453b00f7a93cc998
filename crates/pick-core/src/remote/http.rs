use std::time::Duration;

use tracing::{debug, debug_span, warn};

use super::{parse_response, RemoteError, SuggestionClient};
use crate::candidate::Candidate;
use crate::settings::RemoteSettings;

/// Blocking HTTP client for the suggestion endpoint.
pub struct HttpSuggestionClient {
    agent: ureq::Agent,
    endpoint: String,
    max_results: usize,
}

impl HttpSuggestionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>, max_results: usize) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.into(),
            max_results,
        }
    }

    pub fn from_settings(remote: &RemoteSettings) -> Self {
        Self::new(
            remote.endpoint.clone(),
            remote.timeout_ms.map(Duration::from_millis),
            remote.max_results,
        )
    }
}

fn map_transport_error(e: ureq::Error) -> RemoteError {
    match e {
        ureq::Error::StatusCode(code) => RemoteError::Status(code),
        other => RemoteError::Http(other.to_string()),
    }
}

impl SuggestionClient for HttpSuggestionClient {
    fn search(&self, term: &str, field_key: &str) -> Result<Vec<Candidate>, RemoteError> {
        let _span = debug_span!("remote_search", field_key, term).entered();
        let body = self
            .agent
            .get(self.endpoint.as_str())
            .query("search", term)
            .query("search_field", field_key)
            .header("Accept", "application/json")
            .call()
            .map_err(map_transport_error)?
            .into_body()
            .read_to_string()
            .map_err(map_transport_error)?;
        let candidates = parse_response(&body, self.max_results).inspect_err(|e| {
            warn!(endpoint = %self.endpoint, "{e}");
        })?;
        debug!(count = candidates.len());
        Ok(candidates)
    }
}
