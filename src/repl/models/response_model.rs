//! Response model
//!
//! Holds the single live response snapshot. A snapshot is replaced only when
//! a request reaches a terminal outcome, never partially.

use crate::repl::error::ReqlineError;
use crate::repl::events::HttpOutcome;
use reqwest::StatusCode;

/// Colour band of the status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    /// `code < 300`
    Ok,
    /// `300 <= code < 400`
    Redirect,
    /// `code >= 400`
    Error,
}

impl StatusBand {
    /// Band for a status code; 0 means no status yet
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => None,
            1..=299 => Some(StatusBand::Ok),
            300..=399 => Some(StatusBand::Redirect),
            _ => Some(StatusBand::Error),
        }
    }
}

/// The most recently applied outcome
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSnapshot {
    status_code: u16,
    body: String,
    headers: String,
    latency_ms: Option<u64>,
    error: Option<ReqlineError>,
}

impl ResponseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a successful exchange
    pub fn apply_success(&mut self, outcome: &HttpOutcome) {
        self.status_code = outcome.status_code;
        self.body = outcome.body.clone();
        self.headers = outcome.headers.clone();
        self.latency_ms = Some(outcome.latency_ms);
        self.error = None;
    }

    /// Replace the snapshot with a failure: no status, no latency, no body
    pub fn apply_failure(&mut self, error: ReqlineError) {
        self.status_code = 0;
        self.latency_ms = None;
        self.body.clear();
        self.error = Some(error);
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &str {
        &self.headers
    }

    pub fn latency_ms(&self) -> Option<u64> {
        self.latency_ms
    }

    pub fn error(&self) -> Option<&ReqlineError> {
        self.error.as_ref()
    }

    pub fn band(&self) -> Option<StatusBand> {
        StatusBand::from_code(self.status_code)
    }

    /// Status line text, e.g. "404 Not Found"; empty without a status
    pub fn status_text(&self) -> String {
        if self.status_code == 0 {
            return String::new();
        }
        let reason = StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("");
        format!("{} {}", self.status_code, reason).trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status_code: u16) -> HttpOutcome {
        HttpOutcome {
            status_code,
            body: "{\"ok\":true}".to_string(),
            headers: "content-type: application/json\n".to_string(),
            latency_ms: 42,
        }
    }

    #[test]
    fn status_band_should_follow_thresholds() {
        assert_eq!(StatusBand::from_code(0), None);
        assert_eq!(StatusBand::from_code(204), Some(StatusBand::Ok));
        assert_eq!(StatusBand::from_code(299), Some(StatusBand::Ok));
        assert_eq!(StatusBand::from_code(300), Some(StatusBand::Redirect));
        assert_eq!(StatusBand::from_code(399), Some(StatusBand::Redirect));
        assert_eq!(StatusBand::from_code(400), Some(StatusBand::Error));
        assert_eq!(StatusBand::from_code(503), Some(StatusBand::Error));
    }

    #[test]
    fn success_should_clear_previous_error() {
        let mut snapshot = ResponseSnapshot::new();
        snapshot.apply_failure(ReqlineError::Transport("refused".into()));
        snapshot.apply_success(&outcome(404));

        assert_eq!(snapshot.status_code(), 404);
        assert_eq!(snapshot.band(), Some(StatusBand::Error));
        assert_eq!(snapshot.latency_ms(), Some(42));
        assert!(snapshot.error().is_none());
    }

    #[test]
    fn failure_should_clear_status_latency_and_body() {
        let mut snapshot = ResponseSnapshot::new();
        snapshot.apply_success(&outcome(200));
        snapshot.apply_failure(ReqlineError::Timeout(std::time::Duration::from_secs(10)));

        assert_eq!(snapshot.status_code(), 0);
        assert_eq!(snapshot.band(), None);
        assert_eq!(snapshot.latency_ms(), None);
        assert_eq!(snapshot.body(), "");
        assert!(matches!(snapshot.error(), Some(ReqlineError::Timeout(_))));
    }

    #[test]
    fn status_text_should_include_reason_phrase() {
        let mut snapshot = ResponseSnapshot::new();
        assert_eq!(snapshot.status_text(), "");
        snapshot.apply_success(&outcome(404));
        assert_eq!(snapshot.status_text(), "404 Not Found");
        snapshot.apply_success(&outcome(599));
        assert_eq!(snapshot.status_text(), "599");
    }
}
