//! # HTTP Management
//!
//! Building drafts from the buffers, tracking the in-flight sequence number,
//! and projecting outcomes onto the snapshot and the tabs.

use crate::repl::error::ReqlineError;
use crate::repl::events::{Focus, HttpOutcome, RequestSeq, Tab};
use crate::repl::models::RequestDraft;
use crate::repl::services::{resolve_headers, EnvSource};
use crate::repl::view_models::core::ViewModel;

impl ViewModel {
    /// Assemble the draft from the current slots and buffers
    pub fn build_draft(&self, env: &dyn EnvSource) -> RequestDraft {
        let headers = resolve_headers(&self.request_headers.value(), env);
        RequestDraft::new(self.url(), self.method(), headers, self.request_body.value())
    }

    /// Record a dispatch. The snapshot stays as it is until an outcome arrives.
    pub fn begin_request(&mut self, seq: RequestSeq) {
        self.latest_seq = seq;
        self.busy = true;
        self.spinner_frame = 0;
        self.status_message = None;
        tracing::debug!("request #{} in flight", seq);
    }

    /// Whether an outcome with this sequence number may be applied
    pub fn is_current(&self, seq: RequestSeq) -> bool {
        seq == self.latest_seq
    }

    /// Project a successful exchange; stale sequence numbers are ignored.
    /// Returns whether the outcome was applied.
    pub fn apply_success(&mut self, seq: RequestSeq, outcome: &HttpOutcome) -> bool {
        if !self.is_current(seq) {
            tracing::debug!("ignoring stale completion #{} (latest #{})", seq, self.latest_seq);
            return false;
        }

        self.busy = false;
        self.response.apply_success(outcome);
        self.tab_content
            .insert(Tab::ResponseBody, self.response.body().to_string());
        self.tab_content
            .insert(Tab::ResponseHeaders, self.response.headers().to_string());

        self.focus = Focus::ResponseRegion;
        self.activate_tab(Tab::ResponseBody);
        tracing::info!(
            "applied #{}: {} in {}ms",
            seq,
            self.response.status_text(),
            outcome.latency_ms
        );
        true
    }

    /// Project a failure; stale sequence numbers are ignored. The tab-content
    /// store keeps the previous response, so read-only tabs show stale text.
    pub fn apply_failure(&mut self, seq: RequestSeq, error: ReqlineError) -> bool {
        if !self.is_current(seq) {
            tracing::debug!("ignoring stale failure #{} (latest #{})", seq, self.latest_seq);
            return false;
        }

        self.busy = false;
        tracing::warn!("request #{} failed: {}", seq, error);
        self.project_failure(error);
        true
    }

    /// Project an error that did not come from a dispatch (clipboard,
    /// parsing) the same way as a failed request. An in-flight request is
    /// still tracked and may land afterwards.
    pub fn report_error(&mut self, error: ReqlineError) {
        tracing::warn!("{}", error);
        self.status_message = None;
        self.project_failure(error);
    }

    fn project_failure(&mut self, error: ReqlineError) {
        self.response.apply_failure(error);
        let tab = self.active_tab();
        if !tab.is_editable() {
            self.show_stored_content(tab);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::repl::error::ReqlineError;
    use crate::repl::events::{CycleDirection, Focus, HttpOutcome, Tab};
    use crate::repl::models::StatusBand;
    use crate::repl::view_models::{ActiveBuffer, ViewModel};
    use std::collections::HashMap;
    use std::time::Duration;

    fn outcome(status_code: u16, body: &str) -> HttpOutcome {
        HttpOutcome {
            status_code,
            body: body.to_string(),
            headers: "content-type: text/plain\n".to_string(),
            latency_ms: 12,
        }
    }

    #[test]
    fn build_draft_should_resolve_header_templates() {
        let mut vm = ViewModel::new();
        vm.set_initial_request(Some("http://localhost/x"), Some("post"));
        vm.request_headers.set_value("Authorization: {{TOKEN}}\nbogus line");
        vm.request_body.set_value("{}");
        let env: HashMap<String, String> = [("TOKEN".to_string(), "abc123".to_string())].into();

        let draft = vm.build_draft(&env);
        assert_eq!(draft.url(), "http://localhost/x");
        assert_eq!(draft.method(), "POST");
        assert_eq!(draft.body(), "{}");
        assert_eq!(draft.headers().len(), 1);
        assert_eq!(draft.headers()["Authorization"], "abc123");
    }

    #[test]
    fn success_should_focus_response_body_and_blur_slots() {
        let mut vm = ViewModel::new();
        vm.begin_request(1);
        assert!(vm.is_busy());

        assert!(vm.apply_success(1, &outcome(404, "missing")));

        assert!(!vm.is_busy());
        assert_eq!(vm.focus(), Focus::ResponseRegion);
        assert_eq!(vm.active_tab(), Tab::ResponseBody);
        assert_eq!(vm.active_buffer(), ActiveBuffer::Viewer);
        assert_eq!(vm.focused_buffer_count(), 0);
        assert_eq!(vm.response().status_code(), 404);
        assert_eq!(vm.response().band(), Some(StatusBand::Error));
        assert_eq!(vm.response().latency_ms(), Some(12));
        assert_eq!(vm.viewer().lines(), ["missing"]);
        assert_eq!(vm.tab_content(Tab::ResponseHeaders), "content-type: text/plain\n");
    }

    #[test]
    fn no_content_should_be_ok_band() {
        let mut vm = ViewModel::new();
        vm.begin_request(1);
        vm.apply_success(1, &outcome(204, ""));
        assert_eq!(vm.response().band(), Some(StatusBand::Ok));
        assert_eq!(vm.response().status_text(), "204 No Content");
    }

    #[test]
    fn failure_should_clear_status_latency_and_body() {
        let mut vm = ViewModel::new();
        vm.begin_request(1);
        vm.apply_success(1, &outcome(200, "old body"));

        vm.begin_request(2);
        let timeout = ReqlineError::Timeout(Duration::from_secs(10));
        assert!(vm.apply_failure(2, timeout.clone()));

        assert!(!vm.is_busy());
        assert_eq!(vm.response().status_code(), 0);
        assert_eq!(vm.response().band(), None);
        assert_eq!(vm.response().latency_ms(), None);
        assert_eq!(vm.response().body(), "");
        assert_eq!(vm.response().error(), Some(&timeout));
        // the tab store is left alone
        assert_eq!(vm.viewer().lines(), ["old body"]);
    }

    #[test]
    fn stale_outcomes_should_be_ignored() {
        let mut vm = ViewModel::new();
        vm.begin_request(1);
        vm.begin_request(2);

        assert!(!vm.apply_success(1, &outcome(500, "first")));
        assert!(vm.is_busy());
        assert_eq!(vm.response().status_code(), 0);

        assert!(vm.apply_success(2, &outcome(201, "second")));
        assert!(!vm.apply_failure(1, ReqlineError::Transport("late".into())));
        assert_eq!(vm.response().status_code(), 201);
        assert!(vm.response().error().is_none());
    }

    #[test]
    fn success_should_clear_previous_error() {
        let mut vm = ViewModel::new();
        vm.report_error(ReqlineError::Clipboard("no display".into()));
        vm.begin_request(1);
        vm.apply_success(1, &outcome(302, ""));
        assert!(vm.response().error().is_none());
        assert_eq!(vm.response().band(), Some(StatusBand::Redirect));
    }

    #[test]
    fn clipboard_error_should_clear_status_latency_and_body() {
        let mut vm = ViewModel::new();
        vm.begin_request(1);
        vm.apply_success(1, &outcome(200, "old"));

        let error = ReqlineError::Clipboard("no display".into());
        vm.report_error(error.clone());

        assert_eq!(vm.response().status_code(), 0);
        assert_eq!(vm.response().band(), None);
        assert_eq!(vm.response().latency_ms(), None);
        assert_eq!(vm.response().body(), "");
        assert_eq!(vm.response().error(), Some(&error));
        assert_eq!(vm.viewer().lines(), ["old"]);
    }

    #[test]
    fn reported_error_should_not_drop_in_flight_request() {
        let mut vm = ViewModel::new();
        vm.begin_request(3);
        vm.report_error(ReqlineError::Clipboard("no display".into()));

        assert!(vm.is_busy());
        assert!(vm.apply_success(3, &outcome(200, "landed")));
        assert_eq!(vm.response().status_code(), 200);
        assert!(vm.response().error().is_none());
    }

    #[test]
    fn failure_while_editing_should_keep_focus() {
        let mut vm = ViewModel::new();
        vm.activate_tab(Tab::RequestBody);
        vm.cycle_view(CycleDirection::Next);
        vm.begin_request(1);
        vm.apply_failure(1, ReqlineError::Transport("refused".into()));

        assert_eq!(vm.active_buffer(), ActiveBuffer::Editor(Tab::RequestBody));
        assert_eq!(vm.focused_buffer_count(), 1);
    }
}
