//! # HTTP Dispatch Service
//!
//! Runs each request as a detached tokio task and posts exactly one outcome
//! event back to the interaction loop. Requests are numbered so the loop can
//! ignore completions that a newer dispatch has superseded.

use crate::repl::error::ReqlineError;
use crate::repl::events::{AppEvent, HttpOutcome, RequestSeq};
use crate::repl::models::RequestDraft;
use crate::repl::services::decoder::{decode_text, decompress};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Url};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Applied to every request, from send until the body is fully read
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_METHOD: &str = "GET";

/// Channel end the dispatcher posts outcomes to
pub type OutcomeSender = mpsc::UnboundedSender<AppEvent>;

/// Issues requests without blocking the caller
pub struct HttpDispatcher {
    client: Client,
    timeout: Duration,
    sender: OutcomeSender,
    last_seq: RequestSeq,
}

impl HttpDispatcher {
    pub fn new(timeout: Duration, sender: OutcomeSender) -> Result<Self, ReqlineError> {
        let client = Client::builder().connect_timeout(timeout).build()?;
        tracing::debug!("HTTP dispatcher created with {:?} timeout", timeout);
        Ok(Self {
            client,
            timeout,
            sender,
            last_seq: 0,
        })
    }

    /// Sequence number of the most recent dispatch (0 before the first one)
    pub fn last_seq(&self) -> RequestSeq {
        self.last_seq
    }

    /// Start a request and return its sequence number. Must be called from
    /// within a tokio runtime.
    pub fn dispatch(&mut self, draft: RequestDraft) -> RequestSeq {
        self.last_seq += 1;
        let seq = self.last_seq;
        let client = self.client.clone();
        let sender = self.sender.clone();
        let timeout = self.timeout;

        tracing::info!("dispatching request #{}: {} {}", seq, draft.method(), draft.url());
        tokio::spawn(async move {
            let event = match execute(&client, &draft, timeout).await {
                Ok(outcome) => {
                    tracing::info!(
                        "request #{} completed: {} in {}ms",
                        seq,
                        outcome.status_code,
                        outcome.latency_ms
                    );
                    AppEvent::RequestCompleted { seq, outcome }
                }
                Err(error) => {
                    tracing::warn!("request #{} failed: {}", seq, error);
                    AppEvent::RequestFailed { seq, error }
                }
            };
            if sender.send(event).is_err() {
                tracing::debug!("event loop closed; dropping outcome of request #{}", seq);
            }
        });
        seq
    }
}

/// Perform one exchange. Any status code is a success; only transport,
/// protocol, timeout and decoding problems are failures.
pub async fn execute(
    client: &Client,
    draft: &RequestDraft,
    timeout: Duration,
) -> Result<HttpOutcome, ReqlineError> {
    let request = build_request(client, draft)?;
    let start = Instant::now();

    let exchange = async {
        let response = client.execute(request).await?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok::<_, ReqlineError>((status_code, headers, body))
    };

    let (status_code, headers, body) = tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| ReqlineError::Timeout(timeout))??;
    let latency_ms = start.elapsed().as_millis() as u64;

    let body = decompress(body, header_str(&headers, CONTENT_ENCODING))?;
    let body = decode_text(&body, header_str(&headers, CONTENT_TYPE))?;

    Ok(HttpOutcome {
        status_code,
        body,
        headers: format_headers(&headers),
        latency_ms,
    })
}

/// Build the wire request from a draft; an empty method means GET
pub fn build_request(client: &Client, draft: &RequestDraft) -> Result<Request, ReqlineError> {
    let method_str = if draft.method().is_empty() {
        DEFAULT_METHOD
    } else {
        draft.method()
    };
    let method = Method::from_bytes(method_str.as_bytes())
        .map_err(|_| ReqlineError::InvalidRequest(format!("invalid method '{method_str}'")))?;
    let url = Url::parse(draft.url())
        .map_err(|e| ReqlineError::InvalidRequest(format!("invalid URL '{}': {e}", draft.url())))?;

    let mut header_map = HeaderMap::new();
    for (name, value) in draft.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ReqlineError::InvalidRequest(format!("invalid header name '{name}'")))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            ReqlineError::InvalidRequest(format!("invalid value for header '{name}'"))
        })?;
        header_map.insert(header_name, header_value);
    }

    let mut builder = client.request(method, url).headers(header_map);
    if !draft.body().is_empty() {
        builder = builder.body(draft.body().to_string());
    }
    Ok(builder.build()?)
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// One `Name: v1,v2` line per header name, in the order received
pub fn format_headers(headers: &HeaderMap) -> String {
    let mut formatted = String::new();
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect();
        formatted.push_str(&format!("{}: {}\n", name, values.join(",")));
    }
    formatted
}
