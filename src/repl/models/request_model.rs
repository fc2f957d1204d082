//! # HTTP Request Draft
//!
//! The request about to be sent, assembled from the input slots and the
//! request buffers at the moment of dispatch. It is never stored.

use std::collections::HashMap;

/// Resolved header name -> value; last write wins on duplicate names
pub type HttpHeaders = HashMap<String, String>;

/// Method, URL, headers and body of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    url: String,
    method: String,
    headers: HttpHeaders,
    body: String,
}

impl RequestDraft {
    pub fn new(
        url: impl Into<String>,
        method: impl Into<String>,
        headers: HttpHeaders,
        body: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into().trim().to_string(),
            method: method.into().trim().to_ascii_uppercase(),
            headers,
            body: body.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
