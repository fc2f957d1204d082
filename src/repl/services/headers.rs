//! # Header Template Resolver
//!
//! Turns the request-headers buffer into a header map, expanding `{{NAME}}`
//! placeholders in values from the environment.

use crate::repl::models::HttpHeaders;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Lookup of template variables; an unset name yields an empty string
pub trait EnvSource {
    fn get(&self, name: &str) -> String;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> String {
        std::env::var(name).unwrap_or_default()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> String {
        HashMap::get(self, name).cloned().unwrap_or_default()
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("placeholder pattern"))
}

/// Expand every `{{NAME}}` span; unresolved names stay verbatim
pub fn resolve_value(value: &str, env: &dyn EnvSource) -> String {
    if !value.contains("{{") {
        return value.to_string();
    }

    placeholder_regex()
        .replace_all(value, |caps: &Captures| {
            let resolved = env.get(caps[1].trim());
            if resolved.is_empty() {
                tracing::debug!("header placeholder '{}' left unresolved", &caps[1]);
                caps[0].to_string()
            } else {
                resolved
            }
        })
        .into_owned()
}

/// Parse `Name: Value` lines. The first colon splits name from value; lines
/// without a colon or with an empty name are skipped.
pub fn resolve_headers(raw: &str, env: &dyn EnvSource) -> HttpHeaders {
    let mut headers = HttpHeaders::new();
    for line in raw.lines() {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        headers.insert(name.to_string(), resolve_value(value.trim(), env));
    }
    headers
}
