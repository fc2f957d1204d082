//! # Collection Management
//!
//! Adding the current request to the collection, and loading an endpoint
//! back from the collection buffer into the input slots.

use crate::repl::models::{accumulate, Collection};
use crate::repl::services::EnvSource;
use crate::repl::view_models::core::{ViewModel, METHOD_SLOT, URL_SLOT};
use regex::Regex;
use std::sync::OnceLock;

/// `  "key": ...` at the start of a pretty-printed JSON line
fn json_key_regex() -> &'static Regex {
    static JSON_KEY: OnceLock<Regex> = OnceLock::new();
    JSON_KEY.get_or_init(|| Regex::new(r#"^(\s*)"([^"]*)":\s"#).expect("json key pattern"))
}

/// Indentation and key of a JSON object line
fn json_key(line: &str) -> Option<(usize, &str)> {
    let caps = json_key_regex().captures(line)?;
    let indent = caps.get(1)?.as_str().len();
    let key = caps.get(2)?.as_str();
    Some((indent, key))
}

/// Find the `(method, path)` whose path key sits on `line` of the
/// pretty-printed collection
pub fn endpoint_at_line(
    collection: &Collection,
    lines: &[String],
    line: usize,
) -> Option<(String, String)> {
    let (path_indent, path) = json_key(lines.get(line)?)?;
    let method = lines[..line]
        .iter()
        .rev()
        .filter_map(|l| json_key(l))
        .find(|(indent, _)| *indent < path_indent)
        .map(|(_, key)| key)?;

    collection
        .has_endpoint(method, path)
        .then(|| (method.to_string(), path.to_string()))
}

impl ViewModel {
    /// Merge the current request into the collection and refresh its buffer
    pub fn add_to_collection(&mut self, env: &dyn EnvSource) {
        let draft = self.build_draft(env);
        match accumulate(&mut self.collection, &draft) {
            Ok(created) => {
                let Some(collection) = self.collection.as_ref() else {
                    return;
                };
                match collection.to_pretty_json() {
                    Ok(json) => self.collection_buffer.set_value(&json),
                    Err(e) => {
                        self.report_error(e);
                        return;
                    }
                }
                let verb = if created { "added" } else { "already in collection:" };
                tracing::info!("collection {} {} {}", verb, draft.method(), draft.url());
                self.status_message = Some(format!("{} {} {}", verb, draft.method(), draft.url()));
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Load the endpoint under the collection cursor into the URL and Method
    /// slots
    pub fn extract_from_collection(&mut self) {
        let text = self.collection_buffer.value();
        if text.trim().is_empty() {
            self.status_message = Some("collection is empty".to_string());
            return;
        }

        let collection = match Collection::from_json(&text) {
            Ok(collection) => collection,
            Err(e) => {
                self.report_error(e);
                return;
            }
        };

        let line = self.collection_buffer.cursor().line;
        match endpoint_at_line(&collection, self.collection_buffer.lines(), line) {
            Some((method, path)) => {
                let url = format!("{}{}", collection.base_url(), path);
                self.inputs[URL_SLOT].set_value(&url);
                self.inputs[METHOD_SLOT].set_value(&method);
                tracing::info!("loaded {} {} from collection", method, url);
                self.status_message = Some(format!("loaded {method} {url}"));
            }
            None => {
                self.status_message = Some("no endpoint under the cursor".to_string());
            }
        }
    }
}
