//! Parameter names from query strings, form bodies and (optionally) JSON keys.

use std::borrow::Cow;

use serde_json::Value;

use crate::capture::{CaptureDocument, Item};
use crate::names::NameSet;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Which sources besides query strings and form bodies feed the parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamOptions {
    /// Record object keys of JSON request bodies and JSON responses.
    pub json_keys: bool,
}

impl Default for ParamOptions {
    fn default() -> Self {
        Self { json_keys: true }
    }
}

/// Collects parameter names across every item.
pub fn extract_parameters(doc: &CaptureDocument, opts: ParamOptions) -> NameSet {
    let mut names = NameSet::new();
    for item in doc.items() {
        item_parameters(item, opts, &mut names);
    }
    names
}

fn item_parameters(item: &Item, opts: ParamOptions, names: &mut NameSet) {
    if let Some(query) = query_string(item.url()) {
        form_names_in(query, names);
    }

    let body = item.request_body();
    if !body.is_empty() {
        match item.request_content_type() {
            Some(ct) if is_form(ct) => form_names_in(body, names),
            Some(ct) if opts.json_keys && is_json(ct) => json_names_in(body, names),
            Some(_) if opts.json_keys && looks_like_json(body) => json_names_in(body, names),
            Some(_) => {}
            None if opts.json_keys && looks_like_json(body) => json_names_in(body, names),
            None => form_names_in(body, names),
        }
    }

    if opts.json_keys && item.response_content_type().is_some_and(is_json) {
        json_names_in(item.response_body(), names);
    }
}

/// Query part of a URL: the `#fragment` is cut first, then everything after the first `?`.
pub(crate) fn query_string(url: &str) -> Option<&str> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let (_, query) = without_fragment.split_once('?')?;
    Some(query)
}

/// Adds the keys of an `&`-separated `key=value` list. Tokens without `=`
/// count as bare flags named by the whole token.
pub(crate) fn form_names_in(encoded: &str, names: &mut NameSet) {
    for pair in encoded.split('&') {
        let raw = pair.split_once('=').map_or(pair, |(name, _)| name);
        if raw.is_empty() {
            continue;
        }
        names.insert(decode_component(raw).into_owned());
    }
}

/// `application/x-www-form-urlencoded` decoding: `+` is a space, then
/// percent escapes. Malformed escapes stay literal.
pub(crate) fn decode_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(|c: char| c == '+' || c == '%') {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

fn json_names_in(body: &str, names: &mut NameSet) {
    match serde_json::from_str::<Value>(body.trim()) {
        Ok(value) => collect_json_keys(&value, names),
        Err(err) => tracing::debug!("skipping body that is not JSON: {err}"),
    }
}

fn collect_json_keys(value: &Value, names: &mut NameSet) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                names.insert(key.as_str());
                collect_json_keys(nested, names);
            }
        }
        Value::Array(values) => {
            for nested in values {
                collect_json_keys(nested, names);
            }
        }
        _ => {}
    }
}

fn is_form(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains(FORM_CONTENT_TYPE)
}

fn is_json(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}

fn looks_like_json(body: &str) -> bool {
    let body = body.trim_start();
    body.starts_with('{') || body.starts_with('[')
}
