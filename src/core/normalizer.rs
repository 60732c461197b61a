// src/core/normalizer.rs
//! Extracts resume HTML and an optional PDF link from a loosely shaped webhook payload.
//!
//! Each lookup is an ordered table of extractors; the first one that yields a
//! value wins. HTML is mandatory, the PDF link is not.

use serde_json::Value;

use crate::types::{NormalizedResult, WebhookResponse};

type Extractor = fn(&Value) -> Option<&str>;

const HTML_EXTRACTORS: &[(&str, Extractor)] = &[
    ("html", html_field),
    ("output", output_field),
    ("bare_string", bare_string),
];

const PDF_EXTRACTORS: &[(&str, Extractor)] = &[
    ("pdfUrl", pdf_url_field),
    ("url", url_field),
    ("data", http_data_field),
];

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Returns `None` when no HTML can be extracted, whatever else the payload holds.
    pub fn normalize(raw: &WebhookResponse) -> Option<NormalizedResult> {
        let working = working_value(&raw.0)?;

        let html = first_match(HTML_EXTRACTORS, working)?;
        let pdf_url = first_match(PDF_EXTRACTORS, working);

        Some(NormalizedResult {
            html: html.to_string(),
            pdf_url: pdf_url.map(str::to_string),
        })
    }

    /// Name of the extractor that would supply the HTML, for diagnostics
    pub fn html_source(raw: &WebhookResponse) -> Option<&'static str> {
        let working = working_value(&raw.0)?;
        HTML_EXTRACTORS
            .iter()
            .find(|(_, extract)| extract(working).is_some())
            .map(|(name, _)| *name)
    }
}

/// Workflows that return all incoming items wrap the payload in an array.
fn working_value(raw: &Value) -> Option<&Value> {
    match raw {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

fn first_match<'a>(extractors: &[(&str, Extractor)], value: &'a Value) -> Option<&'a str> {
    extractors.iter().find_map(|(_, extract)| extract(value))
}

fn non_empty_str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    match value {
        Value::Object(map) => match map.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        },
        _ => None,
    }
}

fn html_field(value: &Value) -> Option<&str> {
    non_empty_str_field(value, "html")
}

fn output_field(value: &Value) -> Option<&str> {
    non_empty_str_field(value, "output")
}

fn bare_string(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

fn pdf_url_field(value: &Value) -> Option<&str> {
    non_empty_str_field(value, "pdfUrl")
}

fn url_field(value: &Value) -> Option<&str> {
    non_empty_str_field(value, "url")
}

// Best effort: `data` is a generic name and only counts when it looks like a link.
fn http_data_field(value: &Value) -> Option<&str> {
    non_empty_str_field(value, "data").filter(|s| s.starts_with("http"))
}
