//! The view of an incoming request the authenticator works with.

use std::collections::BTreeMap;

use http::{HeaderMap, header::CONTENT_TYPE};
use serde_json::Value;

/// Body fields of a submitted form, keyed by field name.
pub type ParsedBody = BTreeMap<String, String>;

/// What an authentication strategy may look at in a request.
pub trait ServerRequest {
    /// The request method, as sent by the client.
    fn method(&self) -> &str;

    /// The body fields, already decoded.
    fn parsed_body(&self) -> &ParsedBody;
}

/// A request reduced to its method and decoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRequest {
    method: String,
    body: ParsedBody,
}

impl FormRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            body: ParsedBody::new(),
        }
    }

    pub fn with_body(mut self, body: ParsedBody) -> Self {
        self.body = body;
        self
    }

    /// Adds a single body field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }
}

impl ServerRequest for FormRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn parsed_body(&self) -> &ParsedBody {
        &self.body
    }
}

/// Decodes a request body according to its content type.
///
/// URL-encoded forms and JSON objects are understood. Anything else, including a body that does
/// not match its declared content type, decodes to no fields at all.
pub fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> ParsedBody {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()) else {
        return ParsedBody::new();
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

    match essence.as_str() {
        "application/x-www-form-urlencoded" => parse_form(bytes),
        "application/json" => parse_json(bytes),
        other if other.ends_with("+json") => parse_json(bytes),
        other => {
            log::debug!(content_type = other; "Request body content type is not decoded for authentication");
            ParsedBody::new()
        }
    }
}

fn parse_form(bytes: &[u8]) -> ParsedBody {
    // Repeated fields: the last occurrence wins.
    url::form_urlencoded::parse(bytes).into_owned().collect()
}

fn parse_json(bytes: &[u8]) -> ParsedBody {
    let object = match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(object)) => object,
        Ok(_) => return ParsedBody::new(),
        Err(err) => {
            log::debug!("Failed to decode JSON request body: {err}");
            return ParsedBody::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}
