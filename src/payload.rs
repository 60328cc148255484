//! What gets handed to the terminal for display.
//!
//! The producer decides the shape up front. Text and JSON scalars are
//! rendered inline after the label, JSON objects/arrays (and `null`) are
//! pretty-printed, errors always carry the fail label.

use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;

use crate::color::colorize;

pub type BoxError = Box<dyn StdError + Send + Sync>;

pub enum Payload {
    Text(String),
    Structured(Value),
    Error(BoxError),
}

impl Payload {
    /// Wrap any error value.
    pub fn error(err: impl Into<BoxError>) -> Self {
        Self::Error(err.into())
    }

    /// `null` stands in for "nothing to show".
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Structured(Value::Null))
    }

    /// Whether this payload takes the structured (pretty-printed) path.
    pub fn is_structured(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Structured(value) => {
                matches!(value, Value::Null | Value::Array(_) | Value::Object(_))
            }
            Self::Error(_) => true,
        }
    }

    /// Text that can be checked for error keywords, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Single-line rendition used after a label.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(Value::String(text)) => text.clone(),
            Self::Structured(value) => value.to_string(),
            Self::Error(err) => err.to_string(),
        }
    }

    /// Multi-line rendition for the structured path: pretty JSON, or an
    /// error followed by its source chain.
    pub fn structured_text(&self) -> String {
        match self {
            Self::Structured(Value::String(text)) => text.clone(),
            Self::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Error(err) => {
                let mut text = err.to_string();
                let mut source = err.source();
                while let Some(cause) = source {
                    text.push_str(&format!("\n  caused by: {cause}"));
                    source = cause.source();
                }
                text
            }
            Self::Text(text) => text.clone(),
        }
    }

    /// Apply the tag colorizer to text payloads; everything else passes
    /// through unchanged.
    pub fn colorized(self) -> Self {
        match self {
            Self::Text(text) => Self::Text(colorize(&text)),
            other => other,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
            Self::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<BoxError> for Payload {
    fn from(err: BoxError) -> Self {
        Self::Error(err)
    }
}
