//! Decides whether a payload should be shown with the fail label.

use std::sync::OnceLock;

use crate::payload::Payload;

/// Standard error constructor names. `Error` itself is left out so that
/// ordinary prose mentioning "Error" is not flagged; the `Error:` prefix
/// covers the common rendering.
const ERROR_TYPE_NAMES: [&str; 7] = [
    "EvalError",
    "RangeError",
    "ReferenceError",
    "SyntaxError",
    "TypeError",
    "URIError",
    "AggregateError",
];

const ERROR_PREFIX: &str = "Error:";

/// Keyword matcher with a lazily built, then frozen, keyword set.
#[derive(Debug, Default)]
pub struct ErrorClassifier {
    extra: Vec<String>,
    keywords: OnceLock<Vec<String>>,
}

impl ErrorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register additional error type names. Names added after the first
    /// classification are never observed.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(names.into_iter().map(Into::into));
        self
    }

    /// The keyword set, computed on first use.
    pub fn keywords(&self) -> &[String] {
        self.keywords.get_or_init(|| {
            let mut keywords: Vec<String> =
                ERROR_TYPE_NAMES.iter().map(|name| name.to_string()).collect();
            keywords.extend(self.extra.iter().cloned());
            keywords.push(ERROR_PREFIX.to_string());
            keywords
        })
    }

    pub fn is_error(&self, data: &Payload) -> bool {
        match data {
            Payload::Error(_) => true,
            _ => data.as_text().is_some_and(|text| self.is_error_text(text)),
        }
    }

    pub fn is_error_text(&self, text: &str) -> bool {
        self.keywords().iter().any(|keyword| text.contains(keyword.as_str()))
    }
}

/// Classify with the process-wide default keyword set.
pub fn is_error(data: &Payload) -> bool {
    static SHARED: OnceLock<ErrorClassifier> = OnceLock::new();
    SHARED.get_or_init(ErrorClassifier::new).is_error(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;

    #[test]
    fn error_values_are_errors() {
        assert!(is_error(&Payload::error(io::Error::other("x"))));
    }

    #[test]
    fn error_prefix_in_text() {
        assert!(is_error(&Payload::from("Error: boom")));
        assert!(is_error(&Payload::from("caught TypeError in handler")));
        assert!(is_error(&Payload::from(json!("RangeError: too big"))));
    }

    #[test]
    fn plain_values_are_not_errors() {
        assert!(!is_error(&Payload::from("plain text")));
        assert!(!is_error(&Payload::from(json!(42))));
        assert!(!is_error(&Payload::from(json!({"error": "Error: inside"}))));
        assert!(!is_error(&Payload::from(json!(["Error:"]))));
        assert!(!is_error(&Payload::from(json!(null))));
    }

    #[test]
    fn extra_names_before_first_use() {
        let classifier = ErrorClassifier::new().with_names(["DecodeFailure"]);
        assert!(classifier.is_error_text("DecodeFailure at byte 3"));
    }

    #[test]
    fn keyword_set_is_frozen_after_first_use() {
        let classifier = ErrorClassifier::new();
        assert!(!classifier.is_error_text("Timeout"));

        let classifier = classifier.with_names(["Timeout"]);
        assert!(!classifier.is_error_text("Timeout"));
    }
}
