//! Parsed inbound capsule request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound request as delivered by the capsule.
///
/// Only `directive` is interpreted here; every other field is kept verbatim.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BixbyRequest {
    /// Platform discriminator naming the event type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BixbyRequest {
    pub fn with_directive(directive: impl Into<String>) -> Self {
        Self {
            directive: Some(directive.into()),
            fields: Map::new(),
        }
    }

    /// Parse a request from JSON text.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// `true` when the directive equals `directive` exactly.
    pub fn has_directive(&self, directive: &str) -> bool {
        self.directive.as_deref() == Some(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directive_and_keeps_other_fields() {
        let raw = r#"{"directive":"AudioPlaying","$vivContext":{"locale":"en-US"}}"#;
        let req = BixbyRequest::from_json(raw).unwrap();
        assert!(req.has_directive("AudioPlaying"));
        assert_eq!(req.fields["$vivContext"]["locale"], "en-US");
    }

    #[test]
    fn missing_directive_matches_nothing() {
        let req = BixbyRequest::from_json("{}").unwrap();
        assert!(req.directive.is_none());
        assert!(!req.has_directive("AudioPlaying"));
        assert!(!req.has_directive(""));
    }
}
