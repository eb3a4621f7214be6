//! Request classification written during the `$type` stage.

use serde::{Deserialize, Serialize};

/// Coarse request kind shared by all platforms.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestKind {
    #[serde(rename = "LAUNCH")]
    Launch,
    #[serde(rename = "INTENT")]
    Intent,
    #[serde(rename = "ON_EVENT")]
    OnEvent,
    #[serde(rename = "AUDIOPLAYER")]
    AudioPlayer,
    #[serde(rename = "ON_ELEMENT_SELECTED")]
    OnElementSelected,
    #[serde(rename = "ON_REQUEST")]
    OnRequest,
    #[serde(rename = "END")]
    End,
    #[serde(rename = "UNHANDLED")]
    Unhandled,
}

/// Two-part classification: coarse kind plus an optional platform subtype.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestType {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(rename = "subType", default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl RequestType {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            sub_type: None,
        }
    }

    pub fn with_sub_type(kind: RequestKind, sub_type: impl Into<String>) -> Self {
        Self {
            kind,
            sub_type: Some(sub_type.into()),
        }
    }

    pub fn is(&self, kind: RequestKind) -> bool {
        self.kind == kind
    }
}
