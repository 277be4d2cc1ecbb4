//! Platform identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// A supported chat platform.
///
/// Serialized as the lowercase tag stored in bookmark entries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    #[default]
    ChatGpt,
    Gemini,
}

impl PlatformId {
    /// Every platform, in registry order.
    pub const ALL: [PlatformId; 2] = [PlatformId::ChatGpt, PlatformId::Gemini];

    /// The stored tag for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformId::ChatGpt => "chatgpt",
            PlatformId::Gemini => "gemini",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlatformId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformId::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&PlatformId::ChatGpt).unwrap(), "\"chatgpt\"");
        assert_eq!(serde_json::to_string(&PlatformId::Gemini).unwrap(), "\"gemini\"");
        let parsed: PlatformId = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(parsed, PlatformId::Gemini);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("chatgpt".parse::<PlatformId>().unwrap(), PlatformId::ChatGpt);
        assert_eq!(" Gemini ".parse::<PlatformId>().unwrap(), PlatformId::Gemini);
        assert!("claude".parse::<PlatformId>().is_err());
    }

    #[test]
    fn test_default_is_chatgpt() {
        assert_eq!(PlatformId::default(), PlatformId::ChatGpt);
    }

    #[test]
    fn test_display_matches_tag() {
        for platform in PlatformId::ALL {
            assert_eq!(platform.to_string(), platform.as_str());
        }
    }
}
