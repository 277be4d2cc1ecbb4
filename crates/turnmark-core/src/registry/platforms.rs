//! Static platform table.

use turnmark_protocols::PlatformId;

/// One registered platform and the host fragments that identify it.
#[derive(Debug, Clone, Copy)]
pub struct PlatformRow {
    pub id: PlatformId,
    pub hosts: &'static [&'static str],
}

/// Registered platforms, in classification order.
pub const PLATFORMS: &[PlatformRow] = &[
    PlatformRow {
        id: PlatformId::ChatGpt,
        hosts: &["chatgpt.com", "openai.com"],
    },
    PlatformRow {
        id: PlatformId::Gemini,
        hosts: &["gemini.google.com"],
    },
];

/// Pages the bookmark UI is injected into.
pub const MATCH_PATTERNS: &[&str] = &[
    "https://chatgpt.com/*",
    "https://chat.openai.com/*",
    "https://gemini.google.com/*",
];

/// Hostname classification over [`PLATFORMS`].
pub struct PlatformRegistry;

impl PlatformRegistry {
    /// Classify a hostname.
    ///
    /// A registered host matches when it occurs anywhere in `hostname`. The
    /// first matching row wins; unmatched hosts fall back to ChatGPT, since
    /// callers only run inside supported pages.
    pub fn classify(hostname: &str) -> PlatformId {
        PLATFORMS
            .iter()
            .find(|row| row.hosts.iter().any(|h| hostname.contains(h)))
            .map(|row| row.id)
            .unwrap_or_default()
    }

    /// Host fragments registered for a platform.
    pub fn hosts(platform: PlatformId) -> &'static [&'static str] {
        PLATFORMS
            .iter()
            .find(|row| row.id == platform)
            .map(|row| row.hosts)
            .unwrap_or(&[])
    }

    /// Whether a URL falls under one of [`MATCH_PATTERNS`].
    pub fn is_supported_url(url: &str) -> bool {
        MATCH_PATTERNS
            .iter()
            .filter_map(|pattern| pattern.strip_suffix('*'))
            .any(|prefix| url.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_chatgpt_hosts() {
        assert_eq!(PlatformRegistry::classify("chatgpt.com"), PlatformId::ChatGpt);
        assert_eq!(PlatformRegistry::classify("chat.openai.com"), PlatformId::ChatGpt);
    }

    #[test]
    fn test_classify_gemini_host() {
        assert_eq!(PlatformRegistry::classify("gemini.google.com"), PlatformId::Gemini);
    }

    #[test]
    fn test_classify_is_substring_match() {
        assert_eq!(PlatformRegistry::classify("www.chatgpt.com:443"), PlatformId::ChatGpt);
        assert_eq!(PlatformRegistry::classify("staging.gemini.google.com"), PlatformId::Gemini);
    }

    #[test]
    fn test_classify_unknown_falls_back_to_chatgpt() {
        assert_eq!(PlatformRegistry::classify("example.com"), PlatformId::ChatGpt);
        assert_eq!(PlatformRegistry::classify(""), PlatformId::ChatGpt);
    }

    #[test]
    fn test_every_platform_has_hosts() {
        for platform in PlatformId::ALL {
            assert!(!PlatformRegistry::hosts(platform).is_empty(), "{platform}");
        }
    }

    #[test]
    fn test_match_patterns_cover_known_hosts() {
        assert!(MATCH_PATTERNS.contains(&"https://chatgpt.com/*"));
        assert!(MATCH_PATTERNS.contains(&"https://chat.openai.com/*"));
        assert!(MATCH_PATTERNS.contains(&"https://gemini.google.com/*"));
    }

    #[test]
    fn test_is_supported_url() {
        assert!(PlatformRegistry::is_supported_url("https://chatgpt.com/c/abc"));
        assert!(PlatformRegistry::is_supported_url("https://gemini.google.com/app/x"));
        assert!(!PlatformRegistry::is_supported_url("https://example.com/"));
    }
}
