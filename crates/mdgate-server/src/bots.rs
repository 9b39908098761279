//! Bot classification from the `User-Agent` header.

/// Default user-agent substrings treated as automated clients.
const DEFAULT_PATTERNS: &[&str] = &[
    "bot", "crawl", "spider", "scrape", "curl", "wget", "python", "java", "ruby", "go", "rust",
    "php", "node", "axios", "fetch", "postman",
];

/// Case-insensitive substring matcher for bot-like user agents.
///
/// The match is deliberately coarse: the substring list is configuration,
/// not a classifier, and its hits and misses are observable behavior.
pub(crate) struct BotDetector {
    patterns: Vec<String>,
}

impl BotDetector {
    /// Create a detector from custom patterns. Patterns are lowercased once.
    pub(crate) fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Classify a user-agent string. Any substring match means bot.
    pub(crate) fn is_bot(&self, user_agent: &str) -> bool {
        let user_agent = user_agent.to_lowercase();
        self.patterns.iter().any(|p| user_agent.contains(p))
    }
}

impl Default for BotDetector {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.iter().copied())
    }
}
