//! Platform client configuration types.

use std::time::Duration;

/// Default color for labels created on the platform
pub const DEFAULT_LABEL_COLOR: &str = "#ffa500";

/// Default score attached to created observables
pub const DEFAULT_SCORE: u8 = 60;

/// Connection and tagging settings for an OpenCTI platform
#[derive(Debug, Clone)]
pub struct OpenCtiConfig {
    /// Platform base URL, e.g. `https://opencti.example.org`
    pub url: String,

    /// API token, sent as a bearer token
    pub token: String,

    /// Verify the platform's TLS certificate
    pub verify_ssl: bool,

    /// Request timeout
    pub timeout: Duration,

    /// Score (0-100) attached to every observable
    pub score: u8,

    /// Ask the platform to derive an indicator from each observable
    pub create_indicator: bool,

    /// Color for newly created labels
    pub label_color: String,
}

impl OpenCtiConfig {
    /// Create a configuration with default tagging settings
    #[must_use]
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            verify_ssl: false,
            timeout: Duration::from_secs(30),
            score: DEFAULT_SCORE,
            create_indicator: true,
            label_color: DEFAULT_LABEL_COLOR.to_string(),
        }
    }

    /// Set TLS certificate verification
    #[must_use]
    pub const fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the observable score, clamped to 100
    #[must_use]
    pub fn score(mut self, score: u8) -> Self {
        self.score = score.min(100);
        self
    }

    /// Set whether indicators are derived from observables
    #[must_use]
    pub const fn create_indicator(mut self, create: bool) -> Self {
        self.create_indicator = create;
        self
    }

    /// Set the color for new labels
    #[must_use]
    pub fn label_color(mut self, color: impl Into<String>) -> Self {
        self.label_color = color.into();
        self
    }

    /// GraphQL endpoint derived from the base URL
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!("{}/graphql", self.url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = OpenCtiConfig::new("https://cti.example.org/", "token");
        assert_eq!(config.score, 60);
        assert!(!config.verify_ssl);
        assert!(config.create_indicator);
        assert_eq!(config.label_color, "#ffa500");
        assert_eq!(config.graphql_endpoint(), "https://cti.example.org/graphql");
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(OpenCtiConfig::new("u", "t").score(250).score, 100);
    }
}
