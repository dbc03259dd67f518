//! Per-request routing context produced by the classifier.

use serde::Serialize;

/// Domain label used when no domain rule matches.
pub const GENERAL_DOMAIN: &str = "general";

/// Coarse effort estimate inferred from the request text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    /// No intensity keywords present.
    #[default]
    Standard,
    /// A depth keyword is present.
    Moderate,
    /// A high-intensity keyword is present.
    Advanced,
}

impl ComplexityTier {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Moderate => "moderate",
            Self::Advanced => "advanced",
        }
    }
}

/// Structured view of one request's free text.
///
/// Created per dispatch and discarded once the response is composed, apart
/// from the copy retained in the routing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingContext {
    input: String,
    command: Option<String>,
    flags: Vec<String>,
    tier: ComplexityTier,
    domain: String,
    integration_needs: Vec<String>,
    suggested_flags: Vec<String>,
}

impl Default for RoutingContext {
    fn default() -> Self {
        Self {
            input: String::new(),
            command: None,
            flags: Vec::new(),
            tier: ComplexityTier::Standard,
            domain: GENERAL_DOMAIN.to_owned(),
            integration_needs: Vec::new(),
            suggested_flags: Vec::new(),
        }
    }
}

impl RoutingContext {
    pub(crate) const fn new(
        input: String,
        command: Option<String>,
        flags: Vec<String>,
        tier: ComplexityTier,
        domain: String,
        integration_needs: Vec<String>,
        suggested_flags: Vec<String>,
    ) -> Self {
        Self {
            input,
            command,
            flags,
            tier,
            domain,
            integration_needs,
            suggested_flags,
        }
    }

    /// Request text with surrounding whitespace trimmed and inner runs of
    /// whitespace collapsed to single spaces.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// First `namespace:identifier` token found in the input.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Flag tokens in the order they appeared.
    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Complexity tier.
    #[must_use]
    pub const fn tier(&self) -> ComplexityTier {
        self.tier
    }

    /// Domain label, [`GENERAL_DOMAIN`] when nothing matched.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Integrations the input text hints at, in rule-table order.
    #[must_use]
    pub fn integration_needs(&self) -> &[String] {
        &self.integration_needs
    }

    /// Flags inferred from the input text.
    #[must_use]
    pub fn suggested_flags(&self) -> &[String] {
        &self.suggested_flags
    }

    /// Appends caller-supplied flags, skipping any already present.
    #[must_use]
    pub fn with_flags<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for flag in extra {
            let trimmed = flag.as_ref().trim();
            if !trimmed.is_empty() && !self.flags.iter().any(|existing| existing == trimmed) {
                self.flags.push(trimmed.to_owned());
            }
        }
        self
    }

    /// Lowercase text the handler selector scans for trigger keywords.
    ///
    /// The extracted command comes first, followed by the space-joined values
    /// of the derived fields and finally the request text itself. Field names
    /// are omitted so keywords only match content taken from the request.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(command) = self.command() {
            parts.push(command);
        }
        parts.extend(self.flags.iter().map(String::as_str));
        parts.push(self.tier.as_str());
        parts.push(&self.domain);
        parts.extend(self.integration_needs.iter().map(String::as_str));
        if !self.input.is_empty() {
            parts.push(&self.input);
        }
        parts.join(" ").to_lowercase()
    }
}
