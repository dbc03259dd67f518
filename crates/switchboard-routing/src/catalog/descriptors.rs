//! Descriptor records held by the catalog.

use serde::Deserialize;

/// Declared complexity of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Quick, single-step work.
    Low,
    /// Multi-step work within one area.
    Moderate,
    /// Cross-cutting work.
    High,
    /// System-wide work.
    Advanced,
}

impl Complexity {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Advanced => "advanced",
        }
    }
}

/// Advisory priority attached to a command. Displayed, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Must-run guidance.
    Critical,
    /// Strongly suggested guidance.
    Important,
    /// Optional guidance.
    Recommended,
}

impl Priority {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Important => "IMPORTANT",
            Self::Recommended => "RECOMMENDED",
        }
    }
}

/// A routable command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDescriptor {
    name: String,
    category: String,
    description: String,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    allowed_handlers: Vec<String>,
    #[serde(default)]
    required_integrations: Vec<String>,
    complexity: Complexity,
    priority: Priority,
    #[serde(default)]
    usage: Option<String>,
    #[serde(default)]
    plan: Vec<String>,
}

impl CommandDescriptor {
    /// Unique command name, for example `sc:analyze`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form grouping label.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// One-line description shown in listings and responses.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Flags the command accepts, in declaration order.
    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Handlers suited to this command.
    #[must_use]
    pub fn allowed_handlers(&self) -> &[String] {
        &self.allowed_handlers
    }

    /// Integrations the command always needs, in stored order.
    #[must_use]
    pub fn required_integrations(&self) -> &[String] {
        &self.required_integrations
    }

    /// Declared complexity.
    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Advisory priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns `true` when `handler` is on the command's roster.
    #[must_use]
    pub fn allows(&self, handler: &str) -> bool {
        self.allowed_handlers.iter().any(|allowed| allowed == handler)
    }

    /// Usage example, falling back to a generic template.
    #[must_use]
    pub fn usage(&self) -> String {
        self.usage
            .clone()
            .unwrap_or_else(|| format!("{} \"[description]\" [flags]", self.name))
    }

    /// Execution plan steps. Empty when the catalog declares none.
    #[must_use]
    pub fn plan(&self) -> &[String] {
        &self.plan
    }
}

/// A specialised handler that can be chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerDescriptor {
    name: String,
    identity: String,
    #[serde(default)]
    primary_question: Option<String>,
    #[serde(default)]
    thinking_mode: Option<String>,
    #[serde(default)]
    triggers: Vec<String>,
    #[serde(default)]
    preferred_integrations: Vec<String>,
    #[serde(default)]
    specializes_in: Vec<String>,
}

impl HandlerDescriptor {
    /// Unique handler name, for example `security-engineer`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pipe-separated identity blurb.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// First segment of the identity blurb.
    #[must_use]
    pub fn title(&self) -> &str {
        self.identity
            .split('|')
            .next()
            .map_or(self.identity.as_str(), str::trim)
    }

    /// Guiding question displayed alongside the handler.
    #[must_use]
    pub fn primary_question(&self) -> Option<&str> {
        self.primary_question.as_deref()
    }

    /// Thinking mode label displayed alongside the handler.
    #[must_use]
    pub fn thinking_mode(&self) -> Option<&str> {
        self.thinking_mode.as_deref()
    }

    /// Lowercase trigger keywords.
    #[must_use]
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Integrations the handler prefers, in stored order.
    #[must_use]
    pub fn preferred_integrations(&self) -> &[String] {
        &self.preferred_integrations
    }

    /// Commands the handler specialises in.
    #[must_use]
    pub fn specializes_in(&self) -> &[String] {
        &self.specializes_in
    }

    /// Returns `true` when any trigger keyword occurs in `haystack`.
    ///
    /// `haystack` must already be lowercase.
    #[must_use]
    pub fn matches(&self, haystack: &str) -> bool {
        self.triggers
            .iter()
            .any(|keyword| haystack.contains(keyword.as_str()))
    }

    pub(super) fn normalise_triggers(&mut self) {
        for keyword in &mut self.triggers {
            *keyword = keyword.to_lowercase();
        }
        self.triggers.retain(|keyword| !keyword.is_empty());
    }
}

/// An external integration a deployment would call. Never invoked here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationDescriptor {
    name: String,
    display_name: String,
    #[serde(default)]
    capabilities: Vec<String>,
}

impl IntegrationDescriptor {
    /// Unique integration name, for example `context7`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Capability labels.
    #[must_use]
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }
}

/// Output-verbosity mode. Inert metadata echoed back on request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviouralMode {
    name: String,
    description: String,
}

impl BehaviouralMode {
    /// Unique mode name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mode description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
