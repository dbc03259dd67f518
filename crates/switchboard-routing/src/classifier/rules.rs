//! Rule tables as they appear in a catalog document.

use serde::Deserialize;

/// Uncompiled rule tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RuleTables {
    #[serde(default)]
    pub(crate) complexity: ComplexityKeywords,
    #[serde(default)]
    pub(crate) domains: Vec<DomainRule>,
    #[serde(default)]
    pub(crate) integration_needs: Vec<IntegrationNeedRule>,
    #[serde(default)]
    pub(crate) flag_hints: Vec<FlagHintRule>,
}

/// Keywords selecting the complexity tier. Advanced is tested first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ComplexityKeywords {
    #[serde(default)]
    pub(crate) advanced: Vec<String>,
    #[serde(default)]
    pub(crate) moderate: Vec<String>,
}

/// Domain pattern. The first matching entry names the domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DomainRule {
    pub(crate) label: String,
    pub(crate) pattern: String,
}

/// Pattern hinting that an integration will be needed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IntegrationNeedRule {
    pub(crate) integration: String,
    pub(crate) pattern: String,
}

/// Pattern suggesting extra flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FlagHintRule {
    pub(crate) pattern: String,
    pub(crate) flags: Vec<String>,
}
