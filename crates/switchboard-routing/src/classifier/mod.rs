//! Context classification of free-text request input.
//!
//! The classifier turns raw text into a [`RoutingContext`]: the normalised
//! text itself, an optional `namespace:identifier` command token, `--flag`
//! tokens, a complexity tier, a domain label, integration-need tags and
//! suggested flags. Every rule table is compiled once when the catalog loads.
//! Matching is case-insensitive and has no side effects.

mod context;
mod rules;

use regex::{Regex, RegexBuilder};

pub use context::{ComplexityTier, GENERAL_DOMAIN, RoutingContext};
pub(crate) use rules::RuleTables;

use crate::catalog::CatalogError;

const COMMAND_TOKEN: &str = r"\b[a-z][\w-]*:[a-z][\w-]*";
const FLAG_TOKEN: &str = r"--\w[\w-]*";

/// Compiled classification rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    command_token: Regex,
    flag_token: Regex,
    advanced: Option<Regex>,
    moderate: Option<Regex>,
    domains: Vec<(Regex, String)>,
    integration_needs: Vec<(Regex, String)>,
    flag_hints: Vec<(Regex, Vec<String>)>,
}

impl Classifier {
    /// Compiles the rule tables.
    ///
    /// `is_integration` reports whether an integration-need rule names a
    /// declared integration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] when a pattern fails to
    /// compile and [`CatalogError::UnknownIntegration`] when a need rule names
    /// an undeclared integration.
    pub(crate) fn compile(
        tables: &RuleTables,
        is_integration: impl Fn(&str) -> bool,
    ) -> Result<Self, CatalogError> {
        let domains = tables
            .domains
            .iter()
            .map(|rule| Ok((compile("domain", &rule.pattern)?, rule.label.clone())))
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let integration_needs = tables
            .integration_needs
            .iter()
            .map(|rule| {
                if !is_integration(&rule.integration) {
                    return Err(CatalogError::unknown_integration(
                        "integration-need rule",
                        &rule.integration,
                    ));
                }
                Ok((
                    compile("integration-need", &rule.pattern)?,
                    rule.integration.clone(),
                ))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let flag_hints = tables
            .flag_hints
            .iter()
            .map(|rule| Ok((compile("flag-hint", &rule.pattern)?, rule.flags.clone())))
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self {
            command_token: compile("command-token", COMMAND_TOKEN)?,
            flag_token: compile("flag-token", FLAG_TOKEN)?,
            advanced: compile_keywords(&tables.complexity.advanced)?,
            moderate: compile_keywords(&tables.complexity.moderate)?,
            domains,
            integration_needs,
            flag_hints,
        })
    }

    /// Classifies raw request text.
    #[must_use]
    pub fn classify(&self, input: &str) -> RoutingContext {
        let command = self
            .command_token
            .find(input)
            .map(|token| token.as_str().to_owned());

        let flags = self
            .flag_token
            .find_iter(input)
            .map(|token| token.as_str().to_owned())
            .collect();

        let domain = self
            .domains
            .iter()
            .find(|(pattern, _)| pattern.is_match(input))
            .map_or_else(|| GENERAL_DOMAIN.to_owned(), |(_, label)| label.clone());

        let integration_needs = self
            .integration_needs
            .iter()
            .filter(|(pattern, _)| pattern.is_match(input))
            .map(|(_, integration)| integration.clone())
            .collect();

        let mut suggested_flags: Vec<String> = Vec::new();
        for (pattern, hinted) in &self.flag_hints {
            if !pattern.is_match(input) {
                continue;
            }
            for flag in hinted {
                if !suggested_flags.contains(flag) {
                    suggested_flags.push(flag.clone());
                }
            }
        }

        RoutingContext::new(
            input.split_whitespace().collect::<Vec<_>>().join(" "),
            command,
            flags,
            self.tier(input),
            domain,
            integration_needs,
            suggested_flags,
        )
    }

    fn tier(&self, input: &str) -> ComplexityTier {
        let hit = |rule: &Option<Regex>| rule.as_ref().is_some_and(|regex| regex.is_match(input));
        if hit(&self.advanced) {
            ComplexityTier::Advanced
        } else if hit(&self.moderate) {
            ComplexityTier::Moderate
        } else {
            ComplexityTier::Standard
        }
    }
}

fn compile(rule: &'static str, pattern: &str) -> Result<Regex, CatalogError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|error| CatalogError::invalid_pattern(rule, pattern, &error))
}

fn compile_keywords(keywords: &[String]) -> Result<Option<Regex>, CatalogError> {
    let escaped: Vec<String> = keywords
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }
    compile("complexity", &escaped.join("|")).map(Some)
}
