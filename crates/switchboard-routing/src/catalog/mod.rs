//! Immutable catalog of commands, handlers, integrations and routing rules.
//!
//! A [`Catalog`] is built once at startup from a YAML document, either the
//! built-in one embedded in this crate or an operator-supplied replacement.
//! Loading validates every cross-reference and compiles the classifier
//! tables; any failure is fatal. After loading, the catalog is only ever
//! shared behind an `Arc` and read.

mod descriptors;
mod errors;
mod load;
mod registry;

pub use descriptors::{
    BehaviouralMode, CommandDescriptor, Complexity, HandlerDescriptor, IntegrationDescriptor,
    Priority,
};
pub use errors::CatalogError;
pub use registry::{Named, Registry};

use crate::classifier::Classifier;

/// Names reserved for management tools; catalog commands may not use them.
pub const RESERVED_COMMAND_NAMES: &[&str] =
    &["sc:persona", "sc:mcp", "sc:optimize", "sc:history"];

/// Loaded and validated routing catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    commands: Registry<CommandDescriptor>,
    handlers: Registry<HandlerDescriptor>,
    integrations: Registry<IntegrationDescriptor>,
    modes: Registry<BehaviouralMode>,
    default_handler: String,
    classifier: Classifier,
}

impl Catalog {
    /// Looks up a command by name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// Looks up a handler by name.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<&HandlerDescriptor> {
        self.handlers.get(name)
    }

    /// Looks up an integration by name.
    #[must_use]
    pub fn integration(&self, name: &str) -> Option<&IntegrationDescriptor> {
        self.integrations.get(name)
    }

    /// Looks up a behavioural mode by name.
    #[must_use]
    pub fn mode(&self, name: &str) -> Option<&BehaviouralMode> {
        self.modes.get(name)
    }

    /// Commands in catalog order.
    #[must_use]
    pub const fn commands(&self) -> &Registry<CommandDescriptor> {
        &self.commands
    }

    /// Handlers in catalog order. This order breaks selection ties.
    #[must_use]
    pub const fn handlers(&self) -> &Registry<HandlerDescriptor> {
        &self.handlers
    }

    /// Integrations in catalog order.
    #[must_use]
    pub const fn integrations(&self) -> &Registry<IntegrationDescriptor> {
        &self.integrations
    }

    /// Behavioural modes in catalog order.
    #[must_use]
    pub const fn modes(&self) -> &Registry<BehaviouralMode> {
        &self.modes
    }

    /// Handler chosen when no trigger keyword matches.
    #[must_use]
    pub const fn default_handler(&self) -> &str {
        self.default_handler.as_str()
    }

    /// Compiled context classifier.
    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Display name of an integration, or the raw name when undeclared.
    #[must_use]
    pub fn integration_display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.integration(name)
            .map_or(name, IntegrationDescriptor::display_name)
    }
}
