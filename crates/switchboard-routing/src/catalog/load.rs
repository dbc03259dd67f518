//! Parsing and validation of catalog documents.

use std::fs;

use camino::Utf8Path;
use serde::Deserialize;
use tracing::{debug, info};

use super::descriptors::{
    BehaviouralMode, CommandDescriptor, HandlerDescriptor, IntegrationDescriptor,
};
use super::errors::CatalogError;
use super::registry::Registry;
use super::{Catalog, RESERVED_COMMAND_NAMES};
use crate::classifier::{Classifier, RuleTables};

/// Tracing target for catalog loading.
pub(crate) const CATALOG_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::catalog");

const BUILTIN_CATALOG: &str = include_str!("builtin.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    default_handler: String,
    #[serde(default)]
    integrations: Vec<IntegrationDescriptor>,
    #[serde(default)]
    handlers: Vec<HandlerDescriptor>,
    #[serde(default)]
    commands: Vec<CommandDescriptor>,
    #[serde(default)]
    rules: RuleTables,
    #[serde(default)]
    modes: Vec<BehaviouralMode>,
}

impl Catalog {
    /// Loads the catalog embedded in this crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded document is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Loads `path` when given, otherwise the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document cannot be read, parsed or
    /// validated.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, CatalogError> {
        match path {
            Some(file) => Self::from_path(file),
            None => Self::builtin(),
        }
    }

    /// Reads and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_path(path: &Utf8Path) -> Result<Self, CatalogError> {
        debug!(target: CATALOG_TARGET, path = %path, "reading catalog file");
        let contents = fs::read_to_string(path).map_err(|error| CatalogError::read(path, error))?;
        Self::from_yaml_str(&contents)
    }

    /// Parses and validates a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first problem found.
    pub fn from_yaml_str(document: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogDocument = serde_saphyr::from_str(document)
            .map_err(|error| CatalogError::parse(error.to_string()))?;
        let catalog = Self::build(parsed)?;
        info!(
            target: CATALOG_TARGET,
            commands = catalog.commands.len(),
            handlers = catalog.handlers.len(),
            integrations = catalog.integrations.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn build(document: CatalogDocument) -> Result<Self, CatalogError> {
        let CatalogDocument {
            default_handler,
            integrations: integration_list,
            handlers: mut handler_list,
            commands: command_list,
            rules,
            modes: mode_list,
        } = document;

        for handler in &mut handler_list {
            handler.normalise_triggers();
        }

        let integrations = Registry::build(integration_list)?;
        let handlers = Registry::build(handler_list)?;
        let commands = Registry::build(command_list)?;
        let modes = Registry::build(mode_list)?;

        validate_commands(&commands, &handlers, &integrations)?;
        validate_handlers(&handlers, &commands, &integrations)?;

        if !handlers.contains(&default_handler) {
            return Err(CatalogError::unknown_default_handler(default_handler));
        }

        let classifier = Classifier::compile(&rules, |name| integrations.contains(name))?;

        Ok(Self {
            commands,
            handlers,
            integrations,
            modes,
            default_handler,
            classifier,
        })
    }
}

fn validate_commands(
    commands: &Registry<CommandDescriptor>,
    handlers: &Registry<HandlerDescriptor>,
    integrations: &Registry<IntegrationDescriptor>,
) -> Result<(), CatalogError> {
    for command in commands.iter() {
        if RESERVED_COMMAND_NAMES.contains(&command.name()) {
            return Err(CatalogError::reserved_name(command.name()));
        }
        if let Some(missing) = command
            .required_integrations()
            .iter()
            .find(|name| !integrations.contains(name))
        {
            return Err(CatalogError::unknown_integration(
                format!("command '{}'", command.name()),
                missing,
            ));
        }
        if let Some(missing) = command
            .allowed_handlers()
            .iter()
            .find(|name| !handlers.contains(name))
        {
            return Err(CatalogError::unknown_handler(command.name(), missing));
        }
    }
    Ok(())
}

fn validate_handlers(
    handlers: &Registry<HandlerDescriptor>,
    commands: &Registry<CommandDescriptor>,
    integrations: &Registry<IntegrationDescriptor>,
) -> Result<(), CatalogError> {
    for handler in handlers.iter() {
        if let Some(missing) = handler
            .preferred_integrations()
            .iter()
            .find(|name| !integrations.contains(name))
        {
            return Err(CatalogError::unknown_integration(
                format!("handler '{}'", handler.name()),
                missing,
            ));
        }
        if let Some(missing) = handler
            .specializes_in()
            .iter()
            .find(|name| !commands.contains(name))
        {
            return Err(CatalogError::unknown_command(handler.name(), missing));
        }
    }
    Ok(())
}
