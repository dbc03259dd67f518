//! Dispatch frontend driving classification, selection, routing and
//! composition for one command.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::classifier::RoutingContext;
use crate::composer::{Composition, compose};
use crate::errors::RoutingError;
use crate::history::{RoutingHistory, RoutingHistoryEntry};
use crate::integrations::route_integrations;
use crate::selector::{SelectionMode, select_handler};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Arguments accepted by every catalog command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Free-text target description. Treated as empty when absent.
    pub input: Option<String>,
    /// Caller-supplied flags merged into the classified context.
    pub flags: Vec<String>,
    /// Handler to use instead of auto-detection.
    pub handler_override: Option<String>,
}

impl DispatchRequest {
    /// Creates a request carrying only free text.
    #[must_use]
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    /// Sets the handler override.
    #[must_use]
    pub fn handler_override(mut self, handler: impl Into<String>) -> Self {
        self.handler_override = Some(handler.into());
        self
    }

    /// Sets caller-supplied flags.
    #[must_use]
    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    /// Composed response text.
    pub text: String,
    /// Chosen handler name.
    pub handler: String,
    /// Routed integrations, first-seen order.
    pub integrations: Vec<String>,
    /// Classified request context.
    pub context: RoutingContext,
    /// How the handler was chosen.
    pub selection: SelectionMode,
}

/// Routes catalog commands and records each successful dispatch.
///
/// The dispatcher is `Send + Sync`; the catalog is read-only and the history
/// serialises its own appends.
#[derive(Debug)]
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    history: RoutingHistory,
}

impl Dispatcher {
    /// Creates a dispatcher over a loaded catalog.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, history: RoutingHistory) -> Self {
        Self { catalog, history }
    }

    /// Loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Routing history.
    #[must_use]
    pub const fn history(&self) -> &RoutingHistory {
        &self.history
    }

    /// Routes `command` and returns the composed response.
    ///
    /// A valid handler override skips selection. Exactly one history entry is
    /// appended per successful call; failed calls record nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnknownCommand`] when `command` is not in the
    /// catalog and [`RoutingError::UnknownHandler`] when the override names
    /// no handler.
    pub fn dispatch(
        &self,
        command: &str,
        request: &DispatchRequest,
    ) -> Result<DispatchResponse, RoutingError> {
        let catalog = self.catalog.as_ref();
        let descriptor = catalog
            .command(command)
            .ok_or_else(|| RoutingError::unknown_command(command))?;

        let input = request.input.as_deref().unwrap_or_default();
        let context = catalog
            .classifier()
            .classify(input)
            .with_flags(&request.flags);

        let (handler_name, selection) = match request.handler_override.as_deref() {
            Some(name) => (name, SelectionMode::Override),
            None => (
                select_handler(
                    &context,
                    catalog.handlers().as_slice(),
                    catalog.default_handler(),
                ),
                SelectionMode::AutoDetected,
            ),
        };
        let handler = catalog
            .handler(handler_name)
            .ok_or_else(|| RoutingError::unknown_handler(handler_name))?;

        let integrations = route_integrations(catalog, command, &[handler.name()])?;

        debug!(
            target: DISPATCH_TARGET,
            command,
            handler = handler.name(),
            selection = selection.as_str(),
            domain = context.domain(),
            tier = context.tier().as_str(),
            integrations = ?integrations,
            "routed command"
        );

        let text = compose(
            catalog,
            &Composition {
                command: descriptor,
                handler,
                integrations: &integrations,
                context: &context,
                input,
                selection,
            },
        );

        self.history.record(RoutingHistoryEntry::now(
            command,
            handler.name(),
            integrations.clone(),
            context.clone(),
            selection,
        ));

        Ok(DispatchResponse {
            text,
            handler: handler.name().to_owned(),
            integrations,
            context,
            selection,
        })
    }
}
