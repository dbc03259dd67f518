//! Handler selection by trigger keyword.
//!
//! Selection is a linear scan, not a ranking: handlers are visited in catalog
//! order and the first one with a trigger keyword present in the context
//! signature wins. Reordering handlers in the catalog therefore changes which
//! handler wins a tie.

use crate::catalog::HandlerDescriptor;
use crate::classifier::RoutingContext;

/// How the handler for a request was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Chosen by trigger-keyword scan or default fallback.
    AutoDetected,
    /// Named explicitly by the caller.
    Override,
}

impl SelectionMode {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoDetected => "auto-detected",
            Self::Override => "override",
        }
    }
}

/// Picks the handler for a classified request.
///
/// Returns `default_handler` when no trigger keyword matches.
#[must_use]
pub fn select_handler<'a>(
    context: &RoutingContext,
    handlers: &'a [HandlerDescriptor],
    default_handler: &'a str,
) -> &'a str {
    matching_handler(&context.signature(), handlers).unwrap_or(default_handler)
}

/// Returns the first handler whose trigger keywords occur in `text`.
///
/// Comparison is case-insensitive.
#[must_use]
pub fn matching_handler<'a>(text: &str, handlers: &'a [HandlerDescriptor]) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    handlers
        .iter()
        .find(|handler| handler.matches(&haystack))
        .map(HandlerDescriptor::name)
}
