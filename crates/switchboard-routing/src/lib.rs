//! Command routing core for the Switchboard server.
//!
//! A fixed [`Catalog`] of commands, handlers and integrations is loaded once.
//! Each request then flows through a pure pipeline:
//!
//! 1. [`Classifier::classify`] turns free text into a [`RoutingContext`].
//! 2. [`select_handler`] scans handlers in catalog order for a trigger keyword.
//! 3. [`route_integrations`] merges command and handler integrations.
//! 4. [`compose`] renders the response text.
//!
//! [`Dispatcher`] drives the pipeline and appends one [`RoutingHistoryEntry`]
//! per successful request. [`ToolSurface`] exposes the dispatcher and the
//! read-only management tools in the shape the RPC boundary expects.

pub mod catalog;
pub mod classifier;
pub mod composer;
pub mod dispatch;
pub mod errors;
pub mod history;
pub mod integrations;
pub mod selector;
pub mod tools;

pub use catalog::{Catalog, CatalogError};
pub use classifier::{Classifier, ComplexityTier, RoutingContext};
pub use composer::{Composition, compose};
pub use dispatch::{DispatchRequest, DispatchResponse, Dispatcher};
pub use errors::{ErrorKind, RoutingError};
pub use history::{RoutingHistory, RoutingHistoryEntry};
pub use integrations::route_integrations;
pub use selector::{SelectionMode, select_handler};
pub use tools::{ToolDefinition, ToolResult, ToolSurface};
