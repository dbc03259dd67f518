//! Tool surface exposed at the RPC boundary.
//!
//! Every catalog command is a tool, plus four read-only management tools.
//! [`ToolSurface::call`] never fails outright: routing errors become
//! error-shaped [`ToolResult`]s so a bad request cannot take the server down.

mod arguments;
mod management;
mod schema;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub use arguments::{DEFAULT_HISTORY_LIMIT, dispatch_request};
pub use schema::ToolDefinition;

use crate::dispatch::Dispatcher;
use crate::errors::RoutingError;

/// Handler listing, inspection and detection.
pub const PERSONA_TOOL: &str = "sc:persona";
/// Integration status and routing preview.
pub const MCP_TOOL: &str = "sc:mcp";
/// Token-efficiency mode descriptions.
pub const OPTIMIZE_TOOL: &str = "sc:optimize";
/// Routing history listing.
pub const HISTORY_TOOL: &str = "sc:history";

/// Tracing target for tool calls.
pub(crate) const TOOLS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::tools");

/// One text block of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

/// Tool-call result in the `{content, isError}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    content: Vec<TextContent>,
    is_error: bool,
}

impl ToolResult {
    /// Creates a successful result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: text.into(),
            }],
            is_error: false,
        }
    }

    /// Creates an error-shaped result describing `error`.
    #[must_use]
    pub fn error(tool: &str, error: &RoutingError) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: format!(
                    "Error executing {tool} [{}]: {error}\n\nTip: call {PERSONA_TOOL} with \
                     action 'list' to see available handlers, or list tools to see commands.",
                    error.kind().as_str()
                ),
            }],
            is_error: true,
        }
    }

    /// Returns `true` for error-shaped results.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }

    /// Concatenated text of every content block.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lists and invokes tools over a [`Dispatcher`].
#[derive(Debug)]
pub struct ToolSurface {
    dispatcher: Dispatcher,
}

impl ToolSurface {
    /// Wraps a dispatcher.
    #[must_use]
    pub const fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Catalog command tools in catalog order, then management tools.
    #[must_use]
    pub fn list(&self) -> Vec<ToolDefinition> {
        let catalog = self.dispatcher.catalog();
        let mut tools: Vec<ToolDefinition> = catalog
            .commands()
            .iter()
            .map(|command| schema::command_tool(catalog, command))
            .collect();
        tools.extend(schema::management_tools(catalog));
        tools
    }

    /// Invokes a tool and returns its response text.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::UnknownCommand`] for names that are neither
    /// commands nor management tools, and whatever error the tool raises.
    pub fn invoke(&self, name: &str, arguments: &Value) -> Result<String, RoutingError> {
        let catalog = self.dispatcher.catalog();
        match name {
            PERSONA_TOOL => management::persona(catalog, arguments),
            MCP_TOOL => management::mcp(catalog, arguments),
            OPTIMIZE_TOOL => management::optimize(catalog, arguments),
            HISTORY_TOOL => management::history(self.dispatcher.history(), arguments),
            _ => {
                if catalog.command(name).is_none() {
                    return Err(RoutingError::unknown_command(name));
                }
                let request = dispatch_request(name, arguments)?;
                self.dispatcher
                    .dispatch(name, &request)
                    .map(|response| response.text)
            }
        }
    }

    /// Invokes a tool, converting failures into an error-shaped result.
    #[must_use]
    pub fn call(&self, name: &str, arguments: &Value) -> ToolResult {
        match self.invoke(name, arguments) {
            Ok(text) => ToolResult::text(text),
            Err(error) => {
                warn!(
                    target: TOOLS_TARGET,
                    tool = name,
                    kind = error.kind().as_str(),
                    error = %error,
                    "tool call failed"
                );
                ToolResult::error(name, &error)
            }
        }
    }
}
