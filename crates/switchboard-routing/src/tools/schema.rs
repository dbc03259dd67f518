//! Tool definitions advertised to callers.

use serde::Serialize;
use serde_json::{Value, json};

use super::{HISTORY_TOOL, MCP_TOOL, OPTIMIZE_TOOL, PERSONA_TOOL};
use crate::catalog::{Catalog, CommandDescriptor};

/// Name, description and JSON input schema of one callable tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name, identical to the command name for catalog commands.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// JSON Schema describing accepted arguments.
    pub input_schema: Value,
}

pub(super) fn command_tool(catalog: &Catalog, command: &CommandDescriptor) -> ToolDefinition {
    let handlers: Vec<&str> = catalog.handlers().names().collect();
    ToolDefinition {
        name: command.name().to_owned(),
        description: format!(
            "{} | Handlers: {} | Complexity: {} | Priority: {}",
            command.description(),
            command.allowed_handlers().join(", "),
            command.complexity().as_str(),
            command.priority().as_str()
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "Target description used for routing"
                },
                "flags": {
                    "type": "array",
                    "items": { "type": "string", "enum": command.flags() },
                    "description": "Command flags merged with flags found in the input"
                },
                "handlerOverride": {
                    "type": "string",
                    "enum": handlers,
                    "description": "Handler to use instead of auto-detection"
                }
            }
        }),
    }
}

pub(super) fn management_tools(catalog: &Catalog) -> Vec<ToolDefinition> {
    let handlers: Vec<&str> = catalog.handlers().names().collect();
    let commands: Vec<&str> = catalog.commands().names().collect();
    let modes: Vec<&str> = catalog.modes().names().collect();

    vec![
        ToolDefinition {
            name: PERSONA_TOOL.to_owned(),
            description: "List handlers, show one handler, or detect the handler a context \
                          would select"
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["list", "show", "query", "switch", "auto"]
                    },
                    "name": { "type": "string", "enum": handlers },
                    "context": {
                        "type": "string",
                        "description": "Text to classify for the auto action"
                    }
                },
                "required": ["action"]
            }),
        },
        ToolDefinition {
            name: MCP_TOOL.to_owned(),
            description: "Report declared integrations or preview integration routing".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "action": { "type": "string", "enum": ["status", "route"] },
                    "command": { "type": "string", "enum": commands },
                    "handlers": {
                        "type": "array",
                        "items": { "type": "string", "enum": handlers }
                    }
                },
                "required": ["action"]
            }),
        },
        ToolDefinition {
            name: OPTIMIZE_TOOL.to_owned(),
            description: "Describe a token-efficiency mode".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mode": { "type": "string", "enum": modes }
                },
                "required": ["mode"]
            }),
        },
        ToolDefinition {
            name: HISTORY_TOOL.to_owned(),
            description: "Show the most recent routing decisions".to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "integer", "minimum": 1 }
                }
            }),
        },
    ]
}
