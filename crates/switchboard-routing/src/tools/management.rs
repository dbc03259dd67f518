//! Read-only management tools.
//!
//! These tools describe the catalog and the routing history. None of them
//! changes shared state: selecting a handler for later requests is done per
//! call through `handlerOverride`, never by switching a global.

use serde_json::Value;

use super::arguments::{
    HistoryArguments, McpAction, McpArguments, OptimizeArguments, PersonaAction,
    PersonaArguments, decode,
};
use super::{HISTORY_TOOL, MCP_TOOL, OPTIMIZE_TOOL, PERSONA_TOOL};
use crate::catalog::{Catalog, HandlerDescriptor};
use crate::classifier::RoutingContext;
use crate::errors::RoutingError;
use crate::history::{RoutingHistory, RoutingHistoryEntry};
use crate::integrations::route_integrations;
use crate::selector::matching_handler;

pub(super) fn persona(catalog: &Catalog, arguments: &Value) -> Result<String, RoutingError> {
    let parsed: PersonaArguments = decode(PERSONA_TOOL, arguments)?;
    match parsed.action {
        PersonaAction::List => Ok(list_handlers(catalog)),
        PersonaAction::Show => {
            show_handler(catalog, parsed.name.as_deref(), "show").map(describe_handler)
        }
        PersonaAction::Query => {
            show_handler(catalog, parsed.name.as_deref(), "query").map(describe_handler)
        }
        PersonaAction::Switch => {
            let handler = show_handler(catalog, parsed.name.as_deref(), "switch")?;
            Ok(format!(
                "{}\nHandlers are chosen per call: pass handlerOverride \"{}\" to a command \
                 tool to use this handler.",
                describe_handler(handler),
                handler.name()
            ))
        }
        PersonaAction::Auto => {
            let context = parsed.context.ok_or_else(|| {
                RoutingError::invalid_arguments(PERSONA_TOOL, "action 'auto' requires 'context'")
            })?;
            Ok(detect_handler(catalog, &context))
        }
    }
}

fn show_handler<'a>(
    catalog: &'a Catalog,
    requested: Option<&str>,
    action: &str,
) -> Result<&'a HandlerDescriptor, RoutingError> {
    let name = requested.ok_or_else(|| {
        RoutingError::invalid_arguments(
            PERSONA_TOOL,
            format!("action '{action}' requires 'name'"),
        )
    })?;
    catalog
        .handler(name)
        .ok_or_else(|| RoutingError::unknown_handler(name))
}

fn list_handlers(catalog: &Catalog) -> String {
    let mut lines = vec![format!(
        "Available handlers (default: {}):",
        catalog.default_handler()
    )];
    lines.extend(
        catalog
            .handlers()
            .iter()
            .map(|handler| format!("- {}: {}", handler.name(), handler.title())),
    );
    lines.join("\n")
}

fn describe_handler(handler: &HandlerDescriptor) -> String {
    let mut lines = vec![
        format!("Handler: {}", handler.name()),
        format!("Identity: {}", handler.identity()),
    ];
    if let Some(question) = handler.primary_question() {
        lines.push(format!("Focus: {question}"));
    }
    if let Some(mode) = handler.thinking_mode() {
        lines.push(format!("Thinking mode: {mode}"));
    }
    lines.push(format!("Triggers: {}", handler.triggers().join(", ")));
    lines.push(format!(
        "Preferred integrations: {}",
        handler.preferred_integrations().join(", ")
    ));
    lines.push(format!(
        "Specializes in: {}",
        handler.specializes_in().join(", ")
    ));
    lines.join("\n")
}

fn detect_handler(catalog: &Catalog, text: &str) -> String {
    let context = catalog.classifier().classify(text);
    let detected = matching_handler(&context.signature(), catalog.handlers().as_slice());
    let summary = format!(
        "Context: \"{text}\"\nDomain: {} | Complexity tier: {}",
        context.domain(),
        context.tier().as_str()
    );
    match detected {
        Some(handler) => format!("Auto-detected handler: {handler}\n{summary}"),
        None => format!(
            "No handler matched.\n{summary}\nDispatch would fall back to {}.",
            catalog.default_handler()
        ),
    }
}

pub(super) fn mcp(catalog: &Catalog, arguments: &Value) -> Result<String, RoutingError> {
    let parsed: McpArguments = decode(MCP_TOOL, arguments)?;
    match parsed.action {
        McpAction::Status => Ok(integration_status(catalog)),
        McpAction::Route => {
            let command = parsed.command.ok_or_else(|| {
                RoutingError::invalid_arguments(MCP_TOOL, "action 'route' requires 'command'")
            })?;
            let routed = route_integrations(catalog, &command, &parsed.handlers)?;
            let via = if parsed.handlers.is_empty() {
                String::new()
            } else {
                format!(" via {}", parsed.handlers.join(", "))
            };
            Ok(format!(
                "Integrations for {command}{via}: {}",
                if routed.is_empty() {
                    "none".to_owned()
                } else {
                    routed.join(", ")
                }
            ))
        }
    }
}

fn integration_status(catalog: &Catalog) -> String {
    let mut lines = vec!["Declared integrations:".to_owned()];
    lines.extend(catalog.integrations().iter().map(|integration| {
        format!(
            "- {} ({}): {}",
            integration.display_name(),
            integration.name(),
            integration.capabilities().join(", ")
        )
    }));
    lines.push("Integrations are named for routing only and never invoked.".to_owned());
    lines.join("\n")
}

pub(super) fn optimize(catalog: &Catalog, arguments: &Value) -> Result<String, RoutingError> {
    let parsed: OptimizeArguments = decode(OPTIMIZE_TOOL, arguments)?;
    let mode = catalog.mode(&parsed.mode).ok_or_else(|| {
        let known: Vec<&str> = catalog.modes().names().collect();
        RoutingError::invalid_arguments(
            OPTIMIZE_TOOL,
            format!(
                "unknown mode '{}'; expected one of: {}",
                parsed.mode,
                known.join(", ")
            ),
        )
    })?;
    Ok(format!(
        "Token optimization: {}\nDescription: {}\nModes are descriptive only; responses are not \
         altered.",
        mode.name(),
        mode.description()
    ))
}

pub(super) fn history(history: &RoutingHistory, arguments: &Value) -> Result<String, RoutingError> {
    let parsed: HistoryArguments = decode(HISTORY_TOOL, arguments)?;
    if parsed.limit == 0 {
        return Err(RoutingError::invalid_arguments(
            HISTORY_TOOL,
            "'limit' must be at least 1",
        ));
    }

    let entries = history.recent(parsed.limit);
    let mut lines = vec![format!(
        "Routing history (showing {} of {} retained, {} recorded):",
        entries.len(),
        history.len(),
        history.total_recorded()
    )];
    if entries.is_empty() {
        lines.push("No requests routed yet.".to_owned());
    }
    lines.extend(
        entries
            .iter()
            .enumerate()
            .map(|(position, entry)| describe_entry(position + 1, entry)),
    );
    Ok(lines.join("\n"))
}

fn describe_entry(position: usize, entry: &RoutingHistoryEntry) -> String {
    format!(
        "{position}. {} {} -> {} ({}) [{}] {}",
        entry.timestamp_rfc3339(),
        entry.command(),
        entry.handler(),
        entry.selection().as_str(),
        entry.integrations().join(", "),
        describe_context(entry.context())
    )
}

fn describe_context(context: &RoutingContext) -> String {
    let mut fields = vec![format!("input={:?}", context.input())];
    if let Some(command) = context.command() {
        fields.push(format!("command={command}"));
    }
    fields.push(format!("domain={}", context.domain()));
    fields.push(format!("tier={}", context.tier().as_str()));
    for (label, values) in [
        ("flags", context.flags()),
        ("needs", context.integration_needs()),
        ("suggested", context.suggested_flags()),
    ] {
        if !values.is_empty() {
            fields.push(format!("{label}={}", values.join(",")));
        }
    }
    fields.join(" ")
}
