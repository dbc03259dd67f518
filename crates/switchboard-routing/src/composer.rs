//! Text rendering of a routed request.
//!
//! Pure string assembly: nothing here decides anything. The output always
//! names the command, the handler and every routed integration.

use crate::catalog::{Catalog, CommandDescriptor, HandlerDescriptor};
use crate::classifier::RoutingContext;
use crate::selector::SelectionMode;

const HANDLER_PLACEHOLDER: &str = "{handler}";

const DEFAULT_PLAN: &[&str] = &[
    "Parse command context and requirements",
    "Apply routing and {handler} handler adaptation",
    "Execute core command logic",
    "Validate results against quality gates",
    "Provide actionable next steps",
];

const NEXT_STEPS: &[&str] = &[
    "Review routing suggestions and confirm approach",
    "Execute command with selected handler and flags",
    "Validate results and iterate if needed",
];

/// Inputs to [`compose`].
#[derive(Debug, Clone, Copy)]
pub struct Composition<'a> {
    /// Routed command.
    pub command: &'a CommandDescriptor,
    /// Chosen handler.
    pub handler: &'a HandlerDescriptor,
    /// Routed integrations, in display order.
    pub integrations: &'a [String],
    /// Classified request context.
    pub context: &'a RoutingContext,
    /// Raw request text.
    pub input: &'a str,
    /// How the handler was chosen.
    pub selection: SelectionMode,
}

/// Renders the response text for a routed request.
#[must_use]
pub fn compose(catalog: &Catalog, parts: &Composition<'_>) -> String {
    let Composition {
        command,
        handler,
        integrations,
        context,
        input,
        selection,
    } = *parts;

    let mut lines = vec![
        format!("## {}", command.name()),
        command.description().to_owned(),
        String::new(),
        format!("Target: {}", display_input(input)),
        format!(
            "Category: {} | Complexity: {} | Priority: {}",
            command.category(),
            command.complexity().as_str(),
            command.priority().as_str()
        ),
        String::new(),
        format!("Handler: {} ({})", handler.name(), selection.as_str()),
        format!("Identity: {}", handler.identity()),
    ];
    if let Some(question) = handler.primary_question() {
        lines.push(format!("Focus: {question}"));
    }
    if let Some(mode) = handler.thinking_mode() {
        lines.push(format!("Thinking mode: {mode}"));
    }
    if !command.allows(handler.name()) {
        lines.push(format!(
            "Note: {} is outside the roster for {} ({})",
            handler.name(),
            command.name(),
            joined_or_none(command.allowed_handlers())
        ));
    }

    lines.push(String::new());
    lines.push("Routing:".to_owned());
    lines.push(format!("  Domain: {}", context.domain()));
    lines.push(format!("  Complexity tier: {}", context.tier().as_str()));
    lines.push(format!("  Flags: {}", joined_or_none(context.flags())));
    lines.push(format!(
        "  Suggested flags: {}",
        joined_or_none(context.suggested_flags())
    ));
    let unrouted: Vec<String> = context
        .integration_needs()
        .iter()
        .filter(|need| !integrations.contains(*need))
        .cloned()
        .collect();
    if !unrouted.is_empty() {
        lines.push(format!("  Unrouted integration needs: {}", unrouted.join(", ")));
    }

    lines.push(String::new());
    lines.push("Integrations:".to_owned());
    if integrations.is_empty() {
        lines.push("  - none".to_owned());
    }
    for integration in integrations {
        lines.push(format!(
            "  - {integration} ({})",
            catalog.integration_display_name(integration)
        ));
    }

    lines.push(String::new());
    lines.push("Execution plan:".to_owned());
    lines.extend(numbered(plan_steps(command, handler.name())));

    lines.push(String::new());
    lines.push("Next steps:".to_owned());
    let mut steps: Vec<String> = NEXT_STEPS.iter().map(|step| (*step).to_owned()).collect();
    steps.push(format!("Apply {} best practices", handler.title()));
    lines.extend(numbered(steps));

    lines.join("\n")
}

fn display_input(input: &str) -> &str {
    let trimmed = input.trim();
    if trimmed.is_empty() { "(none)" } else { trimmed }
}

fn joined_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_owned()
    } else {
        values.join(", ")
    }
}

fn plan_steps(command: &CommandDescriptor, handler: &str) -> Vec<String> {
    let render = |step: &str| step.replace(HANDLER_PLACEHOLDER, handler);
    if command.plan().is_empty() {
        DEFAULT_PLAN.iter().map(|step| render(step)).collect()
    } else {
        command.plan().iter().map(|step| render(step)).collect()
    }
}

fn numbered(steps: Vec<String>) -> impl Iterator<Item = String> {
    steps
        .into_iter()
        .enumerate()
        .map(|(position, step)| format!("  {}. {step}", position + 1))
}
