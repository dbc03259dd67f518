//! Aggregation of the integrations a routed request needs.

use crate::catalog::Catalog;
use crate::errors::RoutingError;

/// Collects the integrations for `command` served by `handlers`.
///
/// The command's required integrations come first in stored order, followed
/// by each handler's preferred integrations in the order the handlers are
/// given. Duplicates are dropped: insertion order, first-seen wins.
///
/// # Errors
///
/// Returns [`RoutingError::UnknownCommand`] or
/// [`RoutingError::UnknownHandler`] when a name is not in the catalog.
pub fn route_integrations<S: AsRef<str>>(
    catalog: &Catalog,
    command: &str,
    handlers: &[S],
) -> Result<Vec<String>, RoutingError> {
    let descriptor = catalog
        .command(command)
        .ok_or_else(|| RoutingError::unknown_command(command))?;

    let mut routed: Vec<String> = Vec::new();
    push_unique(&mut routed, descriptor.required_integrations());

    for name in handlers {
        let handler = catalog
            .handler(name.as_ref())
            .ok_or_else(|| RoutingError::unknown_handler(name.as_ref()))?;
        push_unique(&mut routed, handler.preferred_integrations());
    }

    Ok(routed)
}

fn push_unique(routed: &mut Vec<String>, integrations: &[String]) {
    for integration in integrations {
        if !routed.contains(integration) {
            routed.push(integration.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::errors::ErrorKind;

    const OVERLAP: &str = r"
default_handler: h1
integrations:
  - { name: a, display_name: A }
  - { name: b, display_name: B }
  - { name: c, display_name: C }
  - { name: d, display_name: D }
handlers:
  - name: h1
    identity: One
    preferred_integrations: [b, c]
  - name: h2
    identity: Two
    preferred_integrations: [d, a]
commands:
  - name: 'x:cmd'
    category: test
    description: Needs a and b
    required_integrations: [a, b]
    complexity: low
    priority: RECOMMENDED
";

    #[fixture]
    fn catalog() -> Catalog {
        Catalog::from_yaml_str(OVERLAP).expect("overlap catalog")
    }

    #[rstest]
    fn deduplicates_in_first_seen_order(catalog: Catalog) {
        let routed = route_integrations(&catalog, "x:cmd", &["h1"]).expect("routes");
        assert_eq!(routed, ["a", "b", "c"]);
    }

    #[rstest]
    fn handlers_contribute_in_input_order(catalog: Catalog) {
        let routed = route_integrations(&catalog, "x:cmd", &["h2", "h1"]).expect("routes");
        assert_eq!(routed, ["a", "b", "d", "c"]);
    }

    #[rstest]
    fn command_alone_keeps_stored_order(catalog: Catalog) {
        let routed = route_integrations::<&str>(&catalog, "x:cmd", &[]).expect("routes");
        assert_eq!(routed, ["a", "b"]);
    }

    #[rstest]
    fn unknown_command_is_rejected(catalog: Catalog) {
        let error = route_integrations(&catalog, "x:missing", &["h1"]).expect_err("unknown");
        assert_eq!(error.kind(), ErrorKind::UnknownCommand);
    }

    #[rstest]
    fn unknown_handler_is_rejected(catalog: Catalog) {
        let error = route_integrations(&catalog, "x:cmd", &["ghost"]).expect_err("unknown");
        assert_eq!(error.kind(), ErrorKind::UnknownHandler);
    }
}
