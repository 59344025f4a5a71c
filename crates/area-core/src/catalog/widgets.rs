use std::collections::{BTreeMap, HashMap};

use crate::config::WidgetConfig;
use crate::ident::{encode, EntityKind};

use super::CatalogIndex;

/// Widget used for any widget type key without a dedicated binding.
pub const DEFAULT_WIDGET: &str = "default";

/// Maps widget type keys (`<kind>:<definitionId>`) to the widget that renders them.
///
/// Bindings are configured by definition name and resolved against the
/// catalog once, when the session starts.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    by_type: HashMap<String, String>,
}

impl WidgetRegistry {
    pub fn new(catalog: &CatalogIndex, config: &WidgetConfig) -> Self {
        let mut by_type = HashMap::new();
        bind(&mut by_type, catalog, EntityKind::Action, &config.actions);
        bind(&mut by_type, catalog, EntityKind::Reaction, &config.reactions);
        Self { by_type }
    }

    /// Widget name for a widget type key.
    pub fn resolve(&self, widget_type: &str) -> &str {
        self.by_type
            .get(widget_type)
            .map(String::as_str)
            .unwrap_or(DEFAULT_WIDGET)
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

fn bind(
    by_type: &mut HashMap<String, String>,
    catalog: &CatalogIndex,
    kind: EntityKind,
    names: &BTreeMap<String, String>,
) {
    for (name, widget) in names {
        match catalog.find_by_name(kind, name) {
            Some(def) => {
                by_type.insert(encode(kind, def.id), widget.clone());
            }
            None => tracing::debug!(%kind, name, "widget binding has no catalog definition"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Definition, Service};

    #[test]
    fn test_resolve_configured_widgets() {
        let catalog = CatalogIndex::new(vec![Service {
            name: "Webhook".to_string(),
            icon: None,
            actions: vec![Definition {
                id: 4,
                name: "On Fetch".to_string(),
                description: None,
                settings: serde_json::Value::Null,
            }],
            reactions: vec![],
        }]);

        let registry = WidgetRegistry::new(&catalog, &WidgetConfig::default());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("action:4"), "webhook-trigger");
        assert_eq!(registry.resolve("reaction:4"), DEFAULT_WIDGET);
    }
}
