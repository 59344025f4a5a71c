//! Read-only service catalog and the lookups built from it.
//!
//! The catalog is loaded once per session. [`CatalogIndex`] precomputes the
//! definition id → (service, definition) mapping so node resolution never
//! scans the service list.

mod widgets;

pub use widgets::{WidgetRegistry, DEFAULT_WIDGET};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ident::{encode, EntityKind};

/// An action or reaction definition offered by a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected settings shape.
    #[serde(default)]
    pub settings: Value,
}

/// One service of the catalog with everything it can trigger or do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub actions: Vec<Definition>,
    #[serde(default)]
    pub reactions: Vec<Definition>,
}

impl Service {
    fn definitions(&self, kind: EntityKind) -> &[Definition] {
        match kind {
            EntityKind::Action => &self.actions,
            EntityKind::Reaction => &self.reactions,
        }
    }
}

/// Result of resolving a definition id against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogMatch<'a> {
    pub service: &'a Service,
    pub definition: &'a Definition,
}

/// A catalog item the user can drop on the canvas or pick from the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub kind: EntityKind,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub definition: Definition,
}

impl PaletteEntry {
    /// Widget type key (`<kind>:<definitionId>`) of nodes created from this entry.
    pub fn widget_type(&self) -> String {
        encode(self.kind, self.definition.id)
    }
}

/// Precomputed lookup over a service catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    services: Vec<Service>,
    by_definition: HashMap<(EntityKind, i64), (usize, usize)>,
}

impl CatalogIndex {
    /// Builds the index. When two services declare the same definition id,
    /// the first one in catalog order wins.
    pub fn new(services: Vec<Service>) -> Self {
        let mut by_definition = HashMap::new();

        for (service_idx, service) in services.iter().enumerate() {
            for kind in [EntityKind::Action, EntityKind::Reaction] {
                for (def_idx, def) in service.definitions(kind).iter().enumerate() {
                    by_definition
                        .entry((kind, def.id))
                        .or_insert((service_idx, def_idx));
                }
            }
        }

        Self {
            services,
            by_definition,
        }
    }

    /// All services, in catalog order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Resolves a definition id to its owning service.
    pub fn lookup(&self, kind: EntityKind, definition_id: i64) -> Option<CatalogMatch<'_>> {
        let &(service_idx, def_idx) = self.by_definition.get(&(kind, definition_id))?;
        let service = &self.services[service_idx];
        Some(CatalogMatch {
            service,
            definition: &service.definitions(kind)[def_idx],
        })
    }

    /// Finds the first definition with the given name.
    pub fn find_by_name(&self, kind: EntityKind, name: &str) -> Option<&Definition> {
        self.services
            .iter()
            .flat_map(|s| s.definitions(kind))
            .find(|d| d.name == name)
    }

    /// Icon of the service owning the definition, or `fallback`.
    pub fn icon_for(&self, kind: EntityKind, definition_id: i64, fallback: &str) -> String {
        self.lookup(kind, definition_id)
            .and_then(|m| m.service.icon.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Builds a palette entry for a definition id.
    pub fn entry(&self, kind: EntityKind, definition_id: i64) -> Option<PaletteEntry> {
        self.lookup(kind, definition_id).map(|m| PaletteEntry {
            kind,
            service: m.service.name.clone(),
            icon: m.service.icon.clone(),
            definition: m.definition.clone(),
        })
    }

    /// Every selectable entry grouped by service: reactions first, then
    /// actions, as the command palette lists them.
    pub fn palette_entries(&self) -> Vec<PaletteEntry> {
        let mut entries = Vec::new();
        for service in &self.services {
            for kind in [EntityKind::Reaction, EntityKind::Action] {
                for def in service.definitions(kind) {
                    entries.push(PaletteEntry {
                        kind,
                        service: service.name.clone(),
                        icon: service.icon.clone(),
                        definition: def.clone(),
                    });
                }
            }
        }
        entries
    }
}
