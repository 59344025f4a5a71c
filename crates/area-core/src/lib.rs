pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gate;
pub mod gateway;
pub mod graph;
pub mod ident;
pub mod palette;
pub mod playground;
pub mod router;
pub mod session;
pub mod state;

pub use api::{ApiError, HttpPlaygroundClient, PlaygroundApi, RemoteCall};
pub use catalog::{CatalogIndex, Definition, PaletteEntry, Service, WidgetRegistry};
pub use config::{Config, ConfigError};
pub use error::EditorError;
pub use gate::{Decision, DeletionGate, DeletionRequest, GateState};
pub use graph::{project, GraphEdge, GraphNode, GraphSnapshot, LoadError};
pub use ident::{decode, encode, EntityKind, IdentifierError, LinkKind, NodeId};
pub use playground::{Playground, Position};
pub use session::EditorSession;
