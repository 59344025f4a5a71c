//! Default values for Area configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Backend Defaults
// ============================================================================

/// Default backend address.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

// ============================================================================
// Layout Defaults
// ============================================================================

/// Horizontal distance between the action lane and the reaction lane.
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 200.0;

/// Vertical distance between two nodes of the same lane.
pub const DEFAULT_VERTICAL_SPACING: f64 = 100.0;

// ============================================================================
// Palette Defaults
// ============================================================================

/// Where palette-inserted nodes appear (not under the pointer).
pub const DEFAULT_PALETTE_X: f64 = 0.0;
/// See [`DEFAULT_PALETTE_X`].
pub const DEFAULT_PALETTE_Y: f64 = 0.0;

// ============================================================================
// Editor Defaults
// ============================================================================

/// Icon used when a node's definition has no owning service.
pub const DEFAULT_ICON: &str = "Book";

/// Undo optimistic graph changes when the backend rejects the mutation.
pub const DEFAULT_ROLLBACK_ON_FAILURE: bool = true;

// ============================================================================
// Widget Defaults
// ============================================================================

/// Action definitions rendered with a dedicated widget, by definition name.
pub const DEFAULT_ACTION_WIDGETS: &[(&str, &str)] = &[("On Fetch", "webhook-trigger")];

/// Reaction definitions rendered with a dedicated widget, by definition name.
pub const DEFAULT_REACTION_WIDGETS: &[(&str, &str)] = &[("Fetch Request", "webhook-fetch")];

// ============================================================================
// Server Defaults
// ============================================================================

/// Port the HTTP bridge listens on.
pub const DEFAULT_SERVE_PORT: u16 = 3333;
