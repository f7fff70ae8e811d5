//! The anatomical graph model: tiers, nodes, edges, groupings and the fixed topology tables.

/// Layout placement of the raw coordinate tables.
pub mod layout;
/// Node/edge store with construction-time validation.
pub mod model;
/// Anatomical tiers and their upstream ordering.
pub mod tier;
/// The fixed plexus topology.
pub mod topology;
/// Per-element visual state and the pure mutation function.
pub mod visual;
