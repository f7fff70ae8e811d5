//! Scene scripts: steps, actions, operations and the four presentations.

/// On-screen text and panels that are not part of the graph.
pub mod caption;
/// Erb's and Klumpke's palsy vignettes.
pub mod clinical;
/// The non-terminal branch catalog.
pub mod catalog;
/// The closed set of scenes.
pub mod library;
/// The roots-to-branches overview.
pub mod overview;
/// Step, action and operation definitions.
pub mod step;
