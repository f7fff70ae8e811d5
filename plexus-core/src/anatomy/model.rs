use std::collections::{BTreeMap, BTreeSet};

use crate::{
    anatomy::{
        tier::Tier,
        visual::{Mutation, VisualState},
    },
    foundation::core::Point,
    foundation::error::{PlexusError, PlexusResult},
};

/// Which topology a model was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Roots, trunks, divisions, cords and the five terminal branches.
    Primary,
    /// The primary topology plus the non-terminal branches.
    Extended,
}

/// Side of a node a label is written on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Left of the node, right-aligned.
    Left,
    /// Right of the node, left-aligned.
    Right,
    /// Above the node, centered.
    Up,
    /// Below the node, centered.
    Down,
}

/// Placement and size of a node's label.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelSpec {
    /// Side of the node.
    pub side: Side,
    /// Gap between the node's edge and the label, in scene units.
    pub buff: f64,
    /// Font size in points (1080p reference).
    pub size: f64,
}

/// Address of one element of the model.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementKey {
    /// A node by id.
    Node(String),
    /// An edge by its endpoints.
    Edge {
        /// Upstream node id.
        source: String,
        /// Downstream node id.
        target: String,
    },
}

impl ElementKey {
    /// Key of node `id`.
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node(id.into())
    }

    /// Key of the edge `source -> target`.
    pub fn edge(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Edge {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl std::fmt::Display for ElementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKey::Node(id) => f.write_str(id),
            ElementKey::Edge { source, target } => write!(f, "{source}->{target}"),
        }
    }
}

/// One anatomical structure.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Node {
    id: String,
    tier: Tier,
    display_name: String,
    position: Point,
    radius: f64,
    label: LabelSpec,
    rank: u32,
    visual: VisualState,
}

impl Node {
    /// Unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Anatomical tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Human-readable name, also used as label text.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Scene-space position, fixed at construction.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Radius at scale 1.0.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Label placement.
    pub fn label(&self) -> LabelSpec {
        self.label
    }

    /// Current visual state.
    pub fn visual(&self) -> &VisualState {
        &self.visual
    }
}

/// A directed anatomical continuation between two nodes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Edge {
    source: String,
    target: String,
    visual: VisualState,
}

impl Edge {
    /// Upstream node id.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Downstream node id.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Current visual state.
    pub fn visual(&self) -> &VisualState {
        &self.visual
    }
}

/// Named, ordered set of elements acted on together by one step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Grouping {
    name: String,
    members: Vec<ElementKey>,
}

impl Grouping {
    /// Grouping name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declared order.
    pub fn members(&self) -> &[ElementKey] {
        &self.members
    }
}

/// Construction-time description of a node.
#[derive(Clone, Debug)]
pub struct NodeDef {
    /// Unique id.
    pub id: String,
    /// Anatomical tier.
    pub tier: Tier,
    /// Label text.
    pub display_name: String,
    /// Scene-space position.
    pub position: Point,
    /// Radius at scale 1.0.
    pub radius: f64,
    /// Label placement.
    pub label: LabelSpec,
    /// Reveal order within the tier.
    pub rank: u32,
    /// Initial visual state.
    pub visual: VisualState,
}

/// Builder for [`Model`]; all contract checks run in [`ModelBuilder::build`].
pub struct ModelBuilder {
    variant: Variant,
    nodes: Vec<NodeDef>,
    edges: Vec<(String, String, VisualState)>,
    groupings: Vec<(String, Vec<ElementKey>)>,
}

impl ModelBuilder {
    /// Start an empty model of the given variant.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            nodes: Vec::new(),
            edges: Vec::new(),
            groupings: Vec::new(),
        }
    }

    /// Add a node.
    pub fn node(mut self, def: NodeDef) -> Self {
        self.nodes.push(def);
        self
    }

    /// Add an edge `source -> target`.
    pub fn edge(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        visual: VisualState,
    ) -> Self {
        self.edges.push((source.into(), target.into(), visual));
        self
    }

    /// Add a grouping.
    pub fn grouping(mut self, name: impl Into<String>, members: Vec<ElementKey>) -> Self {
        self.groupings.push((name.into(), members));
        self
    }

    /// Validate and build the model.
    #[tracing::instrument(skip(self), fields(variant = ?self.variant))]
    pub fn build(self) -> PlexusResult<Model> {
        let mut model = Model {
            variant: self.variant,
            nodes: Vec::with_capacity(self.nodes.len()),
            node_index: BTreeMap::new(),
            edges: Vec::with_capacity(self.edges.len()),
            edge_index: BTreeMap::new(),
            groupings: BTreeMap::new(),
        };

        for def in self.nodes {
            if model.node_index.contains_key(&def.id) {
                return Err(PlexusError::configuration(format!(
                    "duplicate node id '{}'",
                    def.id
                )));
            }
            if !def.radius.is_finite() || def.radius <= 0.0 {
                return Err(PlexusError::configuration(format!(
                    "node '{}' radius must be finite and > 0",
                    def.id
                )));
            }
            model.node_index.insert(def.id.clone(), model.nodes.len());
            model.nodes.push(Node {
                id: def.id,
                tier: def.tier,
                display_name: def.display_name,
                position: def.position,
                radius: def.radius,
                label: def.label,
                rank: def.rank,
                visual: def.visual,
            });
        }

        for (source, target, visual) in self.edges {
            let src_tier = model.node_tier_for_edge(&source, &source, &target)?;
            let dst_tier = model.node_tier_for_edge(&target, &source, &target)?;
            if !src_tier.is_upstream_of(dst_tier) {
                return Err(PlexusError::configuration(format!(
                    "edge '{source}->{target}' runs from {src_tier} to {dst_tier}, not downstream"
                )));
            }
            let key = (source.clone(), target.clone());
            if model.edge_index.contains_key(&key) {
                return Err(PlexusError::configuration(format!(
                    "duplicate edge '{source}->{target}'"
                )));
            }
            model.edge_index.insert(key, model.edges.len());
            model.edges.push(Edge {
                source,
                target,
                visual,
            });
        }

        for (name, members) in self.groupings {
            model.define_grouping(name, members)?;
        }

        tracing::debug!(
            nodes = model.nodes.len(),
            edges = model.edges.len(),
            groupings = model.groupings.len(),
            "model built"
        );
        Ok(model)
    }
}

/// Lookup-by-id store of nodes, edges and groupings.
///
/// Topology is frozen once built; only visual state changes, through [`Model::apply`].
#[derive(Clone, Debug)]
pub struct Model {
    variant: Variant,
    nodes: Vec<Node>,
    node_index: BTreeMap<String, usize>,
    edges: Vec<Edge>,
    edge_index: BTreeMap<(String, String), usize>,
    groupings: BTreeMap<String, Grouping>,
}

impl Model {
    fn node_tier_for_edge(&self, id: &str, source: &str, target: &str) -> PlexusResult<Tier> {
        self.node_index
            .get(id)
            .map(|&i| self.nodes[i].tier)
            .ok_or_else(|| {
                PlexusError::configuration(format!(
                    "edge '{source}->{target}' references unknown node '{id}'"
                ))
            })
    }

    /// Topology variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// All nodes in table order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in table order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node `id`.
    pub fn get_node(&self, id: &str) -> PlexusResult<&Node> {
        self.node_index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| PlexusError::lookup(format!("no node '{id}'")))
    }

    /// Edge `source -> target`.
    pub fn get_edge(&self, source: &str, target: &str) -> PlexusResult<&Edge> {
        self.edge_index
            .get(&(source.to_string(), target.to_string()))
            .map(|&i| &self.edges[i])
            .ok_or_else(|| PlexusError::lookup(format!("no edge '{source}->{target}'")))
    }

    /// Nodes of `tier` in reveal order.
    pub fn nodes_in_tier(&self, tier: Tier) -> Vec<&Node> {
        let mut out: Vec<(usize, &Node)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.tier == tier)
            .collect();
        out.sort_by_key(|(i, n)| (n.rank, *i));
        out.into_iter().map(|(_, n)| n).collect()
    }

    /// Edges from a node in `from` to a node in `to`, in table order.
    pub fn edges_between(&self, from: Tier, to: Tier) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| {
                let s = self.node_index[&e.source];
                let t = self.node_index[&e.target];
                self.nodes[s].tier == from && self.nodes[t].tier == to
            })
            .collect()
    }

    /// Grouping `name`.
    pub fn grouping(&self, name: &str) -> PlexusResult<&Grouping> {
        self.groupings
            .get(name)
            .ok_or_else(|| PlexusError::unknown_grouping(name))
    }

    /// `true` if `key` addresses an element of this model.
    pub fn contains(&self, key: &ElementKey) -> bool {
        match key {
            ElementKey::Node(id) => self.node_index.contains_key(id),
            ElementKey::Edge { source, target } => self
                .edge_index
                .contains_key(&(source.clone(), target.clone())),
        }
    }

    /// Register a grouping. Names are unique and every member must exist.
    pub fn define_grouping(
        &mut self,
        name: impl Into<String>,
        members: Vec<ElementKey>,
    ) -> PlexusResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlexusError::configuration("grouping name must be non-empty"));
        }
        if self.groupings.contains_key(&name) {
            return Err(PlexusError::configuration(format!(
                "duplicate grouping '{name}'"
            )));
        }
        let mut seen = BTreeSet::new();
        for m in &members {
            if !self.contains(m) {
                return Err(PlexusError::configuration(format!(
                    "grouping '{name}' references unknown element '{m}'"
                )));
            }
            if !seen.insert(m) {
                return Err(PlexusError::configuration(format!(
                    "grouping '{name}' lists '{m}' twice"
                )));
            }
        }
        self.groupings
            .insert(name.clone(), Grouping { name, members });
        Ok(())
    }

    /// Register a grouping of every element not in any of `of`: nodes in table order, then
    /// edges in table order.
    pub fn define_complement(&mut self, name: impl Into<String>, of: &[&str]) -> PlexusResult<()> {
        let mut excluded = BTreeSet::new();
        for g in of {
            let grouping = self.grouping(g).map_err(|_| {
                PlexusError::configuration(format!(
                    "complement references undefined grouping '{g}'"
                ))
            })?;
            excluded.extend(grouping.members.iter().cloned());
        }
        let members = self
            .nodes
            .iter()
            .map(|n| ElementKey::node(n.id.as_str()))
            .chain(
                self.edges
                    .iter()
                    .map(|e| ElementKey::edge(e.source.as_str(), e.target.as_str())),
            )
            .filter(|k| !excluded.contains(k))
            .collect();
        self.define_grouping(name, members)
    }

    /// Current visual state of `key`.
    pub fn visual(&self, key: &ElementKey) -> PlexusResult<&VisualState> {
        match key {
            ElementKey::Node(id) => Ok(&self.get_node(id)?.visual),
            ElementKey::Edge { source, target } => Ok(&self.get_edge(source, target)?.visual),
        }
    }

    /// Apply `mutations` to `key` in order; returns the states before and after.
    pub fn apply(
        &mut self,
        key: &ElementKey,
        mutations: &[Mutation],
    ) -> PlexusResult<(VisualState, VisualState)> {
        let slot = match key {
            ElementKey::Node(id) => {
                let i = *self
                    .node_index
                    .get(id)
                    .ok_or_else(|| PlexusError::lookup(format!("no node '{id}'")))?;
                &mut self.nodes[i].visual
            }
            ElementKey::Edge { source, target } => {
                let i = *self
                    .edge_index
                    .get(&(source.clone(), target.clone()))
                    .ok_or_else(|| PlexusError::lookup(format!("no edge '{source}->{target}'")))?;
                &mut self.edges[i].visual
            }
        };
        let before = *slot;
        *slot = before.apply_all(mutations);
        Ok((before, *slot))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anatomy/model.rs"]
mod tests;
