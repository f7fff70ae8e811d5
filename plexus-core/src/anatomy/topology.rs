//! The fixed plexus topology, kept as reviewable tables.
//!
//! Raw coordinates are in layout units (x grows distally, y grows cranially) and are mapped to
//! scene space by a [`Placement`]. The placement is fitted to the primary table only, so every
//! primary node lands on the same spot in both variants.

use crate::{
    anatomy::{
        layout::{Placement, bounds_of},
        model::{ElementKey, LabelSpec, Model, ModelBuilder, NodeDef, Side, Variant},
        tier::Tier,
        visual::VisualState,
    },
    foundation::core::Point,
    foundation::error::PlexusResult,
    style::config::StyleConfig,
};

/// Names of the groupings every model carries.
pub mod groups {
    /// Every primary node and edge.
    pub const PLEXUS: &str = "plexus";
    /// C5, C6, C7, C8, T1.
    pub const ROOTS: &str = "roots";
    /// Root to trunk edges.
    pub const ROOT_EDGES: &str = "roots.edges";
    /// Superior, middle, inferior trunks.
    pub const TRUNKS: &str = "trunks";
    /// All six division nodes.
    pub const DIVISIONS: &str = "divisions";
    /// Trunk to anterior division edges.
    pub const ANTERIOR_DIVISIONS: &str = "divisions.anterior";
    /// Trunk to posterior division edges.
    pub const POSTERIOR_DIVISIONS: &str = "divisions.posterior";
    /// Lateral, posterior, medial cords.
    pub const CORDS: &str = "cords";
    /// Lateral cord node.
    pub const LATERAL_CORD: &str = "cord.lateral";
    /// Divisions feeding the lateral cord.
    pub const LATERAL_CORD_EDGES: &str = "cord.lateral.edges";
    /// Posterior cord node.
    pub const POSTERIOR_CORD: &str = "cord.posterior";
    /// Divisions feeding the posterior cord.
    pub const POSTERIOR_CORD_EDGES: &str = "cord.posterior.edges";
    /// Medial cord node.
    pub const MEDIAL_CORD: &str = "cord.medial";
    /// Division feeding the medial cord.
    pub const MEDIAL_CORD_EDGES: &str = "cord.medial.edges";
    /// The five terminal branches.
    pub const BRANCHES: &str = "branches";
    /// Musculocutaneous nerve.
    pub const MUSCULOCUTANEOUS: &str = "branch.musculocutaneous";
    /// Edges into the musculocutaneous nerve.
    pub const MUSCULOCUTANEOUS_EDGES: &str = "branch.musculocutaneous.edges";
    /// Axillary nerve.
    pub const AXILLARY: &str = "branch.axillary";
    /// Edges into the axillary nerve.
    pub const AXILLARY_EDGES: &str = "branch.axillary.edges";
    /// Radial nerve.
    pub const RADIAL: &str = "branch.radial";
    /// Edges into the radial nerve.
    pub const RADIAL_EDGES: &str = "branch.radial.edges";
    /// Median nerve.
    pub const MEDIAN: &str = "branch.median";
    /// Edges into the median nerve (lateral and medial roots).
    pub const MEDIAN_EDGES: &str = "branch.median.edges";
    /// Ulnar nerve.
    pub const ULNAR: &str = "branch.ulnar";
    /// Edges into the ulnar nerve.
    pub const ULNAR_EDGES: &str = "branch.ulnar.edges";

    /// All eleven non-terminal branches (extended model only).
    pub const NON_TERMINAL: &str = "non_terminal_branches";
    /// Branches from the roots.
    pub const NTB_ROOTS: &str = "ntb.roots";
    /// Edges of the branches from the roots.
    pub const NTB_ROOTS_EDGES: &str = "ntb.roots.edges";
    /// Branches from the superior trunk.
    pub const NTB_SUPERIOR_TRUNK: &str = "ntb.superior_trunk";
    /// Edges of the branches from the superior trunk.
    pub const NTB_SUPERIOR_TRUNK_EDGES: &str = "ntb.superior_trunk.edges";
    /// Branches from the lateral cord.
    pub const NTB_LATERAL_CORD: &str = "ntb.lateral_cord";
    /// Edges of the branches from the lateral cord.
    pub const NTB_LATERAL_CORD_EDGES: &str = "ntb.lateral_cord.edges";
    /// Branches from the medial cord.
    pub const NTB_MEDIAL_CORD: &str = "ntb.medial_cord";
    /// Edges of the branches from the medial cord.
    pub const NTB_MEDIAL_CORD_EDGES: &str = "ntb.medial_cord.edges";
    /// Branches from the posterior cord.
    pub const NTB_POSTERIOR_CORD: &str = "ntb.posterior_cord";
    /// Edges of the branches from the posterior cord.
    pub const NTB_POSTERIOR_CORD_EDGES: &str = "ntb.posterior_cord.edges";
}

struct NodeRow {
    id: &'static str,
    tier: Tier,
    rank: u32,
    name: &'static str,
    at: (f64, f64),
    side: Side,
    buff: f64,
    size: f64,
}

const fn row(
    id: &'static str,
    tier: Tier,
    rank: u32,
    name: &'static str,
    at: (f64, f64),
    side: Side,
    buff: f64,
    size: f64,
) -> NodeRow {
    NodeRow {
        id,
        tier,
        rank,
        name,
        at,
        side,
        buff,
        size,
    }
}

use Side::{Down, Left, Right, Up};
use Tier::{Branch, Cord, Division, NonTerminalBranch, Root, Trunk};

// The third column is the reveal rank within the tier.
const PRIMARY_NODES: &[NodeRow] = &[
    row("C5", Root, 1, "C5", (-6.0, 3.5), Left, 0.3, 14.0),
    row("C6", Root, 2, "C6", (-6.0, 2.3), Left, 0.3, 14.0),
    row("C7", Root, 3, "C7", (-6.0, 1.1), Left, 0.3, 14.0),
    row("C8", Root, 4, "C8", (-6.0, -0.1), Left, 0.3, 14.0),
    row("T1", Root, 5, "T1", (-6.0, -1.3), Left, 0.3, 14.0),
    row("ST", Trunk, 1, "Superior", (-4.2, 2.9), Up, 0.25, 11.0),
    row("MT", Trunk, 2, "Middle", (-4.2, 1.1), Up, 0.25, 11.0),
    row("IT", Trunk, 3, "Inferior", (-4.2, -0.7), Up, 0.25, 11.0),
    row("D_ST_A", Division, 1, "Superior trunk, anterior division", (-2.0, 3.2), Up, 0.1, 8.0),
    row("D_ST_P", Division, 2, "Superior trunk, posterior division", (-2.0, 2.5), Down, 0.1, 8.0),
    row("D_MT_A", Division, 3, "Middle trunk, anterior division", (-2.0, 1.4), Up, 0.1, 8.0),
    row("D_MT_P", Division, 4, "Middle trunk, posterior division", (-2.0, 0.7), Down, 0.1, 8.0),
    row("D_IT_A", Division, 5, "Inferior trunk, anterior division", (-2.0, -0.4), Up, 0.1, 8.0),
    row("D_IT_P", Division, 6, "Inferior trunk, posterior division", (-2.0, -1.1), Down, 0.1, 8.0),
    row("LC", Cord, 1, "Lateral", (0.3, 2.5), Up, 0.35, 11.0),
    row("PC", Cord, 2, "Posterior", (0.3, 0.6), Down, 0.35, 11.0),
    row("MC", Cord, 3, "Medial", (0.3, -1.2), Down, 0.35, 11.0),
    row("Musc", Branch, 1, "Musculocutaneous", (2.8, 3.2), Right, 0.25, 10.0),
    row("Ax", Branch, 2, "Axillary", (2.8, 2.0), Right, 0.25, 10.0),
    row("Rad", Branch, 3, "Radial", (2.8, 0.8), Right, 0.25, 10.0),
    row("Med", Branch, 4, "Median", (2.8, -0.4), Right, 0.25, 10.0),
    row("Uln", Branch, 5, "Ulnar", (2.8, -1.6), Right, 0.25, 10.0),
];

const PRIMARY_EDGES: &[(&str, &str)] = &[
    // roots -> trunks
    ("C5", "ST"),
    ("C6", "ST"),
    ("C7", "MT"),
    ("C8", "IT"),
    ("T1", "IT"),
    // trunks -> divisions
    ("ST", "D_ST_A"),
    ("ST", "D_ST_P"),
    ("MT", "D_MT_A"),
    ("MT", "D_MT_P"),
    ("IT", "D_IT_A"),
    ("IT", "D_IT_P"),
    // divisions -> cords
    ("D_ST_A", "LC"),
    ("D_MT_A", "LC"),
    ("D_ST_P", "PC"),
    ("D_MT_P", "PC"),
    ("D_IT_P", "PC"),
    ("D_IT_A", "MC"),
    // cords -> terminal branches
    ("LC", "Musc"),
    ("LC", "Med"),
    ("MC", "Med"),
    ("MC", "Uln"),
    ("PC", "Ax"),
    ("PC", "Rad"),
];

const EXTENDED_NODES: &[NodeRow] = &[
    row("DSc", NonTerminalBranch, 1, "Dorsal scapular", (-5.5, 4.4), Up, 0.15, 9.0),
    row("LTh", NonTerminalBranch, 2, "Long thoracic", (-4.5, 4.0), Up, 0.15, 9.0),
    row("SSc", NonTerminalBranch, 3, "Suprascapular", (-3.3, 4.4), Up, 0.15, 9.0),
    row("NSc", NonTerminalBranch, 4, "Nerve to subclavius", (-2.5, 3.95), Right, 0.15, 9.0),
    row("LPec", NonTerminalBranch, 5, "Lateral pectoral", (1.0, 3.9), Right, 0.15, 9.0),
    row("MPec", NonTerminalBranch, 6, "Medial pectoral", (1.0, -2.3), Right, 0.15, 9.0),
    row("MCA", NonTerminalBranch, 7, "Medial cutaneous n. of arm", (1.6, -2.75), Right, 0.15, 9.0),
    row("MCF", NonTerminalBranch, 8, "Medial cutaneous n. of forearm", (2.2, -3.2), Right, 0.15, 9.0),
    row("USs", NonTerminalBranch, 9, "Upper subscapular", (1.4, 1.75), Up, 0.15, 9.0),
    row("Thd", NonTerminalBranch, 10, "Thoracodorsal", (1.7, 0.15), Down, 0.15, 9.0),
    row("LSs", NonTerminalBranch, 11, "Lower subscapular", (1.0, -0.35), Down, 0.15, 9.0),
];

const EXTENDED_EDGES: &[(&str, &str)] = &[
    ("C5", "DSc"),
    ("C5", "LTh"),
    ("C6", "LTh"),
    ("C7", "LTh"),
    ("ST", "SSc"),
    ("ST", "NSc"),
    ("LC", "LPec"),
    ("MC", "MPec"),
    ("MC", "MCA"),
    ("MC", "MCF"),
    ("PC", "USs"),
    ("PC", "Thd"),
    ("PC", "LSs"),
];

struct GroupRow {
    name: &'static str,
    nodes: &'static [&'static str],
    edges: &'static [(&'static str, &'static str)],
}

const PRIMARY_GROUPS: &[GroupRow] = &[
    GroupRow {
        name: groups::ROOTS,
        nodes: &["C5", "C6", "C7", "C8", "T1"],
        edges: &[],
    },
    GroupRow {
        name: groups::ROOT_EDGES,
        nodes: &[],
        edges: &[("C5", "ST"), ("C6", "ST"), ("C7", "MT"), ("C8", "IT"), ("T1", "IT")],
    },
    GroupRow {
        name: groups::TRUNKS,
        nodes: &["ST", "MT", "IT"],
        edges: &[],
    },
    GroupRow {
        name: groups::DIVISIONS,
        nodes: &["D_ST_A", "D_ST_P", "D_MT_A", "D_MT_P", "D_IT_A", "D_IT_P"],
        edges: &[],
    },
    GroupRow {
        name: groups::ANTERIOR_DIVISIONS,
        nodes: &[],
        edges: &[("ST", "D_ST_A"), ("MT", "D_MT_A"), ("IT", "D_IT_A")],
    },
    GroupRow {
        name: groups::POSTERIOR_DIVISIONS,
        nodes: &[],
        edges: &[("ST", "D_ST_P"), ("MT", "D_MT_P"), ("IT", "D_IT_P")],
    },
    GroupRow {
        name: groups::CORDS,
        nodes: &["LC", "PC", "MC"],
        edges: &[],
    },
    GroupRow {
        name: groups::LATERAL_CORD,
        nodes: &["LC"],
        edges: &[],
    },
    GroupRow {
        name: groups::LATERAL_CORD_EDGES,
        nodes: &[],
        edges: &[("D_ST_A", "LC"), ("D_MT_A", "LC")],
    },
    GroupRow {
        name: groups::POSTERIOR_CORD,
        nodes: &["PC"],
        edges: &[],
    },
    GroupRow {
        name: groups::POSTERIOR_CORD_EDGES,
        nodes: &[],
        edges: &[("D_ST_P", "PC"), ("D_MT_P", "PC"), ("D_IT_P", "PC")],
    },
    GroupRow {
        name: groups::MEDIAL_CORD,
        nodes: &["MC"],
        edges: &[],
    },
    GroupRow {
        name: groups::MEDIAL_CORD_EDGES,
        nodes: &[],
        edges: &[("D_IT_A", "MC")],
    },
    GroupRow {
        name: groups::BRANCHES,
        nodes: &["Musc", "Ax", "Rad", "Med", "Uln"],
        edges: &[],
    },
    GroupRow {
        name: groups::MUSCULOCUTANEOUS,
        nodes: &["Musc"],
        edges: &[],
    },
    GroupRow {
        name: groups::MUSCULOCUTANEOUS_EDGES,
        nodes: &[],
        edges: &[("LC", "Musc")],
    },
    GroupRow {
        name: groups::AXILLARY,
        nodes: &["Ax"],
        edges: &[],
    },
    GroupRow {
        name: groups::AXILLARY_EDGES,
        nodes: &[],
        edges: &[("PC", "Ax")],
    },
    GroupRow {
        name: groups::RADIAL,
        nodes: &["Rad"],
        edges: &[],
    },
    GroupRow {
        name: groups::RADIAL_EDGES,
        nodes: &[],
        edges: &[("PC", "Rad")],
    },
    GroupRow {
        name: groups::MEDIAN,
        nodes: &["Med"],
        edges: &[],
    },
    GroupRow {
        name: groups::MEDIAN_EDGES,
        nodes: &[],
        edges: &[("LC", "Med"), ("MC", "Med")],
    },
    GroupRow {
        name: groups::ULNAR,
        nodes: &["Uln"],
        edges: &[],
    },
    GroupRow {
        name: groups::ULNAR_EDGES,
        nodes: &[],
        edges: &[("MC", "Uln")],
    },
];

const EXTENDED_GROUPS: &[GroupRow] = &[
    GroupRow {
        name: groups::NON_TERMINAL,
        nodes: &[
            "DSc", "LTh", "SSc", "NSc", "LPec", "MPec", "MCA", "MCF", "USs", "Thd", "LSs",
        ],
        edges: &[],
    },
    GroupRow {
        name: groups::NTB_ROOTS,
        nodes: &["DSc", "LTh"],
        edges: &[],
    },
    GroupRow {
        name: groups::NTB_ROOTS_EDGES,
        nodes: &[],
        edges: &[("C5", "DSc"), ("C5", "LTh"), ("C6", "LTh"), ("C7", "LTh")],
    },
    GroupRow {
        name: groups::NTB_SUPERIOR_TRUNK,
        nodes: &["SSc", "NSc"],
        edges: &[],
    },
    GroupRow {
        name: groups::NTB_SUPERIOR_TRUNK_EDGES,
        nodes: &[],
        edges: &[("ST", "SSc"), ("ST", "NSc")],
    },
    GroupRow {
        name: groups::NTB_LATERAL_CORD,
        nodes: &["LPec"],
        edges: &[],
    },
    GroupRow {
        name: groups::NTB_LATERAL_CORD_EDGES,
        nodes: &[],
        edges: &[("LC", "LPec")],
    },
    GroupRow {
        name: groups::NTB_MEDIAL_CORD,
        nodes: &["MPec", "MCA", "MCF"],
        edges: &[],
    },
    GroupRow {
        name: groups::NTB_MEDIAL_CORD_EDGES,
        nodes: &[],
        edges: &[("MC", "MPec"), ("MC", "MCA"), ("MC", "MCF")],
    },
    GroupRow {
        name: groups::NTB_POSTERIOR_CORD,
        nodes: &["USs", "Thd", "LSs"],
        edges: &[],
    },
    GroupRow {
        name: groups::NTB_POSTERIOR_CORD_EDGES,
        nodes: &[],
        edges: &[("PC", "USs"), ("PC", "Thd"), ("PC", "LSs")],
    },
];

fn group_members(row: &GroupRow) -> Vec<ElementKey> {
    row.nodes
        .iter()
        .map(|id| ElementKey::node(*id))
        .chain(row.edges.iter().map(|(s, t)| ElementKey::edge(*s, *t)))
        .collect()
}

/// Construct the plexus model for `variant`, placed on screen by `placement`.
#[tracing::instrument(skip(style))]
pub fn build_model(
    variant: Variant,
    placement: &Placement,
    style: &StyleConfig,
) -> PlexusResult<Model> {
    placement.validate()?;
    style.validate()?;

    let bounds = bounds_of(PRIMARY_NODES.iter().map(|r| Point::new(r.at.0, r.at.1)))?;
    let xform = placement.transform(bounds);

    let (node_tables, edge_tables, group_tables): (Vec<&[NodeRow]>, Vec<&[(&str, &str)]>, Vec<&[GroupRow]>) =
        match variant {
            Variant::Primary => (vec![PRIMARY_NODES], vec![PRIMARY_EDGES], vec![PRIMARY_GROUPS]),
            Variant::Extended => (
                vec![PRIMARY_NODES, EXTENDED_NODES],
                vec![PRIMARY_EDGES, EXTENDED_EDGES],
                vec![PRIMARY_GROUPS, EXTENDED_GROUPS],
            ),
        };

    let palette = &style.palette;
    let geometry = &style.geometry;
    let mut builder = ModelBuilder::new(variant);

    for r in node_tables.iter().flat_map(|t| t.iter()) {
        let base_radius = if r.tier == Tier::Division {
            geometry.division_radius
        } else {
            geometry.node_radius
        };
        builder = builder.node(NodeDef {
            id: r.id.to_string(),
            tier: r.tier,
            display_name: r.name.to_string(),
            position: xform * Point::new(r.at.0, r.at.1),
            radius: base_radius * placement.scale,
            label: LabelSpec {
                side: r.side,
                buff: r.buff,
                size: r.size,
            },
            rank: r.rank,
            visual: VisualState::node(palette.neutral_node, palette.label),
        });
    }

    for (s, t) in edge_tables.iter().flat_map(|t| t.iter()) {
        builder = builder.edge(
            *s,
            *t,
            VisualState::edge(palette.neutral_edge, geometry.edge_stroke_width),
        );
    }

    let plexus: Vec<ElementKey> = PRIMARY_NODES
        .iter()
        .map(|r| ElementKey::node(r.id))
        .chain(PRIMARY_EDGES.iter().map(|(s, t)| ElementKey::edge(*s, *t)))
        .collect();
    builder = builder.grouping(groups::PLEXUS, plexus);
    for g in group_tables.iter().flat_map(|t| t.iter()) {
        builder = builder.grouping(g.name, group_members(g));
    }

    builder.build()
}

#[cfg(test)]
#[path = "../../tests/unit/anatomy/topology.rs"]
mod tests;
