//! Non-terminal branches, grouped by the structure that gives them off.

use crate::{
    anatomy::{layout::Placement, model::Variant, topology::groups},
    foundation::core::{Point, Rgba8},
    scene::{
        caption::CaptionSpec,
        step::{Action, Operation, Scene, Step},
    },
    style::config::StyleConfig,
};

struct Parent {
    id: &'static str,
    heading: &'static str,
    names: &'static [&'static str],
    nodes: &'static str,
    edges: &'static str,
}

const PARENTS: &[Parent] = &[
    Parent {
        id: "roots",
        heading: "From the roots",
        names: &["Dorsal scapular (C5)", "Long thoracic (C5-C7)"],
        nodes: groups::NTB_ROOTS,
        edges: groups::NTB_ROOTS_EDGES,
    },
    Parent {
        id: "superior_trunk",
        heading: "From the superior trunk",
        names: &["Suprascapular", "Nerve to subclavius"],
        nodes: groups::NTB_SUPERIOR_TRUNK,
        edges: groups::NTB_SUPERIOR_TRUNK_EDGES,
    },
    Parent {
        id: "lateral_cord",
        heading: "From the lateral cord",
        names: &["Lateral pectoral"],
        nodes: groups::NTB_LATERAL_CORD,
        edges: groups::NTB_LATERAL_CORD_EDGES,
    },
    Parent {
        id: "medial_cord",
        heading: "From the medial cord",
        names: &[
            "Medial pectoral",
            "Medial cutaneous n. of arm",
            "Medial cutaneous n. of forearm",
        ],
        nodes: groups::NTB_MEDIAL_CORD,
        edges: groups::NTB_MEDIAL_CORD_EDGES,
    },
    Parent {
        id: "posterior_cord",
        heading: "From the posterior cord",
        names: &["Upper subscapular", "Thoracodorsal", "Lower subscapular"],
        nodes: groups::NTB_POSTERIOR_CORD,
        edges: groups::NTB_POSTERIOR_CORD_EDGES,
    },
];

fn parent_color(id: &str, style: &StyleConfig) -> Rgba8 {
    let p = &style.palette;
    match id {
        "roots" => p.root,
        "superior_trunk" => p.trunk,
        "lateral_cord" => p.cord_lateral,
        "medial_cord" => p.cord_medial,
        _ => p.cord_posterior,
    }
}

/// Build the non-terminal branches scene.
pub fn script(style: &StyleConfig) -> Scene {
    let p = &style.palette;
    let mut steps = Vec::new();

    let title = CaptionSpec::text("title", Point::new(0.0, 3.45), 48.0, p.title).bold("Non-Terminal Branches");
    steps.push(Step::play("title", 1.0, Action::stage(Operation::ShowCaption(title))));
    steps.push(Step::hold(0.5));
    steps.push(Step::play("plexus.reveal", 2.0, Action::on(groups::PLEXUS, Operation::Reveal)));

    let tint = |name: &str, color: Rgba8| Action::on(name, Operation::Recolor(color));
    steps.push(Step::together(
        "plexus.tint",
        1.2,
        vec![
            tint(groups::ROOTS, p.root),
            tint(groups::ROOT_EDGES, p.root),
            tint(groups::TRUNKS, p.trunk),
            tint(groups::ANTERIOR_DIVISIONS, p.division_anterior),
            tint(groups::POSTERIOR_DIVISIONS, p.division_posterior),
            tint(groups::LATERAL_CORD, p.cord_lateral),
            tint(groups::LATERAL_CORD_EDGES, p.cord_lateral),
            tint(groups::POSTERIOR_CORD, p.cord_posterior),
            tint(groups::POSTERIOR_CORD_EDGES, p.cord_posterior),
            tint(groups::MEDIAL_CORD, p.cord_medial),
            tint(groups::MEDIAL_CORD_EDGES, p.cord_medial),
        ],
    ));
    steps.push(Step::hold(1.0));

    for parent in PARENTS {
        let color = parent_color(parent.id, style);
        let heading_id = format!("heading.{}", parent.id);
        let mut heading = CaptionSpec::text(heading_id.as_str(), Point::new(-6.6, 0.6), 22.0, color)
            .bold(parent.heading)
            .left_aligned();
        for n in parent.names {
            heading = heading.line(*n);
        }

        steps.push(Step::play(
            format!("{heading_id}.show"),
            0.6,
            Action::stage(Operation::ShowCaption(heading)),
        ));
        steps.push(Step::together(
            format!("ntb.{}.reveal", parent.id),
            1.2,
            vec![
                Action::on(parent.edges, Operation::Reveal).lagged(0.2),
                Action::on(parent.nodes, Operation::Reveal).lagged(0.2),
            ],
        ));
        steps.push(Step::together(
            format!("ntb.{}.color", parent.id),
            0.8,
            vec![
                Action::on(parent.edges, Operation::Recolor(color)),
                Action::on(parent.nodes, Operation::Recolor(color)),
            ],
        ));
        steps.push(Step::play(
            format!("ntb.{}.labels", parent.id),
            1.0,
            Action::on(parent.nodes, Operation::Label { color: Some(color) }).lagged(0.15),
        ));
        steps.push(Step::hold(1.5));
        steps.push(Step::play(
            format!("{heading_id}.remove"),
            0.4,
            Action::stage(Operation::RemoveCaption(heading_id.clone())),
        ));
    }
    steps.push(Step::hold(2.0));

    Scene {
        name: "NonTerminalBranches".to_string(),
        variant: Variant::Extended,
        placement: Placement::catalog(),
        groupings: Vec::new(),
        steps,
    }
}
