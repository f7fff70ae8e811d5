//! Tier-by-tier walk through the primary plexus, with the R/T/D/C/B mnemonic on the left.

use crate::{
    anatomy::{layout::Placement, model::Variant, topology::groups},
    foundation::core::{Point, Rgba8, Seconds},
    scene::{
        caption::CaptionSpec,
        step::{Action, Operation, Scene, Step},
    },
    style::config::StyleConfig,
};

const MNEMONIC_X: f64 = -6.55;
const MNEMONIC_SIZE: f64 = 20.0;

fn mnemonic(id: &str, y: f64, color: Rgba8, head: &str, body: &str) -> Step {
    let caption = CaptionSpec::text(id, Point::new(MNEMONIC_X, y), MNEMONIC_SIZE, color)
        .bold(head)
        .line(body)
        .left_aligned();
    Step::play(id, 0.8, Action::stage(Operation::ShowCaption(caption)))
}

fn pulse(color: Rgba8, factor: f64, settle: f64) -> Operation {
    Operation::Pulse {
        color: Some(color),
        factor,
        settle: Seconds(settle),
    }
}

fn badge(id: &str, text: &str, y: f64, color: Rgba8, style: &StyleConfig) -> Step {
    let at = Point::new(0.8, y);
    let panel = CaptionSpec::panel(
        format!("{id}.panel"),
        at,
        1.3,
        0.4,
        style.palette.panel_fill,
        0.9,
        color,
        2.0,
    )
    .corner_radius(0.1);
    let label = CaptionSpec::text(id, at, 13.0, color).bold(text);
    Step::together(
        id,
        0.8,
        vec![
            Action::stage(Operation::ShowCaption(panel)),
            Action::stage(Operation::ShowCaption(label)),
        ],
    )
}

fn cord_steps(
    out: &mut Vec<Step>,
    name: &str,
    node: &str,
    edges: &str,
    color: Rgba8,
    edge_time: f64,
    style: &StyleConfig,
) {
    let g = &style.geometry;
    out.push(Step::play(
        format!("{name}.pulse"),
        0.8,
        Action::on(node, pulse(color, g.pulse_factor, 0.4)),
    ));
    out.push(Step::play(
        format!("{name}.edges"),
        edge_time,
        Action::on(edges, Operation::Recolor(color)).one_by_one(),
    ));
    out.push(Step::play(
        format!("{name}.label"),
        0.6,
        Action::on(node, Operation::Label { color: Some(color) }),
    ));
}

/// Build the overview scene.
pub fn script(style: &StyleConfig) -> Scene {
    let p = &style.palette;
    let g = &style.geometry;
    let mut steps = Vec::new();

    let title = CaptionSpec::text("title", Point::new(0.0, 3.4), 56.0, p.title).bold("The Brachial Plexus");
    steps.push(Step::play("title", 1.0, Action::stage(Operation::ShowCaption(title))));
    steps.push(Step::hold(1.0));

    let panel = CaptionSpec::panel(
        "mnemonic.panel",
        Point::new(-5.5, 0.0),
        2.6,
        4.6,
        p.panel_fill,
        0.95,
        p.panel_stroke,
        3.0,
    );
    steps.push(Step::play(
        "mnemonic.panel",
        0.5,
        Action::stage(Operation::ShowCaption(panel)),
    ));

    // Roots
    steps.push(mnemonic("mnemonic.roots", 1.8, p.root, "R: Roots", "C5-T1"));
    steps.push(Step::play("plexus.reveal", 2.5, Action::on(groups::PLEXUS, Operation::Reveal)));
    steps.push(Step::hold(0.5));
    steps.push(Step::play(
        "roots.pulse",
        1.5,
        Action::on(groups::ROOTS, pulse(p.root, g.pulse_factor, 0.8)).lagged(0.15),
    ));
    steps.push(Step::play(
        "roots.edges",
        1.2,
        Action::on(groups::ROOT_EDGES, Operation::Recolor(p.root)).lagged(0.1),
    ));
    steps.push(Step::play(
        "roots.labels",
        1.5,
        Action::on(groups::ROOTS, Operation::Label { color: None }).lagged(0.15),
    ));
    steps.push(Step::hold(2.0));

    // Trunks
    steps.push(mnemonic("mnemonic.trunks", 0.9, p.trunk, "T: Trunks", "Sup, Mid, Inf"));
    steps.push(Step::play(
        "trunks.pulse",
        1.5,
        Action::on(groups::TRUNKS, pulse(p.trunk, g.pulse_factor, 0.8)).lagged(0.15),
    ));
    steps.push(Step::play(
        "trunks.labels",
        1.5,
        Action::on(groups::TRUNKS, Operation::Label { color: Some(p.trunk) }).lagged(0.15),
    ));
    steps.push(Step::hold(2.0));

    // Divisions
    steps.push(mnemonic(
        "mnemonic.divisions",
        0.0,
        p.division_anterior,
        "D: Divisions",
        "Ant, Post",
    ));
    steps.push(Step::play(
        "divisions.anterior",
        1.2,
        Action::on(groups::ANTERIOR_DIVISIONS, Operation::Recolor(p.division_anterior))
            .lagged(0.1),
    ));
    steps.push(badge("badge.anterior", "Anterior", 2.5, p.division_anterior, style));
    steps.push(Step::hold(0.3));
    steps.push(Step::play(
        "divisions.posterior",
        1.2,
        Action::on(groups::POSTERIOR_DIVISIONS, Operation::Recolor(p.division_posterior))
            .lagged(0.1),
    ));
    steps.push(badge("badge.posterior", "Posterior", -2.2, p.division_posterior, style));
    steps.push(Step::hold(2.0));

    // Cords
    steps.push(mnemonic(
        "mnemonic.cords",
        -0.9,
        p.cord_lateral,
        "C: Cords",
        "Lat, Med, Post",
    ));
    cord_steps(
        &mut steps,
        "cord.lateral",
        groups::LATERAL_CORD,
        groups::LATERAL_CORD_EDGES,
        p.cord_lateral,
        0.4,
        style,
    );
    steps.push(Step::hold(0.3));
    cord_steps(
        &mut steps,
        "cord.posterior",
        groups::POSTERIOR_CORD,
        groups::POSTERIOR_CORD_EDGES,
        p.cord_posterior,
        0.3,
        style,
    );
    steps.push(Step::hold(0.3));
    cord_steps(
        &mut steps,
        "cord.medial",
        groups::MEDIAL_CORD,
        groups::MEDIAL_CORD_EDGES,
        p.cord_medial,
        0.4,
        style,
    );
    steps.push(Step::hold(2.0));

    // Terminal branches
    steps.push(mnemonic(
        "mnemonic.branches",
        -1.8,
        p.branch_musculocutaneous,
        "B: Branches",
        "Terminal nerves",
    ));
    let branches = [
        ("branch.musculocutaneous", groups::MUSCULOCUTANEOUS, groups::MUSCULOCUTANEOUS_EDGES, p.branch_musculocutaneous),
        ("branch.axillary", groups::AXILLARY, groups::AXILLARY_EDGES, p.branch_axillary),
        ("branch.radial", groups::RADIAL, groups::RADIAL_EDGES, p.branch_radial),
        ("branch.median", groups::MEDIAN, groups::MEDIAN_EDGES, p.branch_median),
        ("branch.ulnar", groups::ULNAR, groups::ULNAR_EDGES, p.branch_ulnar),
    ];
    for (name, node, edges, color) in branches {
        steps.push(Step::play(
            format!("{name}.pulse"),
            0.6,
            Action::on(node, pulse(color, g.branch_pulse_factor, 0.3)),
        ));
        steps.push(Step::play(
            format!("{name}.edges"),
            0.4,
            Action::on(edges, Operation::Recolor(color)).one_by_one(),
        ));
        steps.push(Step::play(
            format!("{name}.label"),
            0.5,
            Action::on(node, Operation::Label { color: Some(color) }),
        ));
        steps.push(Step::hold(0.4));
    }
    steps.push(Step::hold(3.0));

    Scene {
        name: "Overview".to_string(),
        variant: Variant::Primary,
        placement: Placement::overview(),
        groupings: Vec::new(),
        steps,
    }
}
