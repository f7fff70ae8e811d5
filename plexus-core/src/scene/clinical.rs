//! Clinical vignettes: an injured segment of the plexus traced to the branches it silences,
//! next to a card summarizing the presentation.

use crate::{
    anatomy::{
        layout::Placement,
        model::{ElementKey, Variant},
        topology::groups,
    },
    foundation::core::{Point, Rgba8, Seconds},
    scene::{
        caption::CaptionSpec,
        step::{Action, Operation, Scene, SceneGrouping, Step},
    },
    style::config::StyleConfig,
};

const CARD_X: f64 = 3.7;

/// Text and anatomy of one palsy.
struct Vignette {
    scene: &'static str,
    prefix: &'static str,
    title: &'static str,
    injured: &'static [&'static str],
    pathway: &'static [Element],
    affected: &'static [&'static str],
    mechanism: &'static str,
    injury_site: &'static str,
    result: &'static str,
    bullets: [&'static str; 3],
    associated: Option<&'static str>,
}

enum Element {
    Node(&'static str),
    Edge(&'static str, &'static str),
}

use Element::{Edge, Node};

const ERB: Vignette = Vignette {
    scene: "ErbsPalsy",
    prefix: "erb",
    title: "Clinical Correlate: Erb's Palsy",
    injured: &["C5", "C6", "ST"],
    pathway: &[
        Edge("C5", "ST"),
        Edge("C6", "ST"),
        Edge("ST", "D_ST_A"),
        Node("D_ST_A"),
        Edge("ST", "D_ST_P"),
        Node("D_ST_P"),
        Edge("D_ST_A", "LC"),
        Node("LC"),
        Edge("D_ST_P", "PC"),
        Node("PC"),
        Edge("LC", "Musc"),
        Edge("PC", "Ax"),
    ],
    affected: &["Musc", "Ax"],
    mechanism: "Lateral traction on neck",
    injury_site: "C5, C6 (Superior Trunk)",
    result: "Result: 'Waiter's Tip' Posture",
    bullets: [
        "• Arm adducted, internally rotated",
        "• Elbow extended",
        "• Forearm pronated",
    ],
    associated: None,
};

const KLUMPKE: Vignette = Vignette {
    scene: "KlumpkesPalsy",
    prefix: "klumpke",
    title: "Clinical Correlate: Klumpke's Palsy",
    injured: &["C8", "T1", "IT"],
    pathway: &[
        Edge("C8", "IT"),
        Edge("T1", "IT"),
        Edge("IT", "D_IT_A"),
        Node("D_IT_A"),
        Edge("D_IT_A", "MC"),
        Node("MC"),
        Edge("MC", "Uln"),
        Edge("MC", "Med"),
    ],
    affected: &["Uln", "Med"],
    mechanism: "Hyper-abduction of arm",
    injury_site: "C8, T1 (Inferior Trunk)",
    result: "Result: 'Claw Hand' Deformity",
    bullets: [
        "• Paralysis of intrinsic hand muscles",
        "• Hyperextension of MCP joints",
        "• Flexion of IP joints",
    ],
    associated: Some("Associated: Horner's Syndrome (T1 injury)"),
};

fn nodes(ids: &[&str]) -> Vec<ElementKey> {
    ids.iter().map(|id| ElementKey::node(*id)).collect()
}

fn show(name: impl Into<String>, run_time: f64, caption: CaptionSpec) -> Step {
    Step::play(name, run_time, Action::stage(Operation::ShowCaption(caption)))
}

fn script(v: &Vignette, accent: Rgba8, result_color: Rgba8, style: &StyleConfig) -> Scene {
    let p = &style.palette;
    let g = &style.geometry;
    let name = |suffix: &str| format!("{}.{suffix}", v.prefix);

    let injured = name("injured");
    let pathway = name("pathway");
    let affected = name("affected");
    let spared = name("spared");
    let groupings = vec![
        SceneGrouping::Explicit {
            name: injured.clone(),
            members: nodes(v.injured),
        },
        SceneGrouping::Explicit {
            name: pathway.clone(),
            members: v
                .pathway
                .iter()
                .map(|e| match e {
                    Node(id) => ElementKey::node(*id),
                    Edge(s, t) => ElementKey::edge(*s, *t),
                })
                .collect(),
        },
        SceneGrouping::Explicit {
            name: affected.clone(),
            members: nodes(v.affected),
        },
        SceneGrouping::Complement {
            name: spared.clone(),
            of: vec![injured.clone(), pathway.clone(), affected.clone()],
        },
    ];

    let mut steps = Vec::new();
    let title = CaptionSpec::text("title", Point::new(0.0, 3.45), 44.0, p.title).bold(v.title);
    steps.push(show("title", 1.0, title));
    steps.push(Step::hold(0.5));

    steps.push(Step::play(
        "plexus.reveal",
        2.0,
        Action::on(groups::PLEXUS, Operation::Reveal),
    ));
    steps.push(Step::play(
        "spared.dim",
        1.0,
        Action::on(spared, Operation::Fade { opacity: g.dim_opacity }),
    ));
    steps.push(Step::play(
        "injured.pulse",
        1.2,
        Action::on(
            injured.clone(),
            Operation::Pulse {
                color: Some(p.injury),
                factor: g.pulse_factor,
                settle: Seconds(0.6),
            },
        )
        .lagged(0.15),
    ));
    steps.push(Step::play(
        "injured.labels",
        0.8,
        Action::on(injured, Operation::Label { color: Some(p.injury) }).lagged(0.15),
    ));
    steps.push(Step::play(
        "pathway.highlight",
        1.5,
        Action::on(
            pathway,
            Operation::Highlight {
                color: p.injury,
                stroke_width: g.highlight_stroke_width,
            },
        )
        .lagged(0.1),
    ));
    steps.push(Step::together(
        "affected",
        0.8,
        vec![
            Action::on(affected.clone(), Operation::Recolor(p.injury)),
            Action::on(affected, Operation::Label { color: Some(p.injury) }),
        ],
    ));
    steps.push(Step::hold(0.5));

    let card = CaptionSpec::panel(
        "card",
        Point::new(CARD_X, -0.4),
        6.2,
        5.0,
        p.panel_fill,
        0.9,
        accent,
        2.5,
    );
    steps.push(show("card", 1.0, card));
    steps.push(show(
        "card.mechanism",
        1.0,
        CaptionSpec::text("card.mechanism", Point::new(CARD_X, 1.35), 24.0, p.title)
            .bold("Mechanism:")
            .line(v.mechanism),
    ));
    let site_at = Point::new(CARD_X, 0.45);
    steps.push(show(
        "card.injury_site",
        1.0,
        CaptionSpec::text("card.injury_site", site_at, 24.0, p.injury)
            .bold("Injury Site:")
            .line(v.injury_site),
    ));
    steps.push(Step::play(
        "card.flash",
        1.0,
        Action::stage(Operation::Flash {
            at: site_at,
            color: p.flash,
            radius: 0.8,
        }),
    ));
    steps.push(Step::hold(0.5));
    steps.push(show(
        "card.result",
        0.8,
        CaptionSpec::text("card.result", Point::new(CARD_X, -0.45), 22.0, result_color).bold(v.result),
    ));
    let [a, b, c] = v.bullets;
    steps.push(show(
        "card.posture",
        1.2,
        CaptionSpec::text("card.posture", Point::new(CARD_X, -1.6), 19.0, p.title)
            .line(a)
            .line(b)
            .line(c),
    ));
    if let Some(text) = v.associated {
        steps.push(show(
            "associated",
            0.8,
            CaptionSpec::text("associated", Point::new(0.0, -3.45), 20.0, p.flash).bold(text),
        ));
    }
    steps.push(Step::hold(3.0));

    Scene {
        name: v.scene.to_string(),
        variant: Variant::Primary,
        placement: Placement::clinical(),
        groupings,
        steps,
    }
}

/// Build the Erb's palsy scene (upper trunk injury).
pub fn erbs_palsy(style: &StyleConfig) -> Scene {
    script(&ERB, style.palette.root, style.palette.root, style)
}

/// Build the Klumpke's palsy scene (lower trunk injury).
pub fn klumpkes_palsy(style: &StyleConfig) -> Scene {
    script(
        &KLUMPKE,
        style.palette.branch_ulnar,
        style.palette.branch_median,
        style,
    )
}
