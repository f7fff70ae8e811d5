use super::*;
use crate::anatomy::{layout::Placement, model::Variant, topology::groups};
use crate::foundation::core::Point;
use crate::render::{port::Ack, recording::RecordingRenderer};
use crate::scene::{caption::CaptionSpec, step::Action, step::Step};

fn scene(steps: Vec<Step>) -> Scene {
    Scene {
        name: "runner".to_string(),
        variant: Variant::Primary,
        placement: Placement::overview(),
        groupings: Vec::new(),
        steps,
    }
}

fn run(s: &Scene) -> (RunReport, Vec<RenderCall>, Model) {
    let model = s.build_model(&StyleConfig::default()).unwrap();
    let mut rec = RecordingRenderer::new();
    let mut run = SceneRun::new(s, model);
    let report = run.run(&mut rec).unwrap();
    assert_eq!(run.state(), RunState::Completed);
    (report, rec.into_calls(), run.into_model())
}

const RED: Rgba8 = Rgba8::rgb(0xff, 0, 0);

#[test]
fn lagged_reveal_is_one_staggered_call() {
    let s = scene(vec![Step::play(
        "roots",
        1.5,
        Action::on(groups::ROOTS, Operation::Reveal).lagged(0.15),
    )]);
    let (report, calls, _) = run(&s);
    assert_eq!(report.calls, 1);
    let items = calls[0].items();
    assert_eq!(items.len(), 5);
    assert!(items.windows(2).all(|w| w[0].offset.0 < w[1].offset.0));
    let last = &items[4];
    assert!((last.offset.0 + last.duration.0 - 1.5).abs() < 1e-9);
    assert!(matches!(&items[0].request, RenderRequest::CreateNode { id, .. } if id == "C5"));
}

#[test]
fn one_by_one_issues_a_call_per_member() {
    let s = scene(vec![
        Step::play("reveal", 1.0, Action::on(groups::PLEXUS, Operation::Reveal)),
        Step::play(
            "edges",
            0.4,
            Action::on(groups::ROOT_EDGES, Operation::Recolor(RED)).one_by_one(),
        ),
    ]);
    let (report, calls, model) = run(&s);
    assert_eq!(report.calls, 6);
    assert!(calls[1..].iter().all(|c| c.items().len() == 1 && c.duration() == Seconds(0.4)));
    assert_eq!(model.visual(&ElementKey::edge("C5", "ST")).unwrap().color, RED);
    assert!((report.duration.0 - 3.0).abs() < 1e-9);
}

#[test]
fn pulse_goes_up_then_settles_back() {
    let s = scene(vec![
        Step::play("reveal", 1.0, Action::on(groups::ROOTS, Operation::Reveal)),
        Step::play(
            "pulse",
            1.5,
            Action::on(
                groups::ROOTS,
                Operation::Pulse {
                    color: Some(RED),
                    factor: 1.2,
                    settle: Seconds(0.8),
                },
            )
            .lagged(0.15),
        ),
    ]);
    let (report, calls, model) = run(&s);
    assert_eq!(report.calls, 3);
    assert_eq!(calls[1].duration(), Seconds(1.5));
    assert_eq!(calls[2].duration(), Seconds(0.8));

    let RenderRequest::Mutate { to, mutations, .. } = &calls[1].items()[0].request else {
        panic!("expected a mutation");
    };
    assert_eq!(mutations.len(), 2);
    assert!((to.scale - 1.2).abs() < 1e-12);

    let c5 = model.visual(&ElementKey::node("C5")).unwrap();
    assert!((c5.scale - 1.0).abs() < 1e-12);
    assert_eq!(c5.color, RED);
}

#[test]
fn reveal_skips_elements_already_drawn() {
    let s = scene(vec![
        Step::play("roots", 1.0, Action::on(groups::ROOTS, Operation::Reveal)),
        Step::play("all", 1.0, Action::on(groups::PLEXUS, Operation::Reveal).lagged(0.1)),
    ]);
    let model = s.build_model(&StyleConfig::default()).unwrap();
    let total = model.grouping(groups::PLEXUS).unwrap().members().len();
    let (_, calls, _) = run(&s);
    assert_eq!(calls[1].items().len(), total - 5);
    assert!(calls[1].items().iter().all(|i| !matches!(
        &i.request,
        RenderRequest::CreateNode { id, .. } if id.starts_with('C') || id == "T1"
    )));
}

#[test]
fn labels_are_written_and_recorded_on_the_model() {
    let s = scene(vec![
        Step::play("reveal", 1.0, Action::on(groups::ROOTS, Operation::Reveal)),
        Step::play("label", 1.0, Action::on(groups::ROOTS, Operation::Label { color: None })),
    ]);
    let (_, calls, model) = run(&s);
    let items = calls[1].items();
    assert_eq!(items.len(), 10);
    let c5 = model.get_node("C5").unwrap();
    assert!(c5.visual().label_visible);
    let RenderRequest::WriteLabel { text, anchor, .. } = &items[1].request else {
        panic!("expected a label write");
    };
    assert_eq!(text, "C5");
    assert!(anchor.x < c5.position().x);
    assert_eq!(items[0].offset, items[1].offset);

    let s = scene(vec![
        Step::play("label", 1.0, Action::on(groups::ROOTS, Operation::Label { color: Some(RED) })),
        Step::play("unlabel", 1.0, Action::on(groups::ROOTS, Operation::Unlabel)),
    ]);
    let (_, calls, model) = run(&s);
    assert!(matches!(&calls[1].items()[1].request, RenderRequest::RemoveLabel { node } if node == "C5"));
    let c5 = model.visual(&ElementKey::node("C5")).unwrap();
    assert!(!c5.label_visible);
    assert_eq!(c5.label_color, RED);
}

#[test]
fn highlight_thickens_edges_only() {
    let s = scene(vec![
        Step::play(
            "hi",
            1.0,
            Action::on(groups::LATERAL_CORD, Operation::Highlight { color: RED, stroke_width: 9.0 }),
        ),
        Step::play(
            "hi edges",
            1.0,
            Action::on(groups::LATERAL_CORD_EDGES, Operation::Highlight { color: RED, stroke_width: 9.0 }),
        ),
    ]);
    let (_, _, model) = run(&s);
    let lc = model.visual(&ElementKey::node("LC")).unwrap();
    assert_eq!(lc.color, RED);
    assert_eq!(lc.stroke_width, 0.0);
    let edge = model.visual(&ElementKey::edge("D_ST_A", "LC")).unwrap();
    assert_eq!(edge.stroke_width, 9.0);
}

#[test]
fn simultaneous_steps_bundle_each_phase() {
    let caption = CaptionSpec::text("t", Point::new(0.0, 3.0), 30.0, RED).line("Title");
    let s = scene(vec![
        Step::together(
            "open",
            1.0,
            vec![
                Action::on(groups::ROOTS, Operation::Reveal),
                Action::stage(Operation::ShowCaption(caption)),
            ],
        ),
        Step::together(
            "mix",
            1.2,
            vec![
                Action::on(
                    groups::ROOTS,
                    Operation::Pulse {
                        color: None,
                        factor: 1.5,
                        settle: Seconds(0.5),
                    },
                ),
                Action::on(groups::ROOTS, Operation::Fade { opacity: 0.5 }),
            ],
        ),
        Step::hold(2.0),
    ]);
    let (report, calls, _) = run(&s);
    assert_eq!(report.calls, 4);
    assert_eq!(calls[0].items().len(), 6);
    assert_eq!(calls[1].items().len(), 10);
    assert_eq!(calls[2].items().len(), 5);
    assert_eq!(calls[2].duration(), Seconds(0.5));
    assert!(matches!(calls[3], RenderCall::Hold { step: 2, .. }));
    assert_eq!(report.steps_visited, vec![0, 1, 2]);
}

#[test]
fn a_run_plays_once() {
    let s = scene(vec![Step::hold(1.0)]);
    let model = s.build_model(&StyleConfig::default()).unwrap();
    let mut rec = RecordingRenderer::new();
    let mut run = SceneRun::new(&s, model);
    assert_eq!(run.state(), RunState::NotStarted);
    run.run(&mut rec).unwrap();
    assert!(matches!(run.run(&mut rec), Err(PlexusError::Sequencing(_))));
    assert_eq!(run.state(), RunState::Completed);
    assert_eq!(rec.calls().len(), 1);
}

struct Broken {
    after: usize,
    seen: usize,
}

impl RendererPort for Broken {
    fn submit(&mut self, call: &RenderCall) -> PlexusResult<Ack> {
        if self.seen == self.after {
            return Err(PlexusError::configuration("device lost"));
        }
        self.seen += 1;
        Ok(Ack {
            elapsed: call.duration(),
        })
    }
}

#[test]
fn renderer_failures_surface_as_render_errors() {
    let s = scene(vec![Step::hold(1.0), Step::hold(1.0), Step::hold(1.0)]);
    let model = s.build_model(&StyleConfig::default()).unwrap();
    let mut broken = Broken { after: 1, seen: 0 };
    let mut run = SceneRun::new(&s, model);
    let err = run.run(&mut broken).unwrap_err();
    assert!(matches!(err, PlexusError::Render(ref m) if m.contains("device lost")));
    assert_eq!(run.state(), RunState::Failed);
    assert!(matches!(run.run(&mut broken), Err(PlexusError::Sequencing(_))));
}
