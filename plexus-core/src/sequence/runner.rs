use std::collections::BTreeSet;

use crate::{
    anatomy::{
        layout::label_offset,
        model::{ElementKey, Model},
        visual::Mutation,
    },
    animation::lag::{Slot, lagged_slots},
    foundation::core::{Rgba8, Seconds},
    foundation::error::{PlexusError, PlexusResult},
    render::port::{RenderCall, RenderRequest, RendererPort, TimedRequest},
    scene::step::{Dispatch, Operation, Scene, Stagger, Target},
    sequence::{
        fingerprint::{TranscriptFingerprint, TranscriptHasher},
        plan::{ResolvedAction, ResolvedStep, resolve},
    },
    style::config::StyleConfig,
};

/// Lifecycle of a [`SceneRun`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Created, never run.
    NotStarted,
    /// Steps are being dispatched.
    Running,
    /// Every step was rendered.
    Completed,
    /// Pre-flight or the renderer failed.
    Failed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RunState::NotStarted => "not started",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Failed => "failed",
        })
    }
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunReport {
    /// Scene name.
    pub scene: String,
    /// Indices of the steps rendered, in order.
    pub steps_visited: Vec<usize>,
    /// Number of render calls submitted.
    pub calls: usize,
    /// Total scene time of the submitted calls.
    pub duration: Seconds,
    /// Digest of the call transcript.
    pub fingerprint: TranscriptFingerprint,
}

/// One playback of a scene against its own model.
///
/// The run owns the model: each call's mutations are applied to it before the call is
/// submitted, so the model always describes what the renderer has been asked to show.
#[derive(Debug)]
pub struct SceneRun<'s> {
    scene: &'s Scene,
    model: Model,
    state: RunState,
    on_stage: BTreeSet<ElementKey>,
}

impl<'s> SceneRun<'s> {
    /// Prepare a run of `scene` over `model`.
    pub fn new(scene: &'s Scene, model: Model) -> Self {
        Self {
            scene,
            model,
            state: RunState::NotStarted,
            on_stage: BTreeSet::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The model as mutated so far.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Consume the run, keeping its model.
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Play every step through `renderer`, in order.
    ///
    /// A run plays at most once: calling this again after completion or failure is a
    /// sequencing error. Groupings are resolved for the whole scene before the first call, so
    /// an authoring mistake never leaves a half-drawn scene behind.
    #[tracing::instrument(level = "debug", skip_all, fields(scene = %self.scene.name))]
    pub fn run(&mut self, renderer: &mut dyn RendererPort) -> PlexusResult<RunReport> {
        if self.state != RunState::NotStarted {
            return Err(PlexusError::sequencing(format!(
                "run of scene '{}' is already {}",
                self.scene.name, self.state
            )));
        }
        self.state = RunState::Running;
        match self.play(renderer) {
            Ok(report) => {
                self.state = RunState::Completed;
                tracing::debug!(
                    calls = report.calls,
                    duration = report.duration.0,
                    fingerprint = %report.fingerprint,
                    "scene complete"
                );
                Ok(report)
            }
            Err(e) => {
                self.state = RunState::Failed;
                tracing::warn!(error = %e, "scene run failed");
                Err(e)
            }
        }
    }

    fn play(&mut self, renderer: &mut dyn RendererPort) -> PlexusResult<RunReport> {
        let plan = resolve(self.scene, &self.model)?;
        renderer.begin(&self.scene.name).map_err(as_render_error)?;

        let mut out = Outbox {
            renderer,
            hasher: TranscriptHasher::new(),
            calls: 0,
            duration: Seconds::ZERO,
        };
        let mut steps_visited = Vec::with_capacity(plan.len());
        for step in &plan {
            tracing::debug!(step = step.index, name = %step.step.name, "step");
            self.play_step(step, &mut out)?;
            steps_visited.push(step.index);
        }
        out.renderer.finish().map_err(as_render_error)?;

        Ok(RunReport {
            scene: self.scene.name.clone(),
            steps_visited,
            calls: out.calls,
            duration: out.duration,
            fingerprint: out.hasher.finish(),
        })
    }

    fn play_step(&mut self, rs: &ResolvedStep<'_>, out: &mut Outbox<'_>) -> PlexusResult<()> {
        let step = rs.step;
        if step.is_hold() {
            return out.send(RenderCall::Hold {
                step: rs.index,
                step_name: step.name.clone(),
                duration: step.run_time,
            });
        }

        match step.dispatch {
            Dispatch::Sequential => {
                for ra in &rs.actions {
                    let op = &ra.action.op;
                    if ra.action.stagger == Stagger::OneByOne {
                        for member in &ra.members {
                            for phase in 0..op.phases() {
                                let run_time = phase_time(op, phase, step.run_time);
                                let items = self.timed_items(
                                    ra,
                                    std::slice::from_ref(member),
                                    phase,
                                    run_time,
                                )?;
                                out.send(play_call(rs, run_time, items))?;
                            }
                        }
                    } else {
                        for phase in 0..op.phases() {
                            let run_time = phase_time(op, phase, step.run_time);
                            let items = self.timed_items(ra, &ra.members, phase, run_time)?;
                            out.send(play_call(rs, run_time, items))?;
                        }
                    }
                }
            }
            Dispatch::Simultaneous => {
                let phases = rs.actions.iter().map(|ra| ra.action.op.phases()).max().unwrap_or(1);
                for phase in 0..phases {
                    let mut run_time = Seconds::ZERO;
                    let mut items = Vec::new();
                    for ra in rs.actions.iter().filter(|ra| phase < ra.action.op.phases()) {
                        let rt = phase_time(&ra.action.op, phase, step.run_time);
                        if rt.0 > run_time.0 {
                            run_time = rt;
                        }
                        items.extend(self.timed_items(ra, &ra.members, phase, rt)?);
                    }
                    out.send(play_call(rs, run_time, items))?;
                }
            }
        }
        Ok(())
    }

    /// Build the requests for `members`, applying their mutations to the model, and time them
    /// according to the action's stagger.
    fn timed_items(
        &mut self,
        ra: &ResolvedAction<'_>,
        members: &[ElementKey],
        phase: usize,
        run_time: Seconds,
    ) -> PlexusResult<Vec<TimedRequest>> {
        let op = &ra.action.op;
        let batches = match ra.action.target {
            Target::Stage => vec![vec![stage_request(op)?]],
            Target::Grouping(_) => {
                let mut batches = Vec::with_capacity(members.len());
                for key in members {
                    let reqs = self.member_requests(op, phase, key)?;
                    // Already-drawn elements are not revealed twice.
                    if !reqs.is_empty() {
                        batches.push(reqs);
                    }
                }
                batches
            }
        };

        let slots = match ra.action.stagger {
            Stagger::Lagged(ratio) => lagged_slots(batches.len(), ratio, run_time)?,
            Stagger::Together | Stagger::OneByOne => vec![
                Slot {
                    offset: Seconds::ZERO,
                    duration: run_time,
                };
                batches.len()
            ],
        };

        Ok(batches
            .into_iter()
            .zip(slots)
            .flat_map(|(reqs, slot)| {
                reqs.into_iter().map(move |request| TimedRequest {
                    offset: slot.offset,
                    duration: slot.duration,
                    request,
                })
            })
            .collect())
    }

    fn member_requests(
        &mut self,
        op: &Operation,
        phase: usize,
        key: &ElementKey,
    ) -> PlexusResult<Vec<RenderRequest>> {
        let mutations = match op {
            Operation::Reveal => return self.reveal(key),
            Operation::Label { color } => return self.label(key, *color),
            Operation::Unlabel => return self.unlabel(key),
            Operation::Recolor(c) => vec![Mutation::SetColor(*c)],
            Operation::Pulse { color, factor, .. } if phase == 0 => {
                let mut m = Vec::with_capacity(2);
                if let Some(c) = color {
                    m.push(Mutation::SetColor(*c));
                }
                m.push(Mutation::ScaleBy(*factor));
                m
            }
            Operation::Pulse { factor, .. } => vec![Mutation::ScaleBy(1.0 / factor)],
            Operation::Highlight {
                color,
                stroke_width,
            } => match key {
                ElementKey::Node(_) => vec![Mutation::SetColor(*color)],
                ElementKey::Edge { .. } => vec![
                    Mutation::SetColor(*color),
                    Mutation::SetStrokeWidth(*stroke_width),
                ],
            },
            Operation::Fade { opacity } => vec![Mutation::SetOpacity(*opacity)],
            Operation::ShowCaption(_) | Operation::RemoveCaption(_) | Operation::Flash { .. } => {
                return Err(PlexusError::sequencing(format!(
                    "stage operation applied to element '{key}'"
                )));
            }
        };
        Ok(vec![self.mutate(key, mutations)?])
    }

    fn mutate(&mut self, key: &ElementKey, mutations: Vec<Mutation>) -> PlexusResult<RenderRequest> {
        let (from, to) = self.model.apply(key, &mutations)?;
        Ok(RenderRequest::Mutate {
            key: key.clone(),
            mutations,
            from,
            to,
        })
    }

    fn reveal(&mut self, key: &ElementKey) -> PlexusResult<Vec<RenderRequest>> {
        if self.on_stage.contains(key) {
            return Ok(Vec::new());
        }
        let request = match key {
            ElementKey::Node(id) => {
                let node = self.model.get_node(id)?;
                RenderRequest::CreateNode {
                    id: id.clone(),
                    position: node.position(),
                    radius: node.radius(),
                    state: *node.visual(),
                }
            }
            ElementKey::Edge { source, target } => {
                let state = *self.model.get_edge(source, target)?.visual();
                RenderRequest::CreateEdge {
                    source: source.clone(),
                    target: target.clone(),
                    from: self.model.get_node(source)?.position(),
                    to: self.model.get_node(target)?.position(),
                    state,
                }
            }
        };
        self.on_stage.insert(key.clone());
        Ok(vec![request])
    }

    fn label(
        &mut self,
        key: &ElementKey,
        color: Option<Rgba8>,
    ) -> PlexusResult<Vec<RenderRequest>> {
        let ElementKey::Node(id) = key else {
            return Err(PlexusError::configuration(format!("cannot label edge '{key}'")));
        };
        let node = self.model.get_node(id)?;
        let color = color.unwrap_or(node.visual().label_color);
        let spec = node.label();
        let anchor = node.position()
            + label_offset(spec.side, node.radius() * node.visual().scale, spec.buff);
        let write = RenderRequest::WriteLabel {
            node: id.clone(),
            text: node.display_name().to_string(),
            anchor,
            side: spec.side,
            size: spec.size,
            color,
        };
        let mutate = self.mutate(key, vec![Mutation::ShowLabel(color)])?;
        Ok(vec![mutate, write])
    }

    fn unlabel(&mut self, key: &ElementKey) -> PlexusResult<Vec<RenderRequest>> {
        let ElementKey::Node(id) = key else {
            return Err(PlexusError::configuration(format!("cannot unlabel edge '{key}'")));
        };
        let remove = RenderRequest::RemoveLabel { node: id.clone() };
        let mutate = self.mutate(key, vec![Mutation::HideLabel])?;
        Ok(vec![mutate, remove])
    }
}

/// Submits calls one at a time and keeps the running totals.
struct Outbox<'r> {
    renderer: &'r mut dyn RendererPort,
    hasher: TranscriptHasher,
    calls: usize,
    duration: Seconds,
}

impl Outbox<'_> {
    fn send(&mut self, call: RenderCall) -> PlexusResult<()> {
        let ack = self.renderer.submit(&call).map_err(as_render_error)?;
        self.hasher.write_call(&call)?;
        self.calls += 1;
        self.duration += call.duration();
        tracing::trace!(
            step = call.step(),
            items = call.items().len(),
            elapsed = ack.elapsed.0,
            "call rendered"
        );
        Ok(())
    }
}

fn as_render_error(e: PlexusError) -> PlexusError {
    match e {
        PlexusError::Render(_) => e,
        other => PlexusError::render(other.to_string()),
    }
}

/// Run time of `phase` of `op`: the step's run time, or the settle time for a pulse's way down.
fn phase_time(op: &Operation, phase: usize, run_time: Seconds) -> Seconds {
    match op {
        Operation::Pulse { settle, .. } if phase > 0 => *settle,
        _ => run_time,
    }
}

fn play_call(rs: &ResolvedStep<'_>, run_time: Seconds, items: Vec<TimedRequest>) -> RenderCall {
    RenderCall::Play {
        step: rs.index,
        step_name: rs.step.name.clone(),
        run_time,
        ease: rs.step.ease,
        items,
    }
}

fn stage_request(op: &Operation) -> PlexusResult<RenderRequest> {
    match op {
        Operation::ShowCaption(caption) => Ok(RenderRequest::ShowCaption {
            caption: caption.clone(),
        }),
        Operation::RemoveCaption(id) => Ok(RenderRequest::RemoveCaption { id: id.clone() }),
        Operation::Flash { at, color, radius } => Ok(RenderRequest::Flash {
            at: *at,
            color: *color,
            radius: *radius,
        }),
        other => Err(PlexusError::sequencing(format!(
            "{other:?} is not a stage operation"
        ))),
    }
}

/// Run `scene` over an already-built `model`.
pub fn run_scene(
    scene: &Scene,
    model: Model,
    renderer: &mut dyn RendererPort,
) -> PlexusResult<RunReport> {
    SceneRun::new(scene, model).run(renderer)
}

/// Build a fresh model for `scene` under `style` and run it.
pub fn play_scene(
    scene: &Scene,
    style: &StyleConfig,
    renderer: &mut dyn RendererPort,
) -> PlexusResult<RunReport> {
    let model = scene.build_model(style)?;
    run_scene(scene, model, renderer)
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/runner.rs"]
mod tests;
