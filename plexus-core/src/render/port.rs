use crate::{
    anatomy::{
        model::{ElementKey, Side},
        visual::{Mutation, VisualState},
    },
    animation::ease::Ease,
    foundation::core::{Point, Rgba8, Seconds},
    foundation::error::PlexusResult,
    scene::caption::CaptionSpec,
};

/// One element-level instruction inside a [`RenderCall::Play`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum RenderRequest {
    /// Draw a node for the first time.
    CreateNode {
        /// Node id.
        id: String,
        /// Scene-space center.
        position: Point,
        /// Radius at scale 1.0.
        radius: f64,
        /// Visual state to draw with.
        state: VisualState,
    },
    /// Draw an edge for the first time.
    CreateEdge {
        /// Upstream node id.
        source: String,
        /// Downstream node id.
        target: String,
        /// Scene-space start point.
        from: Point,
        /// Scene-space end point.
        to: Point,
        /// Visual state to draw with.
        state: VisualState,
    },
    /// Write a node's label.
    WriteLabel {
        /// Node id.
        node: String,
        /// Label text.
        text: String,
        /// Point the text is aligned to.
        anchor: Point,
        /// Side of the node the text extends towards.
        side: Side,
        /// Font size in points (1080p reference).
        size: f64,
        /// Text color.
        color: Rgba8,
    },
    /// Remove a node's label.
    RemoveLabel {
        /// Node id.
        node: String,
    },
    /// Transition an existing element between two visual states.
    Mutate {
        /// Element being changed.
        key: ElementKey,
        /// Mutations applied, in order.
        mutations: Vec<Mutation>,
        /// State before the call.
        from: VisualState,
        /// State after the call.
        to: VisualState,
    },
    /// Put a caption on the stage.
    ShowCaption {
        /// Caption content and placement.
        caption: CaptionSpec,
    },
    /// Take a caption off the stage.
    RemoveCaption {
        /// Caption id.
        id: String,
    },
    /// Transient ring of rays around a point.
    Flash {
        /// Center.
        at: Point,
        /// Ray color.
        color: Rgba8,
        /// Final radius in scene units.
        radius: f64,
    },
}

/// A request with its timing inside the enclosing call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimedRequest {
    /// Start offset from the beginning of the call.
    pub offset: Seconds,
    /// Duration of this request's own animation.
    pub duration: Seconds,
    /// The instruction.
    pub request: RenderRequest,
}

/// One instruction sent through a [`RendererPort`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RenderCall {
    /// Animate a batch of requests.
    Play {
        /// Index of the step that issued the call.
        step: usize,
        /// Name of that step.
        step_name: String,
        /// Total duration of the call.
        run_time: Seconds,
        /// Rate function applied to each request's progress.
        ease: Ease,
        /// Requests in issue order.
        items: Vec<TimedRequest>,
    },
    /// Keep the stage unchanged.
    Hold {
        /// Index of the step that issued the call.
        step: usize,
        /// Name of that step.
        step_name: String,
        /// Pause length.
        duration: Seconds,
    },
}

impl RenderCall {
    /// Index of the issuing step.
    pub fn step(&self) -> usize {
        match self {
            RenderCall::Play { step, .. } | RenderCall::Hold { step, .. } => *step,
        }
    }

    /// Wall-clock length of the call in scene time.
    pub fn duration(&self) -> Seconds {
        match self {
            RenderCall::Play { run_time, .. } => *run_time,
            RenderCall::Hold { duration, .. } => *duration,
        }
    }

    /// Requests carried by the call; empty for a hold.
    pub fn items(&self) -> &[TimedRequest] {
        match self {
            RenderCall::Play { items, .. } => items,
            RenderCall::Hold { .. } => &[],
        }
    }
}

/// Acknowledgement returned once a call has been fully rendered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Ack {
    /// Scene time consumed by the call.
    pub elapsed: Seconds,
}

/// Drawing collaborator driven by the sequencer.
///
/// `submit` is synchronous: it returns only once the call has been rendered (or recorded), so
/// the sequencer never has more than one call in flight.
pub trait RendererPort {
    /// Called once before the first call of a scene.
    fn begin(&mut self, _scene: &str) -> PlexusResult<()> {
        Ok(())
    }

    /// Render one call.
    fn submit(&mut self, call: &RenderCall) -> PlexusResult<Ack>;

    /// Called once after the last call of a successful scene.
    fn finish(&mut self) -> PlexusResult<()> {
        Ok(())
    }
}
