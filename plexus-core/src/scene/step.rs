use crate::{
    anatomy::{
        layout::Placement,
        model::{ElementKey, Model, Variant},
        topology::build_model,
    },
    animation::ease::Ease,
    foundation::core::{Point, Rgba8, Seconds},
    foundation::error::{PlexusError, PlexusResult},
    scene::caption::CaptionSpec,
    style::config::StyleConfig,
};

/// What an action does to its target.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Draw the elements for the first time.
    Reveal,
    /// Change color.
    Recolor(Rgba8),
    /// Scale up (optionally recoloring), then back down by the reciprocal factor.
    Pulse {
        /// Color set on the way up, if any.
        color: Option<Rgba8>,
        /// Scale factor of the up phase.
        factor: f64,
        /// Duration of the down phase.
        settle: Seconds,
    },
    /// Recolor and, for edges, thicken.
    Highlight {
        /// New color.
        color: Rgba8,
        /// New edge stroke width.
        stroke_width: f64,
    },
    /// Write node labels; `None` keeps each node's current label color.
    Label {
        /// Label color override.
        color: Option<Rgba8>,
    },
    /// Remove node labels.
    Unlabel,
    /// Change opacity.
    Fade {
        /// Target opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Put a caption on the stage.
    ShowCaption(CaptionSpec),
    /// Take a caption off the stage.
    RemoveCaption(String),
    /// Expanding ring drawing the eye to a point.
    Flash {
        /// Center of the ring.
        at: Point,
        /// Ring color.
        color: Rgba8,
        /// Final ring radius in scene units.
        radius: f64,
    },
}

impl Operation {
    /// `true` for operations on stage captions rather than graph elements.
    pub fn is_stage_op(&self) -> bool {
        matches!(
            self,
            Operation::ShowCaption(_) | Operation::RemoveCaption(_) | Operation::Flash { .. }
        )
    }

    /// Number of render calls the operation needs per dispatch.
    pub fn phases(&self) -> usize {
        match self {
            Operation::Pulse { .. } => 2,
            _ => 1,
        }
    }

    fn validate(&self) -> PlexusResult<()> {
        match self {
            Operation::Pulse { factor, settle, .. } => {
                if !factor.is_finite() || *factor <= 0.0 {
                    return Err(PlexusError::configuration(format!(
                        "pulse factor must be finite and > 0 (got {factor})"
                    )));
                }
                settle.validate("pulse settle time")
            }
            Operation::Highlight { stroke_width, .. } if !stroke_width.is_finite() || *stroke_width < 0.0 => {
                Err(PlexusError::configuration("highlight stroke width must be >= 0"))
            }
            Operation::Fade { opacity } if !(0.0..=1.0).contains(opacity) => Err(
                PlexusError::configuration(format!("fade opacity must be in [0, 1] (got {opacity})")),
            ),
            Operation::ShowCaption(spec) => spec.validate(),
            Operation::RemoveCaption(id) if id.trim().is_empty() => {
                Err(PlexusError::configuration("caption id must be non-empty"))
            }
            Operation::Flash { radius, .. } if !radius.is_finite() || *radius <= 0.0 => {
                Err(PlexusError::configuration("flash radius must be > 0"))
            }
            _ => Ok(()),
        }
    }
}

/// What an action acts on.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A named grouping of the scene's model.
    Grouping(String),
    /// The stage itself (captions, flashes).
    Stage,
}

/// How an action spreads over its members.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stagger {
    /// All members animate over the whole run time.
    Together,
    /// Members start in grouping order, each `ratio` of an element's duration after the
    /// previous one; one render call.
    Lagged(f64),
    /// One render call per member, in grouping order.
    OneByOne,
}

/// One operation applied to one target.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Action {
    /// Target of the operation.
    pub target: Target,
    /// Operation to apply.
    pub op: Operation,
    /// Spread over the members.
    pub stagger: Stagger,
}

impl Action {
    /// Act on grouping `name`.
    pub fn on(name: impl Into<String>, op: Operation) -> Self {
        Self {
            target: Target::Grouping(name.into()),
            op,
            stagger: Stagger::Together,
        }
    }

    /// Act on the stage.
    pub fn stage(op: Operation) -> Self {
        Self {
            target: Target::Stage,
            op,
            stagger: Stagger::Together,
        }
    }

    /// Stagger members with `ratio`.
    pub fn lagged(mut self, ratio: f64) -> Self {
        self.stagger = Stagger::Lagged(ratio);
        self
    }

    /// One call per member.
    pub fn one_by_one(mut self) -> Self {
        self.stagger = Stagger::OneByOne;
        self
    }
}

/// Whether a step's actions play one after another or together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// One call (or more) per action, in order.
    #[default]
    Sequential,
    /// All actions bundled into one call per phase.
    Simultaneous,
}

/// One presentation step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Step {
    /// Short name for logs and transcripts.
    pub name: String,
    /// Actions; empty for a hold.
    pub actions: Vec<Action>,
    /// Dispatch mode.
    pub dispatch: Dispatch,
    /// Nominal duration of each call (of the first phase, for pulses).
    pub run_time: Seconds,
    /// Rate function for every call of the step.
    pub ease: Ease,
}

impl Step {
    /// Sequential step with one action.
    pub fn play(name: impl Into<String>, run_time: f64, action: Action) -> Self {
        Self {
            name: name.into(),
            actions: vec![action],
            dispatch: Dispatch::Sequential,
            run_time: Seconds(run_time),
            ease: Ease::default(),
        }
    }

    /// Simultaneous step bundling `actions`.
    pub fn together(name: impl Into<String>, run_time: f64, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
            dispatch: Dispatch::Simultaneous,
            run_time: Seconds(run_time),
            ease: Ease::default(),
        }
    }

    /// Pause without changing anything.
    pub fn hold(run_time: f64) -> Self {
        Self {
            name: "hold".to_string(),
            actions: Vec::new(),
            dispatch: Dispatch::Sequential,
            run_time: Seconds(run_time),
            ease: Ease::Linear,
        }
    }

    /// `true` for a step without actions.
    pub fn is_hold(&self) -> bool {
        self.actions.is_empty()
    }

    /// Check the step's shape without consulting a model.
    pub fn validate(&self) -> PlexusResult<()> {
        self.run_time.validate(&format!("step '{}' run time", self.name))?;
        for action in &self.actions {
            action.op.validate().map_err(|e| {
                PlexusError::configuration(format!("step '{}': {e}", self.name))
            })?;
            match (&action.target, action.op.is_stage_op()) {
                (Target::Stage, false) => {
                    return Err(PlexusError::configuration(format!(
                        "step '{}': {:?} needs a grouping target",
                        self.name, action.op
                    )));
                }
                (Target::Grouping(g), true) => {
                    return Err(PlexusError::configuration(format!(
                        "step '{}': stage operation aimed at grouping '{g}'",
                        self.name
                    )));
                }
                _ => {}
            }
            if self.dispatch == Dispatch::Simultaneous && action.stagger == Stagger::OneByOne {
                return Err(PlexusError::configuration(format!(
                    "step '{}': one-by-one actions cannot be bundled",
                    self.name
                )));
            }
            if let Stagger::Lagged(r) = action.stagger
                && (!r.is_finite() || r < 0.0)
            {
                return Err(PlexusError::configuration(format!(
                    "step '{}': lag ratio must be finite and >= 0",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Groupings a scene adds to its model before playing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneGrouping {
    /// Listed members.
    Explicit {
        /// Grouping name.
        name: String,
        /// Members in order.
        members: Vec<ElementKey>,
    },
    /// Every element not in the listed groupings.
    Complement {
        /// Grouping name.
        name: String,
        /// Groupings whose members are excluded.
        of: Vec<String>,
    },
}

/// A complete, hand-authored presentation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    /// Scene name.
    pub name: String,
    /// Topology the scene's model is built from.
    pub variant: Variant,
    /// Where the diagram sits on screen.
    pub placement: Placement,
    /// Scene-specific groupings, installed in order.
    pub groupings: Vec<SceneGrouping>,
    /// Steps in playback order.
    pub steps: Vec<Step>,
}

impl Scene {
    /// Check the scene's shape without consulting a model.
    pub fn validate(&self) -> PlexusResult<()> {
        if self.name.trim().is_empty() {
            return Err(PlexusError::configuration("scene name must be non-empty"));
        }
        if self.steps.is_empty() {
            return Err(PlexusError::configuration(format!(
                "scene '{}' has no steps",
                self.name
            )));
        }
        self.placement.validate()?;
        self.steps.iter().try_for_each(Step::validate)
    }

    /// Build a fresh model for one run of this scene.
    pub fn build_model(&self, style: &StyleConfig) -> PlexusResult<Model> {
        let mut model = build_model(self.variant, &self.placement, style)?;
        for g in &self.groupings {
            match g {
                SceneGrouping::Explicit { name, members } => {
                    model.define_grouping(name.clone(), members.clone())?;
                }
                SceneGrouping::Complement { name, of } => {
                    let of: Vec<&str> = of.iter().map(String::as_str).collect();
                    model.define_complement(name.clone(), &of)?;
                }
            }
        }
        Ok(model)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/step.rs"]
mod tests;
