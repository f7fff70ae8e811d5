use std::collections::BTreeSet;

use crate::{
    anatomy::model::{ElementKey, Model},
    foundation::error::{PlexusError, PlexusResult},
    scene::step::{Action, Operation, Scene, Step, Target},
};

/// An action with its grouping looked up.
#[derive(Debug)]
pub(crate) struct ResolvedAction<'s> {
    pub(crate) action: &'s Action,
    /// Grouping members in order; empty for stage actions.
    pub(crate) members: Vec<ElementKey>,
}

/// A step whose every action has been checked against the model.
#[derive(Debug)]
pub(crate) struct ResolvedStep<'s> {
    pub(crate) index: usize,
    pub(crate) step: &'s Step,
    pub(crate) actions: Vec<ResolvedAction<'s>>,
}

/// Resolve every step of `scene` against `model` before anything is rendered.
///
/// Fails on the first undefined grouping, on label operations aimed at edges, and on caption
/// bookkeeping mistakes (showing an id twice, removing one that is not shown).
pub(crate) fn resolve<'s>(scene: &'s Scene, model: &Model) -> PlexusResult<Vec<ResolvedStep<'s>>> {
    scene.validate()?;

    let mut captions: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::with_capacity(scene.steps.len());
    for (index, step) in scene.steps.iter().enumerate() {
        let mut actions = Vec::with_capacity(step.actions.len());
        for action in &step.actions {
            let members = match &action.target {
                Target::Stage => {
                    track_caption(&mut captions, &action.op, index, step)?;
                    Vec::new()
                }
                Target::Grouping(name) => {
                    let members = model.grouping(name)?.members().to_vec();
                    if matches!(action.op, Operation::Label { .. } | Operation::Unlabel)
                        && let Some(edge) = members.iter().find(|k| matches!(k, ElementKey::Edge { .. }))
                    {
                        return Err(PlexusError::configuration(format!(
                            "step {index} ('{}'): cannot label edge '{edge}' of grouping '{name}'",
                            step.name
                        )));
                    }
                    members
                }
            };
            actions.push(ResolvedAction { action, members });
        }
        out.push(ResolvedStep {
            index,
            step,
            actions,
        });
    }
    Ok(out)
}

fn track_caption<'s>(
    shown: &mut BTreeSet<&'s str>,
    op: &'s Operation,
    index: usize,
    step: &Step,
) -> PlexusResult<()> {
    match op {
        Operation::ShowCaption(spec) => {
            if !shown.insert(spec.id.as_str()) {
                return Err(PlexusError::configuration(format!(
                    "step {index} ('{}'): caption '{}' is already shown",
                    step.name, spec.id
                )));
            }
        }
        Operation::RemoveCaption(id) => {
            if !shown.remove(id.as_str()) {
                return Err(PlexusError::configuration(format!(
                    "step {index} ('{}'): caption '{id}' is not shown",
                    step.name
                )));
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/plan.rs"]
mod tests;
