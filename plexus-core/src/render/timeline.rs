use crate::{
    foundation::core::Seconds,
    foundation::error::{PlexusError, PlexusResult},
    render::{
        port::{Ack, RenderCall, RendererPort},
        stage::Stage,
    },
};

/// Slack for float drift between summed offsets and the call boundary.
const END_SLACK: f64 = 1e-9;

/// Renderer that lays calls end to end on a time axis so any instant can be sampled.
///
/// Used by frame and video output: the sequencer drives it once, then frames are sampled at
/// arbitrary times.
#[derive(Debug, Default)]
pub struct Timeline {
    scene: Option<String>,
    entries: Vec<(Seconds, RenderCall)>,
    cursor: Seconds,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene announced by the last `begin`.
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    /// Total duration of the recorded calls.
    pub fn duration(&self) -> Seconds {
        self.cursor
    }

    /// Calls with their absolute start times.
    pub fn entries(&self) -> &[(Seconds, RenderCall)] {
        &self.entries
    }

    /// Reconstruct the stage at scene time `t`.
    ///
    /// Calls that start after `t` are ignored; requests inside a started call are applied at
    /// their own eased progress, so staggered elements appear in order.
    pub fn sample(&self, t: Seconds) -> PlexusResult<Stage> {
        if !t.0.is_finite() {
            return Err(PlexusError::render("sample time must be finite"));
        }
        let mut stage = Stage::new();
        for (start, call) in &self.entries {
            if start.0 > t.0 {
                break;
            }
            let RenderCall::Play { ease, items, .. } = call else {
                continue;
            };
            for item in items {
                let local = t.0 - start.0 - item.offset.0;
                let progress = if local < 0.0 {
                    0.0
                } else if local + END_SLACK >= item.duration.0 {
                    1.0
                } else {
                    ease.apply(local / item.duration.0)
                };
                stage.apply(&item.request, progress);
            }
        }
        Ok(stage)
    }

    /// Stage after the last call has completed.
    pub fn final_stage(&self) -> PlexusResult<Stage> {
        self.sample(self.cursor)
    }
}

impl RendererPort for Timeline {
    fn begin(&mut self, scene: &str) -> PlexusResult<()> {
        self.scene = Some(scene.to_string());
        self.entries.clear();
        self.cursor = Seconds::ZERO;
        Ok(())
    }

    fn submit(&mut self, call: &RenderCall) -> PlexusResult<Ack> {
        let elapsed = call.duration();
        elapsed.validate("render call duration")?;
        self.entries.push((self.cursor, call.clone()));
        self.cursor += elapsed;
        tracing::trace!(calls = self.entries.len(), end = self.cursor.0, "call placed on timeline");
        Ok(Ack { elapsed })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/timeline.rs"]
mod tests;
