use crate::{
    foundation::error::{PlexusError, PlexusResult},
    render::port::{Ack, RenderCall, RendererPort},
};

/// Renderer that keeps every call in memory, for dry runs, transcripts and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    scene: Option<String>,
    finished: bool,
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene announced by the last `begin`.
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    /// `true` once `finish` has been called for the current scene.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Calls in submission order.
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Take ownership of the recorded calls.
    pub fn into_calls(self) -> Vec<RenderCall> {
        self.calls
    }

    /// Pretty JSON transcript of the recorded calls.
    pub fn transcript_json(&self) -> PlexusResult<String> {
        serde_json::to_string_pretty(&self.calls)
            .map_err(|e| PlexusError::render(format!("serialize transcript: {e}")))
    }
}

impl RendererPort for RecordingRenderer {
    fn begin(&mut self, scene: &str) -> PlexusResult<()> {
        self.scene = Some(scene.to_string());
        self.finished = false;
        self.calls.clear();
        Ok(())
    }

    fn submit(&mut self, call: &RenderCall) -> PlexusResult<Ack> {
        self.calls.push(call.clone());
        Ok(Ack {
            elapsed: call.duration(),
        })
    }

    fn finish(&mut self) -> PlexusResult<()> {
        self.finished = true;
        Ok(())
    }
}
