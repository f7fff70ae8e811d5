use xxhash_rust::xxh3::Xxh3;

use crate::{foundation::error::PlexusResult, render::port::RenderCall};

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Stable 128-bit digest of a run's call transcript.
///
/// Two runs of the same scene with the same style produce the same fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TranscriptFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for TranscriptFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Incremental hasher fed one call at a time.
pub(crate) struct TranscriptHasher {
    inner: Xxh3,
    calls: u64,
}

impl TranscriptHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
            calls: 0,
        }
    }

    pub(crate) fn write_call(&mut self, call: &RenderCall) -> PlexusResult<()> {
        let bytes = serde_json::to_vec(call).map_err(anyhow::Error::from)?;
        // Length prefix keeps call boundaries unambiguous.
        self.inner.update(&(bytes.len() as u64).to_le_bytes());
        self.inner.update(&bytes);
        self.calls += 1;
        Ok(())
    }

    pub(crate) fn finish(mut self) -> TranscriptFingerprint {
        self.inner.update(&self.calls.to_le_bytes());
        let v = self.inner.digest128();
        TranscriptFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

/// Fingerprint of a complete call list.
pub fn fingerprint_calls(calls: &[RenderCall]) -> PlexusResult<TranscriptFingerprint> {
    let mut h = TranscriptHasher::new();
    for call in calls {
        h.write_call(call)?;
    }
    Ok(h.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/fingerprint.rs"]
mod tests;
