use crate::foundation::core::Seconds;
use crate::foundation::error::{PlexusError, PlexusResult};

/// Start offset and duration of one element inside a staggered call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Slot {
    /// Offset from the start of the call.
    pub offset: Seconds,
    /// Duration of the element's own animation.
    pub duration: Seconds,
}

/// Split `run_time` across `count` elements that start in order and overlap.
///
/// Every element animates for the same duration `d`; element `i` starts at `i * lag_ratio * d`,
/// and `d` is chosen so the last element ends exactly at `run_time`. A ratio of `0` plays all
/// elements together, a ratio of `1` plays them back to back.
pub fn lagged_slots(count: usize, lag_ratio: f64, run_time: Seconds) -> PlexusResult<Vec<Slot>> {
    if !lag_ratio.is_finite() || lag_ratio < 0.0 {
        return Err(PlexusError::configuration(format!(
            "lag ratio must be finite and >= 0 (got {lag_ratio})"
        )));
    }
    run_time.validate("staggered run time")?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let span = 1.0 + lag_ratio * (count as f64 - 1.0);
    let d = run_time.0 / span;
    Ok((0..count)
        .map(|i| Slot {
            offset: Seconds(i as f64 * lag_ratio * d),
            duration: Seconds(d),
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lag.rs"]
mod tests;
