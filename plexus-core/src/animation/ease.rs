/// Rate function applied to an animation's normalized progress.
///
/// `Smooth` is the default for every play call. Holds run `Linear`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Sigmoid ease-in/out.
    #[default]
    Smooth,
}

const SMOOTH_INFLECTION: f64 = 10.0;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64) -> f64 {
    let error = sigmoid(-SMOOTH_INFLECTION / 2.0);
    ((sigmoid(SMOOTH_INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

impl Ease {
    /// Apply this rate function to progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
