use crate::foundation::core::Rgba8;
use crate::foundation::error::{PlexusError, PlexusResult};
use crate::foundation::math::lerp;

/// Mutable presentation state of a node or edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Fill color (nodes) or stroke color (edges).
    pub color: Rgba8,
    /// Uniform scale factor relative to the constructed size.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stroke width; `0` for nodes.
    pub stroke_width: f64,
    /// Whether the node's label has been written.
    pub label_visible: bool,
    /// Color the label is written in.
    pub label_color: Rgba8,
}

impl VisualState {
    /// Default state of a freshly constructed node.
    pub fn node(color: Rgba8, label_color: Rgba8) -> Self {
        Self {
            color,
            scale: 1.0,
            opacity: 1.0,
            stroke_width: 0.0,
            label_visible: false,
            label_color,
        }
    }

    /// Default state of a freshly constructed edge.
    pub fn edge(color: Rgba8, stroke_width: f64) -> Self {
        Self {
            color,
            scale: 1.0,
            opacity: 1.0,
            stroke_width,
            label_visible: false,
            label_color: color,
        }
    }

    /// Return the state after applying `m`. Pure: `self` is untouched.
    pub fn apply(&self, m: &Mutation) -> Self {
        let mut out = *self;
        match *m {
            Mutation::SetColor(c) => out.color = c,
            Mutation::ScaleBy(f) => out.scale *= f,
            Mutation::SetOpacity(o) => out.opacity = o.clamp(0.0, 1.0),
            Mutation::SetStrokeWidth(w) => out.stroke_width = w,
            Mutation::ShowLabel(c) => {
                out.label_visible = true;
                out.label_color = c;
            }
            Mutation::HideLabel => out.label_visible = false,
        }
        out
    }

    /// Apply mutations left to right.
    pub fn apply_all(&self, ms: &[Mutation]) -> Self {
        ms.iter().fold(*self, |s, m| s.apply(m))
    }

    /// Interpolated state between `self` and `to` at progress `t`.
    ///
    /// Label visibility is discrete and switches once the transition completes.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return *to;
        }
        if t <= 0.0 {
            return *self;
        }
        Self {
            color: self.color.lerp(to.color, t),
            scale: lerp(self.scale, to.scale, t),
            opacity: lerp(self.opacity, to.opacity, t),
            stroke_width: lerp(self.stroke_width, to.stroke_width, t),
            label_visible: self.label_visible,
            label_color: self.label_color,
        }
    }
}

/// One atomic change to a [`VisualState`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Mutation {
    /// Replace the color.
    SetColor(Rgba8),
    /// Multiply the scale.
    ScaleBy(f64),
    /// Replace the opacity.
    SetOpacity(f64),
    /// Replace the stroke width.
    SetStrokeWidth(f64),
    /// Mark the label written, in the given color.
    ShowLabel(Rgba8),
    /// Mark the label removed.
    HideLabel,
}

impl Mutation {
    /// Reject values that would leave the state meaningless.
    pub fn validate(&self) -> PlexusResult<()> {
        match *self {
            Mutation::ScaleBy(f) if !f.is_finite() || f <= 0.0 => Err(
                PlexusError::configuration(format!("scale factor must be finite and > 0 (got {f})")),
            ),
            Mutation::SetOpacity(o) if !(0.0..=1.0).contains(&o) => Err(
                PlexusError::configuration(format!("opacity must be in [0, 1] (got {o})")),
            ),
            Mutation::SetStrokeWidth(w) if !w.is_finite() || w < 0.0 => Err(
                PlexusError::configuration(format!("stroke width must be finite and >= 0 (got {w})")),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anatomy/visual.rs"]
mod tests;
