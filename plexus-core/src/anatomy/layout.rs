use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{PlexusError, PlexusResult};
use kurbo::Rect;

/// Where the raw coordinate table lands on screen: a uniform scale about the layout's center,
/// then a move of that center to `center`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Uniform scale applied to positions and radii.
    pub scale: f64,
    /// Scene-space point the layout's bounding-box center is moved to.
    pub center: Point,
}

impl Placement {
    /// Full-width diagram used by the overview.
    pub fn overview() -> Self {
        Self {
            scale: 0.8,
            center: Point::new(0.8, -0.1),
        }
    }

    /// Diagram on the left half, leaving room for an info card.
    pub fn clinical() -> Self {
        Self {
            scale: 0.62,
            center: Point::new(-3.3, -0.4),
        }
    }

    /// Slightly smaller diagram with vertical room for the non-terminal branches.
    pub fn catalog() -> Self {
        Self {
            scale: 0.75,
            center: Point::new(0.6, -0.3),
        }
    }

    /// Reject degenerate placements.
    pub fn validate(&self) -> PlexusResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PlexusError::configuration(format!(
                "placement scale must be finite and > 0 (got {})",
                self.scale
            )));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(PlexusError::configuration("placement center must be finite"));
        }
        Ok(())
    }

    /// Transform mapping raw coordinates whose bounding box is `bounds` into scene space.
    pub fn transform(&self, bounds: Rect) -> Affine {
        let c = bounds.center();
        Affine::translate(self.center.to_vec2())
            * Affine::scale(self.scale)
            * Affine::translate(-c.to_vec2())
    }
}

/// Bounding box of raw layout points.
pub fn bounds_of(points: impl IntoIterator<Item = Point>) -> PlexusResult<Rect> {
    let mut it = points.into_iter();
    let first = it
        .next()
        .ok_or_else(|| PlexusError::configuration("layout has no points"))?;
    Ok(it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// Offset from a node center to its label anchor.
pub fn label_offset(side: crate::anatomy::model::Side, radius: f64, buff: f64) -> Vec2 {
    use crate::anatomy::model::Side;
    let d = radius + buff;
    match side {
        Side::Left => Vec2::new(-d, 0.0),
        Side::Right => Vec2::new(d, 0.0),
        Side::Up => Vec2::new(0.0, d),
        Side::Down => Vec2::new(0.0, -d),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anatomy/layout.rs"]
mod tests;
