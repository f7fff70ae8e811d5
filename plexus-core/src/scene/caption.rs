use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{PlexusError, PlexusResult};

/// Horizontal alignment of a text block around its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Anchor is the left edge.
    Left,
    /// Anchor is the center.
    Center,
}

/// One line of caption text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLine {
    /// Text content.
    pub text: String,
    /// Bold weight.
    pub bold: bool,
}

/// What a caption draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionBody {
    /// A block of lines.
    Text {
        /// Lines top to bottom.
        lines: Vec<TextLine>,
        /// Font size in points (1080p reference).
        size: f64,
        /// Text color.
        color: Rgba8,
        /// Alignment around the anchor.
        align: Align,
    },
    /// A rounded, outlined rectangle.
    Panel {
        /// Width in scene units.
        width: f64,
        /// Height in scene units.
        height: f64,
        /// Fill color.
        fill: Rgba8,
        /// Fill opacity in `[0, 1]`.
        fill_opacity: f64,
        /// Outline color.
        stroke: Rgba8,
        /// Outline width.
        stroke_width: f64,
        /// Corner radius in scene units.
        corner_radius: f64,
    },
}

/// A stage element that is not part of the anatomical graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionSpec {
    /// Unique id on the stage.
    pub id: String,
    /// Anchor point in scene units.
    pub at: Point,
    /// Content.
    pub body: CaptionBody,
}

impl CaptionSpec {
    /// Empty text caption; add lines with [`CaptionSpec::line`] and [`CaptionSpec::bold`].
    pub fn text(id: impl Into<String>, at: Point, size: f64, color: Rgba8) -> Self {
        Self {
            id: id.into(),
            at,
            body: CaptionBody::Text {
                lines: Vec::new(),
                size,
                color,
                align: Align::Center,
            },
        }
    }

    /// Rounded panel.
    #[allow(clippy::too_many_arguments)]
    pub fn panel(
        id: impl Into<String>,
        at: Point,
        width: f64,
        height: f64,
        fill: Rgba8,
        fill_opacity: f64,
        stroke: Rgba8,
        stroke_width: f64,
    ) -> Self {
        Self {
            id: id.into(),
            at,
            body: CaptionBody::Panel {
                width,
                height,
                fill,
                fill_opacity,
                stroke,
                stroke_width,
                corner_radius: 0.2,
            },
        }
    }

    fn push_line(mut self, text: impl Into<String>, bold: bool) -> Self {
        if let CaptionBody::Text { lines, .. } = &mut self.body {
            lines.push(TextLine {
                text: text.into(),
                bold,
            });
        }
        self
    }

    /// Append a regular line.
    pub fn line(self, text: impl Into<String>) -> Self {
        self.push_line(text, false)
    }

    /// Append a bold line.
    pub fn bold(self, text: impl Into<String>) -> Self {
        self.push_line(text, true)
    }

    /// Left-align a text caption at its anchor.
    pub fn left_aligned(mut self) -> Self {
        if let CaptionBody::Text { align, .. } = &mut self.body {
            *align = Align::Left;
        }
        self
    }

    /// Override a panel's corner radius.
    pub fn corner_radius(mut self, r: f64) -> Self {
        if let CaptionBody::Panel { corner_radius, .. } = &mut self.body {
            *corner_radius = r;
        }
        self
    }

    /// Reject empty ids, empty text and degenerate panels.
    pub fn validate(&self) -> PlexusResult<()> {
        if self.id.trim().is_empty() {
            return Err(PlexusError::configuration("caption id must be non-empty"));
        }
        match &self.body {
            CaptionBody::Text { lines, size, .. } => {
                if lines.is_empty() {
                    return Err(PlexusError::configuration(format!(
                        "caption '{}' has no lines",
                        self.id
                    )));
                }
                if !size.is_finite() || *size <= 0.0 {
                    return Err(PlexusError::configuration(format!(
                        "caption '{}' font size must be > 0",
                        self.id
                    )));
                }
            }
            CaptionBody::Panel {
                width,
                height,
                fill_opacity,
                ..
            } => {
                if *width <= 0.0 || *height <= 0.0 {
                    return Err(PlexusError::configuration(format!(
                        "panel '{}' must have a positive size",
                        self.id
                    )));
                }
                if !(0.0..=1.0).contains(fill_opacity) {
                    return Err(PlexusError::configuration(format!(
                        "panel '{}' fill opacity must be in [0, 1]",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}
