use crate::foundation::core::Rgba8;
use crate::foundation::error::{PlexusError, PlexusResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Colors used by the scenes.
///
/// Every field is optional in JSON; missing fields keep the default palette.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Roots (C5 to T1).
    pub root: Rgba8,
    /// Trunks.
    pub trunk: Rgba8,
    /// Anterior divisions.
    pub division_anterior: Rgba8,
    /// Posterior divisions.
    pub division_posterior: Rgba8,
    /// Lateral cord.
    pub cord_lateral: Rgba8,
    /// Medial cord.
    pub cord_medial: Rgba8,
    /// Posterior cord.
    pub cord_posterior: Rgba8,
    /// Musculocutaneous nerve.
    pub branch_musculocutaneous: Rgba8,
    /// Axillary nerve.
    pub branch_axillary: Rgba8,
    /// Radial nerve.
    pub branch_radial: Rgba8,
    /// Median nerve.
    pub branch_median: Rgba8,
    /// Ulnar nerve.
    pub branch_ulnar: Rgba8,
    /// Nodes before they are colored.
    pub neutral_node: Rgba8,
    /// Edges before they are colored.
    pub neutral_edge: Rgba8,
    /// Default label color.
    pub label: Rgba8,
    /// Injured structures in the clinical scenes.
    pub injury: Rgba8,
    /// Flash emphasis.
    pub flash: Rgba8,
    /// Frame background.
    pub background: Rgba8,
    /// Caption panel fill.
    pub panel_fill: Rgba8,
    /// Caption panel outline.
    pub panel_stroke: Rgba8,
    /// Titles and body text.
    pub title: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            root: Rgba8::rgb(0xff, 0x6b, 0x6b),
            trunk: Rgba8::rgb(0x4e, 0xcd, 0xc4),
            division_anterior: Rgba8::rgb(0x95, 0xe7, 0x7d),
            division_posterior: Rgba8::rgb(0xff, 0xb8, 0x4d),
            cord_lateral: Rgba8::rgb(0xa7, 0x8b, 0xfa),
            cord_medial: Rgba8::rgb(0xf4, 0x72, 0xb6),
            cord_posterior: Rgba8::rgb(0x60, 0xa5, 0xfa),
            branch_musculocutaneous: Rgba8::rgb(0xff, 0xd7, 0x00),
            branch_axillary: Rgba8::rgb(0xff, 0xa5, 0x00),
            branch_radial: Rgba8::rgb(0xff, 0x8c, 0x00),
            branch_median: Rgba8::rgb(0xff, 0x63, 0x47),
            branch_ulnar: Rgba8::rgb(0xff, 0x45, 0x00),
            neutral_node: Rgba8::WHITE,
            neutral_edge: Rgba8::rgb(0x55, 0x55, 0x55),
            label: Rgba8::WHITE,
            injury: Rgba8::rgb(0xfc, 0x62, 0x55),
            flash: Rgba8::rgb(0xff, 0xff, 0x00),
            background: Rgba8::rgb(0x0a, 0x0e, 0x27),
            panel_fill: Rgba8::rgb(0x1a, 0x1f, 0x3a),
            panel_stroke: Rgba8::rgb(0x4a, 0x55, 0x68),
            title: Rgba8::WHITE,
        }
    }
}

/// Sizes and factors used by the model builder and the scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Geometry {
    /// Radius of root, trunk, cord and branch nodes, in layout units.
    pub node_radius: f64,
    /// Radius of division nodes, in layout units.
    pub division_radius: f64,
    /// Default edge stroke width.
    pub edge_stroke_width: f64,
    /// Stroke width of highlighted injury pathways.
    pub highlight_stroke_width: f64,
    /// Scale factor of a pulse on roots, trunks and cords.
    pub pulse_factor: f64,
    /// Scale factor of a pulse on terminal branches.
    pub branch_pulse_factor: f64,
    /// Opacity of structures dimmed in the clinical scenes.
    pub dim_opacity: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            node_radius: 0.11,
            division_radius: 0.07,
            edge_stroke_width: 3.5,
            highlight_stroke_width: 6.0,
            pulse_factor: 1.2,
            branch_pulse_factor: 1.3,
            dim_opacity: 0.25,
        }
    }
}

/// Complete style configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Colors.
    pub palette: Palette,
    /// Sizes and factors.
    pub geometry: Geometry,
}

impl StyleConfig {
    /// Parse a style from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> PlexusResult<Self> {
        let style: Self = serde_json::from_reader(r)
            .map_err(|e| PlexusError::configuration(format!("parse style JSON: {e}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Parse a style from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PlexusResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PlexusError::configuration(format!("open style JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check geometry ranges.
    pub fn validate(&self) -> PlexusResult<()> {
        let g = &self.geometry;
        for (name, v) in [
            ("node_radius", g.node_radius),
            ("division_radius", g.division_radius),
            ("edge_stroke_width", g.edge_stroke_width),
            ("highlight_stroke_width", g.highlight_stroke_width),
            ("pulse_factor", g.pulse_factor),
            ("branch_pulse_factor", g.branch_pulse_factor),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(PlexusError::configuration(format!(
                    "style geometry.{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        if !(0.0..=1.0).contains(&g.dim_opacity) {
            return Err(PlexusError::configuration(format!(
                "style geometry.dim_opacity must be in [0, 1] (got {})",
                g.dim_opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
