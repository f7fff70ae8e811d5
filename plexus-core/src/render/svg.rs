//! Stage to SVG document.
//!
//! Scene space is the presentation convention: origin at the frame center, y up, a frame
//! [`FRAME_HEIGHT`] units tall and as wide as the canvas aspect ratio allows.

use std::fmt::Write as _;

use crate::{
    anatomy::model::Side,
    foundation::core::{Canvas, Point, Rgba8},
    render::stage::{Sprite, Stage},
    scene::caption::{Align, CaptionBody, CaptionSpec},
};

/// Frame height in scene units.
pub const FRAME_HEIGHT: f64 = 8.0;

/// Font size points to scene units.
const UNITS_PER_POINT: f64 = 0.0115;

/// Stroke width units to scene units.
const UNITS_PER_STROKE: f64 = 0.01;

const LINE_HEIGHT: f64 = 1.3;

const FLASH_RAYS: usize = 12;

/// Scene-to-pixel mapping for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    px_per_unit: f64,
}

impl Viewport {
    /// Viewport filling `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        let height = f64::from(canvas.height);
        Self {
            width: f64::from(canvas.width),
            height,
            px_per_unit: height / FRAME_HEIGHT,
        }
    }

    /// Frame width in scene units.
    pub fn frame_width(&self) -> f64 {
        self.width / self.px_per_unit
    }

    /// Pixel position of scene point `p`.
    pub fn to_px(&self, p: Point) -> (f64, f64) {
        (
            self.width / 2.0 + p.x * self.px_per_unit,
            self.height / 2.0 - p.y * self.px_per_unit,
        )
    }

    /// Pixel length of `units` scene units.
    pub fn px(&self, units: f64) -> f64 {
        units * self.px_per_unit
    }

    fn font_px(&self, points: f64) -> f64 {
        self.px(points * UNITS_PER_POINT)
    }

    fn stroke_px(&self, width: f64) -> f64 {
        self.px(width * UNITS_PER_STROKE)
    }
}

/// Escape text for SVG character data and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn rgb(c: Rgba8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn alpha(c: Rgba8, opacity: f64) -> f64 {
    (f64::from(c.a) / 255.0 * opacity).clamp(0.0, 1.0)
}

/// Paint order bucket: edges under nodes under labels under captions, flashes on top.
fn layer(s: &Sprite) -> u8 {
    match s {
        Sprite::Edge { .. } => 0,
        Sprite::Node { .. } => 1,
        Sprite::Label { .. } => 2,
        Sprite::Caption { .. } => 3,
        Sprite::Flash { .. } => 4,
    }
}

/// Render `stage` as a standalone SVG document over `background`.
pub fn stage_to_svg(stage: &Stage, canvas: Canvas, background: Rgba8) -> String {
    let vp = Viewport::new(canvas);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    let _ = write!(
        out,
        r#"<rect width="100%" height="100%" fill="{}" fill-opacity="{:.4}"/>"#,
        rgb(background),
        alpha(background, 1.0)
    );

    let mut sprites: Vec<&Sprite> = stage.sprites().collect();
    // Stable: creation order is kept inside a layer.
    sprites.sort_by_key(|s| layer(s));
    for s in sprites {
        write_sprite(&mut out, &vp, s);
    }
    out.push_str("</svg>");
    out
}

fn write_sprite(out: &mut String, vp: &Viewport, sprite: &Sprite) {
    match sprite {
        Sprite::Edge {
            from,
            to,
            state,
            appear,
            ..
        } => {
            if *appear <= 0.0 {
                return;
            }
            let end = from.lerp(*to, *appear);
            let (x1, y1) = vp.to_px(*from);
            let (x2, y2) = vp.to_px(end);
            let _ = write!(
                out,
                r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-opacity="{:.4}" stroke-width="{:.2}" stroke-linecap="round"/>"#,
                rgb(state.color),
                alpha(state.color, state.opacity),
                vp.stroke_px(state.stroke_width)
            );
        }
        Sprite::Node {
            position,
            radius,
            state,
            appear,
            ..
        } => {
            if *appear <= 0.0 {
                return;
            }
            let (cx, cy) = vp.to_px(*position);
            let _ = write!(
                out,
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="{}" fill-opacity="{:.4}"/>"#,
                vp.px(radius * state.scale),
                rgb(state.color),
                alpha(state.color, state.opacity * appear)
            );
        }
        Sprite::Label {
            text,
            anchor,
            side,
            size,
            color,
            appear,
            ..
        } => {
            if *appear <= 0.0 {
                return;
            }
            let font = vp.font_px(*size);
            let (x, y) = vp.to_px(*anchor);
            let (text_anchor, baseline) = match side {
                Side::Left => ("end", y + 0.35 * font),
                Side::Right => ("start", y + 0.35 * font),
                // Above or below the node: the anchor is the text's near edge.
                Side::Up => ("middle", y - 0.15 * font),
                Side::Down => ("middle", y + 0.85 * font),
            };
            let _ = write!(
                out,
                r#"<text x="{x:.2}" y="{baseline:.2}" font-family="sans-serif" font-weight="bold" font-size="{font:.2}" text-anchor="{text_anchor}" fill="{}" fill-opacity="{:.4}">{}</text>"#,
                rgb(*color),
                alpha(*color, *appear),
                escape(text)
            );
        }
        Sprite::Caption { caption, appear } => {
            if *appear > 0.0 {
                write_caption(out, vp, caption, *appear);
            }
        }
        Sprite::Flash {
            at,
            color,
            radius,
            progress,
        } => {
            let (cx, cy) = vp.to_px(*at);
            let inner = vp.px(radius * progress);
            let outer = vp.px(radius * (progress + 0.25).min(1.0));
            let opacity = 1.0 - progress;
            for i in 0..FLASH_RAYS {
                let a = std::f64::consts::TAU * i as f64 / FLASH_RAYS as f64;
                let (s, c) = a.sin_cos();
                let _ = write!(
                    out,
                    r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.4}" stroke-width="{:.2}" stroke-linecap="round"/>"#,
                    cx + c * inner,
                    cy - s * inner,
                    cx + c * outer,
                    cy - s * outer,
                    rgb(*color),
                    alpha(*color, opacity),
                    vp.stroke_px(3.0)
                );
            }
        }
    }
}

fn write_caption(out: &mut String, vp: &Viewport, caption: &CaptionSpec, appear: f64) {
    let (x, y) = vp.to_px(caption.at);
    match &caption.body {
        CaptionBody::Panel {
            width,
            height,
            fill,
            fill_opacity,
            stroke,
            stroke_width,
            corner_radius,
        } => {
            let w = vp.px(*width);
            let h = vp.px(*height);
            let _ = write!(
                out,
                r#"<rect x="{:.2}" y="{:.2}" width="{w:.2}" height="{h:.2}" rx="{r:.2}" ry="{r:.2}" fill="{}" fill-opacity="{:.4}" stroke="{}" stroke-opacity="{:.4}" stroke-width="{:.2}"/>"#,
                x - w / 2.0,
                y - h / 2.0,
                rgb(*fill),
                alpha(*fill, fill_opacity * appear),
                rgb(*stroke),
                alpha(*stroke, appear),
                vp.stroke_px(*stroke_width),
                r = vp.px(*corner_radius),
            );
        }
        CaptionBody::Text {
            lines,
            size,
            color,
            align,
        } => {
            let font = vp.font_px(*size);
            let step = font * LINE_HEIGHT;
            let block = step * lines.len().saturating_sub(1) as f64;
            let text_anchor = match align {
                Align::Left => "start",
                Align::Center => "middle",
            };
            for (i, line) in lines.iter().enumerate() {
                let baseline = y - block / 2.0 + step * i as f64 + 0.35 * font;
                let weight = if line.bold { "bold" } else { "normal" };
                let _ = write!(
                    out,
                    r#"<text x="{x:.2}" y="{baseline:.2}" font-family="sans-serif" font-weight="{weight}" font-size="{font:.2}" text-anchor="{text_anchor}" fill="{}" fill-opacity="{:.4}">{}</text>"#,
                    rgb(*color),
                    alpha(*color, appear),
                    escape(&line.text)
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
