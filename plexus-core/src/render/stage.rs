use crate::{
    anatomy::{
        model::{ElementKey, Side},
        visual::VisualState,
    },
    foundation::core::{Point, Rgba8},
    render::port::RenderRequest,
    scene::caption::CaptionSpec,
};

/// Address of a sprite on the stage.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpriteKey {
    /// A node or edge.
    Element(ElementKey),
    /// The label of a node.
    Label(String),
    /// A caption by id.
    Caption(String),
    /// The n-th flash of the sampled interval.
    Flash(usize),
}

/// One drawable thing at a sampled instant.
#[derive(Clone, Debug, PartialEq)]
pub enum Sprite {
    /// A node disc.
    Node {
        /// Node id.
        id: String,
        /// Center.
        position: Point,
        /// Radius at scale 1.0.
        radius: f64,
        /// Interpolated visual state.
        state: VisualState,
        /// Creation progress in `[0, 1]`.
        appear: f64,
    },
    /// An edge line.
    Edge {
        /// Upstream node id.
        source: String,
        /// Downstream node id.
        target: String,
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Interpolated visual state.
        state: VisualState,
        /// Fraction of the line drawn.
        appear: f64,
    },
    /// A node label.
    Label {
        /// Owning node id.
        node: String,
        /// Text.
        text: String,
        /// Alignment point.
        anchor: Point,
        /// Side of the node.
        side: Side,
        /// Font size in points.
        size: f64,
        /// Text color.
        color: Rgba8,
        /// Write progress in `[0, 1]`.
        appear: f64,
    },
    /// A caption.
    Caption {
        /// Caption content.
        caption: CaptionSpec,
        /// Show progress in `[0, 1]`.
        appear: f64,
    },
    /// A flash in flight.
    Flash {
        /// Center.
        at: Point,
        /// Ray color.
        color: Rgba8,
        /// Final radius.
        radius: f64,
        /// Animation progress in `(0, 1)`.
        progress: f64,
    },
}

impl Sprite {
    fn key(&self, flash_index: usize) -> SpriteKey {
        match self {
            Sprite::Node { id, .. } => SpriteKey::Element(ElementKey::node(id.as_str())),
            Sprite::Edge { source, target, .. } => {
                SpriteKey::Element(ElementKey::edge(source.as_str(), target.as_str()))
            }
            Sprite::Label { node, .. } => SpriteKey::Label(node.clone()),
            Sprite::Caption { caption, .. } => SpriteKey::Caption(caption.id.clone()),
            Sprite::Flash { .. } => SpriteKey::Flash(flash_index),
        }
    }
}

/// Move the fields that differ between `from` and `to`, leaving the rest of `current` alone, so
/// concurrent mutations of one element do not overwrite each other mid-flight.
fn blend(current: &VisualState, from: &VisualState, to: &VisualState, p: f64) -> VisualState {
    let mid = from.lerp(to, p);
    VisualState {
        color: if from.color != to.color { mid.color } else { current.color },
        scale: if from.scale != to.scale { mid.scale } else { current.scale },
        opacity: if from.opacity != to.opacity { mid.opacity } else { current.opacity },
        stroke_width: if from.stroke_width != to.stroke_width {
            mid.stroke_width
        } else {
            current.stroke_width
        },
        label_visible: if from.label_visible != to.label_visible {
            mid.label_visible
        } else {
            current.label_visible
        },
        label_color: if from.label_color != to.label_color {
            mid.label_color
        } else {
            current.label_color
        },
    }
}

/// Everything drawn at one instant, in creation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stage {
    sprites: Vec<(SpriteKey, Sprite)>,
    flashes: usize,
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites in creation order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().map(|(_, s)| s)
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// `true` when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite at `key`.
    pub fn get(&self, key: &SpriteKey) -> Option<&Sprite> {
        self.sprites.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    fn get_mut(&mut self, key: &SpriteKey) -> Option<&mut Sprite> {
        self.sprites
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, s)| s)
    }

    /// Interpolated visual state of a drawn node or edge.
    pub fn element_state(&self, key: &ElementKey) -> Option<&VisualState> {
        match self.get(&SpriteKey::Element(key.clone()))? {
            Sprite::Node { state, .. } | Sprite::Edge { state, .. } => Some(state),
            _ => None,
        }
    }

    /// `true` if `node` has a fully written label.
    pub fn label_visible(&self, node: &str) -> bool {
        matches!(
            self.get(&SpriteKey::Label(node.to_string())),
            Some(Sprite::Label { appear, .. }) if *appear >= 1.0
        )
    }

    fn upsert(&mut self, sprite: Sprite) {
        let key = sprite.key(self.flashes);
        match self.get_mut(&key) {
            Some(slot) => *slot = sprite,
            None => self.sprites.push((key, sprite)),
        }
    }

    fn fade_out(&mut self, key: &SpriteKey, progress: f64) {
        if progress >= 1.0 {
            self.sprites.retain(|(k, _)| k != key);
            return;
        }
        if let Some(Sprite::Label { appear, .. } | Sprite::Caption { appear, .. }) = self.get_mut(key) {
            *appear = (1.0 - progress).min(*appear);
        }
    }

    /// Apply `request` at eased progress `progress` in `[0, 1]`.
    pub fn apply(&mut self, request: &RenderRequest, progress: f64) {
        let p = progress.clamp(0.0, 1.0);
        match request {
            RenderRequest::CreateNode {
                id,
                position,
                radius,
                state,
            } => self.upsert(Sprite::Node {
                id: id.clone(),
                position: *position,
                radius: *radius,
                state: *state,
                appear: p,
            }),
            RenderRequest::CreateEdge {
                source,
                target,
                from,
                to,
                state,
            } => self.upsert(Sprite::Edge {
                source: source.clone(),
                target: target.clone(),
                from: *from,
                to: *to,
                state: *state,
                appear: p,
            }),
            RenderRequest::WriteLabel {
                node,
                text,
                anchor,
                side,
                size,
                color,
            } => self.upsert(Sprite::Label {
                node: node.clone(),
                text: text.clone(),
                anchor: *anchor,
                side: *side,
                size: *size,
                color: *color,
                appear: p,
            }),
            RenderRequest::RemoveLabel { node } => self.fade_out(&SpriteKey::Label(node.clone()), p),
            RenderRequest::Mutate { key, from, to, .. } => {
                // Elements not drawn yet pick up the model state when they are created.
                if let Some(Sprite::Node { state, .. } | Sprite::Edge { state, .. }) =
                    self.get_mut(&SpriteKey::Element(key.clone()))
                {
                    *state = blend(state, from, to, p);
                }
            }
            RenderRequest::ShowCaption { caption } => self.upsert(Sprite::Caption {
                caption: caption.clone(),
                appear: p,
            }),
            RenderRequest::RemoveCaption { id } => self.fade_out(&SpriteKey::Caption(id.clone()), p),
            RenderRequest::Flash { at, color, radius } => {
                if p > 0.0 && p < 1.0 {
                    self.upsert(Sprite::Flash {
                        at: *at,
                        color: *color,
                        radius: *radius,
                        progress: p,
                    });
                    self.flashes += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stage.rs"]
mod tests;
