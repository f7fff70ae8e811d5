use super::*;
use crate::anatomy::visual::Mutation;

const RED: Rgba8 = Rgba8::rgb(0xff, 0, 0);

fn node(id: &str) -> RenderRequest {
    RenderRequest::CreateNode {
        id: id.to_string(),
        position: Point::new(0.0, 0.0),
        radius: 0.2,
        state: VisualState::node(Rgba8::WHITE, Rgba8::WHITE),
    }
}

#[test]
fn creation_upserts_and_keeps_order() {
    let mut stage = Stage::new();
    stage.apply(&node("a"), 0.3);
    stage.apply(&node("b"), 1.0);
    stage.apply(&node("a"), 1.0);
    assert_eq!(stage.len(), 2);
    let ids: Vec<&str> = stage
        .sprites()
        .map(|s| match s {
            Sprite::Node { id, .. } => id.as_str(),
            _ => "",
        })
        .collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(matches!(
        stage.get(&SpriteKey::Element(ElementKey::node("a"))),
        Some(Sprite::Node { appear, .. }) if *appear == 1.0
    ));
}

#[test]
fn mutations_interpolate_drawn_elements_only() {
    let from = VisualState::node(Rgba8::WHITE, Rgba8::WHITE);
    let to = from.apply(&Mutation::ScaleBy(2.0));
    let mutate = |id: &str| RenderRequest::Mutate {
        key: ElementKey::node(id),
        mutations: vec![Mutation::ScaleBy(2.0)],
        from,
        to,
    };

    let mut stage = Stage::new();
    stage.apply(&node("a"), 1.0);
    stage.apply(&mutate("a"), 0.5);
    stage.apply(&mutate("ghost"), 0.5);
    assert_eq!(stage.len(), 1);
    let state = stage.element_state(&ElementKey::node("a")).unwrap();
    assert!((state.scale - 1.5).abs() < 1e-12);
}

#[test]
fn removals_fade_then_drop() {
    let write = RenderRequest::WriteLabel {
        node: "a".to_string(),
        text: "A".to_string(),
        anchor: Point::new(1.0, 0.0),
        side: Side::Right,
        size: 10.0,
        color: RED,
    };
    let remove = RenderRequest::RemoveLabel {
        node: "a".to_string(),
    };

    let mut stage = Stage::new();
    stage.apply(&write, 1.0);
    assert!(stage.label_visible("a"));
    stage.apply(&remove, 0.25);
    assert!(!stage.label_visible("a"));
    assert!(matches!(
        stage.get(&SpriteKey::Label("a".to_string())),
        Some(Sprite::Label { appear, .. }) if (*appear - 0.75).abs() < 1e-12
    ));
    stage.apply(&remove, 1.0);
    assert!(stage.is_empty());
}

#[test]
fn flashes_exist_only_while_in_flight() {
    let flash = RenderRequest::Flash {
        at: Point::new(0.0, 0.0),
        color: RED,
        radius: 0.8,
    };
    let mut stage = Stage::new();
    stage.apply(&flash, 0.0);
    stage.apply(&flash, 1.0);
    assert!(stage.is_empty());
    stage.apply(&flash, 0.5);
    stage.apply(&flash, 0.6);
    assert_eq!(stage.len(), 2);
}

#[test]
fn concurrent_mutations_of_one_element_both_progress() {
    let base = VisualState::node(Rgba8::WHITE, Rgba8::WHITE);
    let recolored = base.apply(&Mutation::SetColor(RED));
    let labelled = recolored.apply(&Mutation::ShowLabel(RED));
    let recolor = RenderRequest::Mutate {
        key: ElementKey::node("a"),
        mutations: vec![Mutation::SetColor(RED)],
        from: base,
        to: recolored,
    };
    let label = RenderRequest::Mutate {
        key: ElementKey::node("a"),
        mutations: vec![Mutation::ShowLabel(RED)],
        from: recolored,
        to: labelled,
    };

    let mut stage = Stage::new();
    stage.apply(&node("a"), 1.0);
    stage.apply(&recolor, 0.5);
    stage.apply(&label, 0.5);
    let mid = *stage.element_state(&ElementKey::node("a")).unwrap();
    assert_eq!(mid.color, Rgba8::WHITE.lerp(RED, 0.5));

    stage.apply(&recolor, 1.0);
    stage.apply(&label, 1.0);
    assert_eq!(stage.element_state(&ElementKey::node("a")), Some(&labelled));
}
