use super::*;

fn base() -> VisualState {
    VisualState::node(Rgba8::WHITE, Rgba8::WHITE)
}

#[test]
fn apply_is_pure() {
    let s = base();
    let red = Rgba8::rgb(255, 0, 0);
    let out = s.apply(&Mutation::SetColor(red));
    assert_eq!(out.color, red);
    assert_eq!(s.color, Rgba8::WHITE);
}

#[test]
fn pulse_round_trip_restores_scale() {
    let s = base();
    let up = s.apply_all(&[Mutation::SetColor(Rgba8::rgb(1, 2, 3)), Mutation::ScaleBy(1.3)]);
    let down = up.apply(&Mutation::ScaleBy(1.0 / 1.3));
    assert!((down.scale - s.scale).abs() < 1e-12);
    assert_eq!(down.color, Rgba8::rgb(1, 2, 3));
}

#[test]
fn labels_toggle() {
    let c = Rgba8::rgb(0x4e, 0xcd, 0xc4);
    let shown = base().apply(&Mutation::ShowLabel(c));
    assert!(shown.label_visible);
    assert_eq!(shown.label_color, c);
    assert!(!shown.apply(&Mutation::HideLabel).label_visible);
}

#[test]
fn opacity_is_clamped_on_apply() {
    assert_eq!(base().apply(&Mutation::SetOpacity(3.0)).opacity, 1.0);
}

#[test]
fn validate_rejects_degenerate_values() {
    assert!(Mutation::ScaleBy(0.0).validate().is_err());
    assert!(Mutation::ScaleBy(f64::INFINITY).validate().is_err());
    assert!(Mutation::SetOpacity(-0.1).validate().is_err());
    assert!(Mutation::SetStrokeWidth(-1.0).validate().is_err());
    assert!(Mutation::ScaleBy(1.2).validate().is_ok());
    assert!(Mutation::HideLabel.validate().is_ok());
}

#[test]
fn lerp_switches_labels_only_at_the_end() {
    let from = base();
    let to = from.apply_all(&[Mutation::ScaleBy(2.0), Mutation::ShowLabel(Rgba8::WHITE)]);
    let mid = from.lerp(&to, 0.5);
    assert!((mid.scale - 1.5).abs() < 1e-12);
    assert!(!mid.label_visible);
    assert!(from.lerp(&to, 1.0).label_visible);
}

#[test]
fn mutation_serde_is_tagged() {
    let s = serde_json::to_string(&Mutation::ScaleBy(1.2)).unwrap();
    assert_eq!(s, r#"{"op":"scale_by","value":1.2}"#);
}
