use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::Smooth];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?}");
    }
    assert!(Ease::Smooth.apply(-0.5).abs() < 1e-9);
    assert!((Ease::Smooth.apply(1.5) - 1.0).abs() < 1e-9);
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn smooth_is_symmetric() {
    for t in [0.1, 0.2, 0.3, 0.4] {
        let lo = Ease::Smooth.apply(t);
        let hi = Ease::Smooth.apply(1.0 - t);
        assert!((lo + hi - 1.0).abs() < 1e-9);
    }
    assert!(Ease::Smooth.apply(0.1) < 0.1);
}

#[test]
fn serde_names_are_snake_case() {
    let s = serde_json::to_string(&Ease::Smooth).unwrap();
    assert_eq!(s, "\"smooth\"");
    let back: Ease = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(back, Ease::Linear);
}
