use super::*;
use crate::anatomy::model::Side;

#[test]
fn transform_scales_about_the_bounds_center() {
    let bounds = bounds_of([Point::new(-2.0, -1.0), Point::new(2.0, 1.0)]).unwrap();
    let p = Placement {
        scale: 0.5,
        center: Point::new(1.0, 1.0),
    };
    let xf = p.transform(bounds);
    let mapped = xf * Point::new(2.0, 1.0);
    assert!((mapped.x - 2.0).abs() < 1e-12);
    assert!((mapped.y - 1.5).abs() < 1e-12);
    let c = xf * Point::new(0.0, 0.0);
    assert!((c.x - 1.0).abs() < 1e-12 && (c.y - 1.0).abs() < 1e-12);
}

#[test]
fn bounds_need_points() {
    assert!(bounds_of(std::iter::empty()).is_err());
}

#[test]
fn placement_validation() {
    assert!(Placement::overview().validate().is_ok());
    let bad = Placement {
        scale: 0.0,
        center: Point::ORIGIN,
    };
    assert!(bad.validate().is_err());
}

#[test]
fn label_offsets_point_away_from_the_node() {
    assert_eq!(label_offset(Side::Left, 0.1, 0.3), Vec2::new(-0.4, 0.0));
    assert_eq!(label_offset(Side::Down, 0.1, 0.3), Vec2::new(0.0, -0.4));
}
