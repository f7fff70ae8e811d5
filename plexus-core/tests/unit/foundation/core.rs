use super::*;

#[test]
fn hex_parses_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::from_hex("#FF6B6B").unwrap(), Rgba8::rgb(0xff, 0x6b, 0x6b));
    assert_eq!(Rgba8::from_hex("4ecdc4").unwrap(), Rgba8::rgb(0x4e, 0xcd, 0xc4));
    assert_eq!(Rgba8::from_hex("#fff").unwrap(), Rgba8::WHITE);
    let c = Rgba8::from_hex("#1a1f3af2").unwrap();
    assert_eq!(c.a, 0xf2);
    assert_eq!(c.to_hex(), "#1a1f3af2");
}

#[test]
fn hex_rejects_garbage() {
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#GGGGGG").is_err());
    assert!(Rgba8::from_hex("").is_err());
}

#[test]
fn color_serde_uses_hex_strings() {
    let s = serde_json::to_string(&Rgba8::rgb(0x55, 0x55, 0x55)).unwrap();
    assert_eq!(s, "\"#555555\"");
    let back: Rgba8 = serde_json::from_str(&s).unwrap();
    assert_eq!(back, Rgba8::rgb(0x55, 0x55, 0x55));
}

#[test]
fn lerp_hits_endpoints() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(200, 100, 50);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(100, 50, 25));
}

#[test]
fn fps_frame_math() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frame_time(15), Seconds(0.5));
    assert_eq!(fps.frames_for(Seconds(1.0)), 31);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn seconds_validation() {
    assert!(Seconds(0.0).validate("run time").is_ok());
    assert!(Seconds(-1.0).validate("run time").is_err());
    assert!(Seconds(f64::NAN).validate("run time").is_err());
}
