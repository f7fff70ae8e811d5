use super::*;

const SMALL: Canvas = Canvas {
    width: 64,
    height: 36,
};

#[test]
fn empty_stage_is_the_background() {
    let r = Rasterizer::new();
    let bg = Rgba8::rgb(0x10, 0x20, 0x30);
    let frame = r.render_stage(&Stage::new(), SMALL, bg).unwrap();
    assert_eq!((frame.width, frame.height), (64, 36));
    assert_eq!(frame.data.len(), 64 * 36 * 4);
    assert_eq!(&frame.data[0..4], &[0x10, 0x20, 0x30, 0xff]);
}

#[test]
fn rejects_zero_sized_canvas() {
    let r = Rasterizer::new();
    let err = r.render_svg("<svg/>", Canvas { width: 0, height: 10 });
    assert!(matches!(err, Err(PlexusError::Render(_))));
}

#[test]
fn straight_rgba_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.straight_rgba(), vec![128, 0, 0, 128]);
}

#[test]
fn saves_png() {
    let dir = std::env::temp_dir().join(format!("plexus-raster-{}", std::process::id()));
    let path = dir.join("nested").join("frame.png");
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![255; 16],
        premultiplied: false,
    };
    frame.save_png(&path).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
