use super::*;
use crate::anatomy::visual::VisualState;
use crate::render::port::RenderRequest;

const HD: Canvas = Canvas {
    width: 1920,
    height: 1080,
};

#[test]
fn viewport_centers_the_origin_with_y_up() {
    let vp = Viewport::new(HD);
    assert_eq!(vp.to_px(Point::new(0.0, 0.0)), (960.0, 540.0));
    assert_eq!(vp.to_px(Point::new(0.0, 4.0)), (960.0, 0.0));
    assert_eq!(vp.px(1.0), 135.0);
    assert!((vp.frame_width() - 8.0 * 16.0 / 9.0).abs() < 1e-12);
}

#[test]
fn escapes_markup() {
    assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    assert_eq!(escape("Horner's"), "Horner&apos;s");
}

#[test]
fn edges_paint_under_nodes() {
    let mut stage = Stage::new();
    stage.apply(
        &RenderRequest::CreateNode {
            id: "a".to_string(),
            position: Point::new(0.0, 0.0),
            radius: 0.2,
            state: VisualState::node(Rgba8::WHITE, Rgba8::WHITE),
        },
        1.0,
    );
    stage.apply(
        &RenderRequest::CreateEdge {
            source: "a".to_string(),
            target: "b".to_string(),
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 0.0),
            state: VisualState::edge(Rgba8::WHITE, 4.0),
        },
        0.5,
    );
    let svg = stage_to_svg(&stage, HD, Rgba8::rgb(0, 0, 0));
    let line = svg.find("<line").unwrap();
    let circle = svg.find("<circle").unwrap();
    assert!(line < circle);
    // Half-drawn edge ends halfway.
    assert!(svg.contains(r#"x2="1027.50""#));
    assert!(svg.starts_with("<svg") && svg.ends_with("</svg>"));
}

#[test]
fn captions_render_each_line() {
    let mut stage = Stage::new();
    let caption = CaptionSpec::text("t", Point::new(0.0, 0.0), 20.0, Rgba8::WHITE)
        .bold("Mechanism:")
        .line("arm <pulled>");
    stage.apply(&RenderRequest::ShowCaption { caption }, 1.0);
    let svg = stage_to_svg(&stage, HD, Rgba8::rgb(0, 0, 0));
    assert_eq!(svg.matches("<text").count(), 2);
    assert!(svg.contains(r#"font-weight="bold""#));
    assert!(svg.contains("arm &lt;pulled&gt;"));
}
