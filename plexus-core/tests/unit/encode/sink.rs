use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: vec![v; 16],
        premultiplied: false,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(2)).unwrap();
    sink.end().unwrap();
    assert!(sink.is_ended());
    assert_eq!(sink.config().unwrap().width, 2);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, [0, 1]);
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = std::env::temp_dir().join(format!("plexus-pngseq-{}", std::process::id()));
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(255)).unwrap();
    sink.push_frame(FrameIndex(7), &frame(255)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.written(), 2);
    assert!(dir.join("frame_00000.png").exists());
    assert!(sink.frame_path(FrameIndex(7)).ends_with("frame_00007.png"));
    assert!(dir.join("frame_00007.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_checks_frame_size() {
    let dir = std::env::temp_dir().join(format!("plexus-pngsize-{}", std::process::id()));
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink.push_frame(FrameIndex(0), &frame(0)).is_err());
    sink.begin(SinkConfig { width: 4, ..cfg() }).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame(0)),
        Err(PlexusError::Render(_))
    ));
    let _ = std::fs::remove_dir_all(&dir);
}
