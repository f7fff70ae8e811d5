use super::*;
use crate::foundation::core::Fps;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: (data.len() / 4) as u32,
        height: 1,
        data,
        premultiplied,
    }
}

fn flat(src: FrameRGBA, bg: Rgba8) -> Vec<u8> {
    let mut dst = vec![0u8; src.data.len()];
    flatten_onto(&mut dst, &src, bg).unwrap();
    dst
}

#[test]
fn transparent_pixels_show_the_background() {
    let bg = Rgba8::rgb(10, 20, 30);
    assert_eq!(flat(frame(vec![0, 0, 0, 0], true), bg), [10, 20, 30, 255]);
    assert_eq!(flat(frame(vec![200, 7, 9, 0], false), bg), [10, 20, 30, 255]);
}

#[test]
fn opaque_pixels_pass_through_in_both_alpha_modes() {
    let bg = Rgba8::rgb(10, 20, 30);
    for premultiplied in [true, false] {
        assert_eq!(flat(frame(vec![1, 2, 3, 255], premultiplied), bg), [1, 2, 3, 255]);
    }
}

#[test]
fn straight_alpha_is_weighted_before_compositing() {
    let black = Rgba8::rgb(0, 0, 0);
    assert_eq!(flat(frame(vec![255, 128, 0, 128], false), black), [128, 64, 0, 255]);
    // The same half-covered orange, already premultiplied.
    assert_eq!(flat(frame(vec![128, 64, 0, 128], true), black), [128, 64, 0, 255]);
    assert_eq!(
        flat(frame(vec![255, 255, 255, 128], false), Rgba8::WHITE),
        [255, 255, 255, 255]
    );
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_onto(&mut dst, &frame(vec![0; 4], true), Rgba8::WHITE).is_err());
}

#[test]
fn encoder_args_follow_options_and_config() {
    let opts = FfmpegSinkOpts::new(PathBuf::from("renders").join("overview.mp4"))
        .with_preset(EncodePreset::DRAFT)
        .with_title("Overview");
    let cfg = SinkConfig {
        width: 854,
        height: 480,
        fps: Fps::new(15, 1).unwrap(),
    };
    let args: Vec<String> = encoder_args(&opts, &cfg)
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .map(|i| args[i + 1].as_str())
    };

    assert_eq!(args[0], "-y");
    assert_eq!(value_of("-s"), Some("854x480"));
    assert_eq!(value_of("-r"), Some("15/1"));
    assert_eq!(value_of("-preset"), Some("veryfast"));
    assert_eq!(value_of("-crf"), Some("28"));
    assert_eq!(value_of("-metadata"), Some("title=Overview"));
    assert_eq!(
        args.last().map(PathBuf::from),
        Some(PathBuf::from("renders").join("overview.mp4"))
    );
}

#[test]
fn untitled_output_without_overwrite() {
    let opts = FfmpegSinkOpts {
        overwrite: false,
        ..FfmpegSinkOpts::new("plain.mp4")
    };
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    };
    let args: Vec<String> = encoder_args(&opts, &cfg)
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args[0], "-n");
    assert!(!args.iter().any(|a| a == "-metadata"));
    assert!(args.iter().any(|a| a == "medium"));
}

#[test]
fn odd_sizes_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("plexus-odd.mp4"),
    ));
    let cfg = SinkConfig {
        width: 855,
        height: 480,
        fps: Fps::new(15, 1).unwrap(),
    };
    assert!(matches!(sink.begin(cfg), Err(PlexusError::Configuration(_))));
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame(vec![0; 16], true)),
        Err(PlexusError::Render(_))
    ));
    assert!(matches!(sink.end(), Err(PlexusError::Render(_))));
}
