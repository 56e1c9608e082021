use super::*;
use crate::foundation::core::Fps;

fn sink_cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps { num: 30, den: 1 },
    }
}

#[test]
fn config_validation_catches_bad_geometry() {
    let cfg = EncodeConfig::new("out/walker.mp4");
    assert!(cfg.validate(&sink_cfg(0, 10)).is_err());
    assert!(cfg.validate(&sink_cfg(11, 10)).is_err());
    assert!(
        cfg.validate(&SinkConfig {
            fps: Fps { num: 0, den: 1 },
            ..sink_cfg(10, 10)
        })
        .is_err()
    );
    cfg.validate(&sink_cfg(10, 10)).unwrap();
}

#[test]
fn empty_out_path_is_rejected() {
    assert!(EncodeConfig::new("").validate(&sink_cfg(10, 10)).is_err());
}

#[test]
fn flatten_premul_over_black() {
    let src = [128u8, 0, 0, 128];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_black() {
    let src = [255u8, 0, 0, 128];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);
}

#[test]
fn flatten_transparent_yields_background() {
    let src = [0u8; 4];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_length_mismatch() {
    let mut dst = [0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(EncodeConfig::new("out/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
}

#[test]
fn unstarted_sink_drops_quietly() {
    let sink = FfmpegSink::new(EncodeConfig::new("out/never.mp4"));
    assert_eq!(sink.child_id(), None);
    drop(sink);
}

#[cfg(target_os = "linux")]
#[test]
fn abandoned_sink_reaps_ffmpeg_on_drop() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("folio_abandoned_{}.mp4", std::process::id()));
    let mut cfg = EncodeConfig::new(&out);
    cfg.overwrite = true;
    let mut sink = FfmpegSink::new(cfg);
    sink.begin(sink_cfg(16, 16)).unwrap();
    let frame = FrameRGBA {
        width: 16,
        height: 16,
        data: vec![255; 16 * 16 * 4],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    let pid = sink.child_id().unwrap();
    assert!(std::path::Path::new(&format!("/proc/{pid}")).exists());

    drop(sink);
    assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
    std::fs::remove_file(&out).ok();
}
