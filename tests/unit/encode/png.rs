use super::*;
use crate::foundation::core::Fps;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "folio_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn writes_numbered_straight_alpha_pngs() {
    let dir = temp_dir("png_sequence");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(2, 1)).unwrap();
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(dir.join("frame_00001.png").exists());
    let img = image::open(dir.join("frame_00000.png")).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rejects_mismatched_frame_size() {
    let dir = temp_dir("png_mismatch");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(4, 4)).unwrap();
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn push_before_begin_fails() {
    let mut sink = PngSequenceSink::new(temp_dir("png_unstarted"));
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0; 4],
        premultiplied: true,
    };
    let err = sink.push_frame(FrameIndex(0), &frame).unwrap_err();
    assert!(matches!(err, FolioError::Encode(_)));
}
