use super::*;

fn cfg(width: u32, height: u32, fps: Fps) -> SinkConfig {
    SinkConfig { width, height, fps }
}

#[test]
fn config_validation_catches_bad_values() {
    let fps = Fps { num: 30, den: 1 };
    assert!(validate_sink_config(&cfg(0, 10, fps)).is_err());
    assert!(validate_sink_config(&cfg(11, 10, fps)).is_err());
    assert!(validate_sink_config(&cfg(10, 10, Fps { num: 0, den: 1 })).is_err());
    assert!(validate_sink_config(&cfg(10, 10, fps)).is_ok());
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    // Premultiplied red @ 50% alpha => rgb is 128,0,0 when premul.
    let src = vec![128u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}

#[test]
fn flatten_straight_over_black_produces_expected_rgb() {
    // Straight red @ 50% alpha => rgb becomes 128,0,0 over black.
    let src = vec![255u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}

#[test]
fn flatten_transparent_returns_background() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let path = PathBuf::from("target").join("ffmpeg_unit").join("exists.mp4");
    ensure_parent_dir(&path).unwrap();
    std::fs::write(&path, b"placeholder").unwrap();

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path).with_overwrite(false));
    let err = sink
        .begin(cfg(4, 4, Fps { num: 30, den: 1 }))
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

fn process_gone(pid: u32) -> bool {
    !cfg!(target_os = "linux") || !std::path::Path::new(&format!("/proc/{pid}")).exists()
}

#[test]
fn failed_push_then_drop_reaps_ffmpeg() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let path = PathBuf::from("target").join("ffmpeg_unit").join("aborted.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
    sink.begin(cfg(4, 4, Fps { num: 30, den: 1 })).unwrap();
    let pid = sink.child.as_ref().map(Child::id).unwrap();

    let wrong_size = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &wrong_size).is_err());
    assert!(sink.child.is_some());

    drop(sink);
    assert!(process_gone(pid));
}

#[test]
fn abort_releases_every_handle() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let path = PathBuf::from("target").join("ffmpeg_unit").join("aborted_twice.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&path));
    sink.begin(cfg(4, 4, Fps { num: 30, den: 1 })).unwrap();
    let pid = sink.child.as_ref().map(Child::id).unwrap();

    sink.abort();
    assert!(sink.child.is_none());
    assert!(sink.stdin.is_none());
    assert!(sink.stderr_drain.is_none());
    assert!(sink.cfg.is_none());
    assert!(process_gone(pid));

    // A second teardown is a no-op, and `end` now reports the sink as not started.
    sink.abort();
    assert!(sink.end().is_err());
}
