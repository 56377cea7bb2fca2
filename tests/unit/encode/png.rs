use super::*;
use crate::foundation::core::Fps;
use crate::foundation::math::premul_rgba8;

fn frame(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn unpremultiply_inverts_premultiply_closely() {
    for c in [0u8, 17, 128, 204, 255] {
        for a in [1u8, 64, 128, 254] {
            let p = premul_rgba8([c, c, c, a]);
            let back = unpremultiply(&p);
            let err = (i32::from(back[0]) - i32::from(c)).abs();
            assert!(err <= 255 / i32::from(a) + 1, "c={c} a={a} back={back:?}");
            assert_eq!(back[3], a);
        }
    }
    assert_eq!(unpremultiply(&[9, 9, 9, 0]), vec![0, 0, 0, 0]);
    assert_eq!(unpremultiply(&[1, 2, 3, 255]), vec![1, 2, 3, 255]);
}

#[test]
fn sequence_names_are_zero_padded() {
    let sink = PngSequenceSink::new("out").with_prefix("spiral_");
    assert_eq!(
        sink.path_for(FrameIndex(42)),
        PathBuf::from("out").join("spiral_000042.png")
    );
}

#[test]
fn sequence_sink_writes_pngs_in_order() {
    let dir = PathBuf::from("target").join("png_sink_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(4, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &frame(4, 2, [0, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &frame(4, 2, [255, 255, 255, 255]))
        .unwrap();
    assert!(
        sink.push_frame(FrameIndex(1), &frame(4, 2, [0, 0, 0, 255]))
            .is_err()
    );
    assert!(
        sink.push_frame(FrameIndex(2), &frame(2, 2, [0, 0, 0, 255]))
            .is_err()
    );
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    let img = image::open(dir.join("frame_000001.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1).0, [255, 255, 255, 255]);
}

#[test]
fn push_before_begin_fails() {
    let mut sink = PngSequenceSink::new(PathBuf::from("target").join("png_sink_unstarted"));
    assert!(
        sink.push_frame(FrameIndex(0), &frame(2, 2, [0, 0, 0, 255]))
            .is_err()
    );
    assert!(sink.end().is_err());
}
