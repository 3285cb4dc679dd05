//! Still-image acquisition behaves like a one-frame stream.

use sudoku_scan::{FrameSource, SourceError, StillImageSource};

#[test]
fn serves_one_frame_then_end_of_stream() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("puzzle.png");

    let png = image::GrayImage::from_fn(8, 6, |x, y| image::Luma([(x * 10 + y) as u8]));
    png.save(&path).expect("write png");

    let mut source = StillImageSource::new(&path);
    let frame = source.next_frame().expect("read").expect("one frame");
    assert_eq!((frame.width, frame.height), (8, 6));
    assert_eq!(frame.get(3, 2), 32);

    // second pull: terminal end-of-stream, not an error
    assert!(source.next_frame().expect("read").is_none());
}

#[test]
fn missing_file_is_a_fatal_open_error() {
    let mut source = StillImageSource::new("/nonexistent/puzzle.png");
    let err = source.next_frame().expect_err("must fail");
    match err {
        SourceError::Open { path, .. } => assert!(path.contains("puzzle.png")),
        other => panic!("unexpected error: {other}"),
    }
}
