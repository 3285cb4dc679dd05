//! End-to-end pipeline runs on synthetic frames.

use std::collections::VecDeque;
use std::time::Duration;

use sudoku_scan::core::{GrayImage, GrayImageView};
use sudoku_scan::{
    plan_overlay, run_live, Board, DigitReading, DigitRecognizer, DisplaySink, FrameSource,
    GlyphMetrics, NullRecognizer, OverlayPlan, ScanParams, SourceError, SudokuScanner,
};

const PUZZLE: &str = "\
53..7....
6..195...
.98....6.
8...6...3
4..8.3..1
7...2...6
.6....28.
...419..5
....8..79";

const SOLVED: &str = "\
534678912
672195348
198342567
859761423
426853791
713924856
961537284
287419635
345286179";

const DARK: u8 = 25;
const LIGHT: u8 = 235;

const PUZZLE_X: usize = 95;
const PUZZLE_Y: usize = 15;
const CELL: usize = 50;
const PUZZLE_SIDE: usize = CELL * 9;

/// Paint a printed-page-style puzzle into a light frame: a 4 px outer
/// border, 1 px inner grid lines, and a filled 16x16 blob standing in for
/// each given digit's glyph.
fn render_frame(board: &Board) -> GrayImage {
    let mut frame = GrayImage::filled(640, 480, LIGHT);

    let mut fill = |x0: usize, y0: usize, w: usize, h: usize| {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                frame.put(x, y, DARK);
            }
        }
    };

    // outer border
    fill(PUZZLE_X, PUZZLE_Y, PUZZLE_SIDE, 4);
    fill(PUZZLE_X, PUZZLE_Y + PUZZLE_SIDE - 4, PUZZLE_SIDE, 4);
    fill(PUZZLE_X, PUZZLE_Y, 4, PUZZLE_SIDE);
    fill(PUZZLE_X + PUZZLE_SIDE - 4, PUZZLE_Y, 4, PUZZLE_SIDE);

    // inner grid lines
    for k in 1..9 {
        fill(PUZZLE_X + k * CELL, PUZZLE_Y, 1, PUZZLE_SIDE);
        fill(PUZZLE_X, PUZZLE_Y + k * CELL, PUZZLE_SIDE, 1);
    }

    // glyph blobs for the givens
    for row in 0..9 {
        for col in 0..9 {
            if board.is_given(row, col) {
                fill(
                    PUZZLE_X + col * CELL + 17,
                    PUZZLE_Y + row * CELL + 17,
                    16,
                    16,
                );
            }
        }
    }

    frame
}

/// Returns scripted readings in call order and records how many were asked.
struct ScriptedRecognizer {
    queue: VecDeque<u8>,
    calls: usize,
}

impl ScriptedRecognizer {
    fn for_board(board: &Board) -> Self {
        let mut queue = VecDeque::new();
        for row in 0..9 {
            for col in 0..9 {
                if board.is_given(row, col) {
                    queue.push_back(board.value(row, col));
                }
            }
        }
        Self { queue, calls: 0 }
    }
}

impl DigitRecognizer for ScriptedRecognizer {
    fn recognize(&mut self, glyph: &GrayImageView<'_>) -> Option<DigitReading> {
        self.calls += 1;
        // every glyph arrives at canonical size or larger
        assert!(glyph.width >= 40 && glyph.height >= 40);
        let digit = self.queue.pop_front().expect("glyph in an unexpected cell");
        Some(DigitReading {
            text: digit.to_string(),
            confidence: 95.0,
        })
    }
}

fn scan_params() -> ScanParams {
    let mut params = ScanParams::default();
    // the synthetic border is thick; crop deeper into each cell so its
    // thresholded remnants never register as glyphs
    params.cell.margin = 12;
    params
}

#[test]
fn synthetic_frame_is_recognized_solved_and_reprojected() {
    let given = Board::parse(PUZZLE).expect("puzzle");
    let expected = Board::parse(SOLVED).expect("solution");
    let frame = render_frame(&given);

    let scanner = SudokuScanner::new(scan_params());
    let mut engine = ScriptedRecognizer::for_board(&given);

    let scan = scanner
        .scan(&frame.view(), &mut engine)
        .expect("scan")
        .expect("puzzle in view");

    // every blob produced exactly one recognition call, in row-major order
    assert!(engine.queue.is_empty(), "some given cells went unrecognized");
    assert_eq!(scan.recognized, engine.calls);

    // detected corners sit on the rendered border (within the few pixels
    // the preprocessing dilates it outward)
    let tl = scan.quad.top_left;
    let br = scan.quad.bottom_right;
    assert!((tl.x - PUZZLE_X as f32).abs() <= 8.0, "tl.x = {}", tl.x);
    assert!((tl.y - PUZZLE_Y as f32).abs() <= 8.0, "tl.y = {}", tl.y);
    assert!(
        (br.x - (PUZZLE_X + PUZZLE_SIDE) as f32).abs() <= 8.0,
        "br.x = {}",
        br.x
    );
    assert!(
        (br.y - (PUZZLE_Y + PUZZLE_SIDE) as f32).abs() <= 8.0,
        "br.y = {}",
        br.y
    );

    // the board matches the rendered givens exactly
    for row in 0..9 {
        for col in 0..9 {
            assert_eq!(scan.board.value(row, col), given.value(row, col));
            assert_eq!(scan.board.is_given(row, col), given.is_given(row, col));
        }
    }

    // and the solution is the puzzle's unique completion
    let solution = scan.solution.as_ref().expect("solvable");
    for row in 0..9 {
        for col in 0..9 {
            assert_eq!(solution.value(row, col), expected.value(row, col));
        }
    }

    // overlay anchors reproject into their source cells
    let metrics = GlyphMetrics {
        width: 20.0,
        height: 30.0,
    };
    let plan = plan_overlay(&scan, metrics, 0.8).expect("plan");
    assert_eq!(plan.digits.len(), 81 - scan.recognized);

    let mut digit_iter = plan.digits.iter();
    for row in 0..9 {
        for col in 0..9 {
            if given.is_given(row, col) {
                continue;
            }
            let d = digit_iter.next().expect("one overlay digit per open cell");
            assert_eq!(d.digit, expected.value(row, col));

            let left = (PUZZLE_X + col * CELL) as f32 - 5.0;
            let right = (PUZZLE_X + (col + 1) * CELL) as f32 + 5.0;
            let top = (PUZZLE_Y + row * CELL) as f32 - 5.0;
            let bottom = (PUZZLE_Y + (row + 1) * CELL) as f32 + 5.0;
            assert!(
                d.anchor.x >= left && d.anchor.x <= right,
                "cell ({row},{col}) anchor.x = {}",
                d.anchor.x
            );
            assert!(
                d.anchor.y >= top && d.anchor.y <= bottom,
                "cell ({row},{col}) anchor.y = {}",
                d.anchor.y
            );
        }
    }
}

#[test]
fn blank_frame_reports_no_puzzle() {
    let frame = GrayImage::filled(320, 240, LIGHT);
    let scanner = SudokuScanner::new(ScanParams::default());
    let mut engine = NullRecognizer;
    let outcome = scanner.scan(&frame.view(), &mut engine).expect("scan");
    assert!(outcome.is_none());
}

struct ScriptedSource {
    frames: VecDeque<GrayImage>,
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<GrayImage>, SourceError> {
        Ok(self.frames.pop_front())
    }
}

#[derive(Default)]
struct RecordingSink {
    shown: Vec<String>,
    overlays: usize,
}

impl DisplaySink for RecordingSink {
    fn show(&mut self, name: &str, _image: &GrayImageView<'_>) {
        self.shown.push(name.to_string());
    }

    fn wait_key(&mut self, _timeout: Duration) -> Option<u32> {
        None
    }

    fn render_overlay(&mut self, plan: &OverlayPlan) {
        assert!(!plan.digits.is_empty());
        self.overlays += 1;
    }
}

#[test]
fn live_loop_runs_to_end_of_stream() {
    let given = Board::parse(PUZZLE).expect("puzzle");
    let mut source = ScriptedSource {
        frames: VecDeque::from([GrayImage::filled(640, 480, LIGHT), render_frame(&given)]),
    };
    let mut sink = RecordingSink::default();
    let scanner = SudokuScanner::new(scan_params());
    let mut engine = ScriptedRecognizer::for_board(&given);
    let metrics = GlyphMetrics {
        width: 20.0,
        height: 30.0,
    };

    run_live(&mut source, &mut sink, &scanner, &mut engine, metrics).expect("live run");

    // every frame was previewed; the puzzle frame also showed its
    // rectified view and handed over one overlay plan
    assert_eq!(
        sink.shown.iter().filter(|n| n.as_str() == "original").count(),
        2
    );
    assert_eq!(
        sink.shown.iter().filter(|n| n.as_str() == "rectified").count(),
        1
    );
    assert_eq!(sink.overlays, 1);
}

#[test]
fn quit_key_ends_the_live_loop_early() {
    struct QuitSink;
    impl DisplaySink for QuitSink {
        fn show(&mut self, _name: &str, _image: &GrayImageView<'_>) {}
        fn wait_key(&mut self, _timeout: Duration) -> Option<u32> {
            Some(27)
        }
    }

    let mut source = ScriptedSource {
        frames: VecDeque::from([
            GrayImage::filled(64, 64, LIGHT),
            GrayImage::filled(64, 64, LIGHT),
            GrayImage::filled(64, 64, LIGHT),
        ]),
    };
    let mut sink = QuitSink;
    let scanner = SudokuScanner::new(ScanParams::default());
    let mut engine = NullRecognizer;

    run_live(
        &mut source,
        &mut sink,
        &scanner,
        &mut engine,
        GlyphMetrics {
            width: 20.0,
            height: 30.0,
        },
    )
    .expect("live run");

    // the key press after the first frame stopped the loop
    assert_eq!(source.frames.len(), 2);
}
