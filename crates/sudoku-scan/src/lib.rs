//! Visual Sudoku solving.
//!
//! Find the puzzle in a photographed or captured scene, rectify its
//! perspective, read the printed digits through a pluggable recognition
//! engine, solve the constraint problem, and plan the overlay that projects
//! the solution back onto the original frame.
//!
//! The pipeline is strictly per-frame: no detection state, board, or
//! mapping survives from one frame to the next. The recognition engine is
//! the one long-lived collaborator; construct it once and lend it to every
//! [`SudokuScanner::scan`] call.
//!
//! ## Quickstart
//!
//! ```no_run
//! use sudoku_scan::{FrameSource, NullRecognizer, ScanParams, StillImageSource, SudokuScanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = StillImageSource::new("puzzle.jpg");
//! let frame = source.next_frame()?.expect("a still source yields one frame");
//!
//! let scanner = SudokuScanner::new(ScanParams::default());
//! let mut engine = NullRecognizer; // swap in a real OCR backend here
//! match scanner.scan(&frame.view(), &mut engine)? {
//!     Some(scan) => println!("recognized {} digits", scan.recognized),
//!     None => println!("no puzzle in view"),
//! }
//! # Ok(())
//! # }
//! ```

mod board;
pub mod detector;
pub mod io;
mod overlay;
mod recognize;
mod solver;
mod source;

pub use board::{Board, BoardParseError};
pub use detector::{
    CellParams, GridParams, PreprocessParams, PuzzleScan, ScanError, ScanParams, SudokuScanner,
};
pub use overlay::{plan_overlay, GlyphMetrics, OverlayDigit, OverlayPlan};
pub use recognize::{accept_reading, DigitReading, DigitRecognizer, NullRecognizer};
pub use solver::solve;
pub use source::{run_live, DisplaySink, FrameSource, SourceError};
#[cfg(feature = "image")]
pub use source::StillImageSource;

pub use sudoku_scan_core as core;
