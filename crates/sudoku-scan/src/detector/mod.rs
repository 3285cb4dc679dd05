//! The per-frame detection pipeline, stage by stage.
//!
//! [`SudokuScanner`] drives the stages in order: binarize the frame, find
//! the puzzle quadrilateral, order its corners, rectify the perspective,
//! partition into cells, normalize each glyph, gate the recognition output,
//! and solve. The individual stages are exported for callers that want to
//! run or test them in isolation.

mod cells;
mod error;
mod grid;
mod params;
mod pipeline;
mod preprocess;
mod rectify;
mod result;

pub use cells::{normalize_cell, CellGrid};
pub use error::ScanError;
pub use grid::find_puzzle_quad;
pub use params::{CellParams, GridParams, PreprocessParams, ScanParams};
pub use pipeline::SudokuScanner;
pub use preprocess::binarize_frame;
pub use rectify::{rectify, RectifiedPuzzle};
pub use result::PuzzleScan;
