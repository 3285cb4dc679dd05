//! Scan outputs.

use sudoku_scan_core::{GrayImage, OrderedQuad, PerspectiveMap};

use crate::board::Board;

use super::cells::CellGrid;

/// Everything one frame produced once a puzzle was found in it.
///
/// All of this is frame-local; nothing here survives into the next frame.
#[derive(Clone, Debug)]
pub struct PuzzleScan {
    /// Puzzle corners in frame coordinates.
    pub quad: OrderedQuad,
    /// Axis-aligned view of the puzzle, `side` x `side` pixels.
    pub rectified: GrayImage,
    pub side: usize,
    /// Frame→rectified mapping pair; the inverse is reused for reprojection.
    pub map: PerspectiveMap,
    /// The 9x9 partition of the rectified square.
    pub cells: CellGrid,
    /// The recognized givens.
    pub board: Board,
    /// How many digit readings passed the confidence gate.
    pub recognized: usize,
    /// First solution found, `None` when the givens admit none.
    pub solution: Option<Board>,
}
