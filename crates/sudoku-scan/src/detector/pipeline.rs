//! The per-frame scan pipeline.

use log::{debug, info, warn};
use sudoku_scan_core::{order_corners, GrayImageView};

use crate::board::{Board, SIZE};
use crate::recognize::{accept_reading, DigitRecognizer};
use crate::solver::solve;

use super::cells::{normalize_cell, CellGrid};
use super::error::ScanError;
use super::grid::find_puzzle_quad;
use super::params::ScanParams;
use super::preprocess::binarize_frame;
use super::rectify::rectify;
use super::result::PuzzleScan;

/// Single-frame Sudoku scanner.
///
/// Stateless across frames by construction: every call to [`scan`] starts
/// from the raw frame and discards everything when it returns. The
/// recognition engine is the only long-lived collaborator and is borrowed
/// per call.
///
/// [`scan`]: SudokuScanner::scan
#[derive(Clone, Debug, Default)]
pub struct SudokuScanner {
    params: ScanParams,
}

impl SudokuScanner {
    pub fn new(params: ScanParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    /// Run the full pipeline on one intensity frame.
    ///
    /// `Ok(None)` is the expected "no puzzle in view" outcome. When a puzzle
    /// is found, the result carries the recognized board and, if the givens
    /// admit one, its first solution; a failed solve is reported inside the
    /// result, not as an error. `Err` is reserved for a degenerate
    /// perspective mapping.
    pub fn scan(
        &self,
        frame: &GrayImageView<'_>,
        engine: &mut dyn DigitRecognizer,
    ) -> Result<Option<PuzzleScan>, ScanError> {
        let mask = binarize_frame(frame, &self.params.preprocess);

        let Some(corners) = find_puzzle_quad(&mask.view(), &self.params.grid) else {
            debug!("no puzzle quadrilateral in frame");
            return Ok(None);
        };
        let quad = order_corners(&corners);

        let rectified = rectify(frame, &quad)?;
        let Some(cells) = CellGrid::new(rectified.side, rectified.side) else {
            warn!(
                "rectified puzzle too small to partition ({} px), skipping frame",
                rectified.side
            );
            return Ok(None);
        };

        let mut board = Board::new();
        let mut recognized = 0usize;
        for pos in 0..SIZE * SIZE {
            let (row, col) = (pos / SIZE, pos % SIZE);
            let cell = cells.crop_cell(&rectified.image, row, col);
            let Some(glyph) = normalize_cell(&cell.view(), &self.params.cell) else {
                continue; // blank cell
            };
            let Some(reading) = engine.recognize(&glyph.view()) else {
                continue;
            };
            if let Some(digit) = accept_reading(&reading, self.params.min_confidence) {
                board.set_given(row, col, digit);
                recognized += 1;
            } else {
                debug!(
                    "cell ({row},{col}): reading {:?} below confidence gate",
                    reading.text
                );
            }
        }
        info!("accepted {recognized} digits from recognition");

        let mut candidate = board.clone();
        let solution = solve(&mut candidate).then_some(candidate);

        Ok(Some(PuzzleScan {
            quad,
            rectified: rectified.image,
            side: rectified.side,
            map: rectified.map,
            cells,
            board,
            recognized,
            solution,
        }))
    }
}
