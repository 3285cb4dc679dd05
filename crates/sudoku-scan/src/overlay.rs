//! Reprojection of the solved digits onto the original view.
//!
//! Planning only — every anchor is computed here, every pixel is drawn by
//! the external render sink.

use nalgebra::Point2;

use crate::board::SIZE;
use crate::detector::PuzzleScan;

/// Bounding size of a rendered digit at scale 1.0, as measured by the
/// render collaborator for its font.
#[derive(Clone, Copy, Debug)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
}

/// One digit to draw on the original frame.
#[derive(Clone, Copy, Debug)]
pub struct OverlayDigit {
    pub digit: u8,
    /// Baseline-left text origin in frame coordinates, adjusted so the glyph
    /// sits visually centered in its cell.
    pub anchor: Point2<f32>,
    /// Multiplier for the renderer's reference glyph size.
    pub scale: f32,
}

/// Render plan for one solved frame: the puzzle outline plus one glyph per
/// solver-filled cell.
#[derive(Clone, Debug)]
pub struct OverlayPlan {
    /// Detected corners (TL, TR, BR, BL) for outline rendering.
    pub corners: [Point2<f32>; 4],
    pub digits: Vec<OverlayDigit>,
}

/// Plan the overlay for a solved scan. `None` when the scan has no solution.
///
/// For every cell the solver filled, the cell's pixel center in rectified
/// coordinates is pushed through the inverse perspective mapping
/// (homogeneous multiply and divide) back into the frame. The glyph scale
/// makes a digit cover `fill` of the cell, derived from the renderer's
/// reference metrics and rescaled linearly.
pub fn plan_overlay(scan: &PuzzleScan, metrics: GlyphMetrics, fill: f32) -> Option<OverlayPlan> {
    let solution = scan.solution.as_ref()?;

    let cells = &scan.cells;
    let scale = fill
        * (cells.cell_w as f32 / metrics.width).min(cells.cell_h as f32 / metrics.height);
    let glyph_w = metrics.width * scale;
    let glyph_h = metrics.height * scale;

    let mut digits = Vec::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            if solution.is_given(row, col) {
                continue;
            }
            let frame_pt = scan.map.inverse.apply(cells.center(row, col));
            digits.push(OverlayDigit {
                digit: solution.value(row, col),
                anchor: Point2::new(frame_pt.x - glyph_w * 0.5, frame_pt.y + glyph_h * 0.5),
                scale,
            });
        }
    }

    Some(OverlayPlan {
        corners: scan.quad.corners(),
        digits,
    })
}
