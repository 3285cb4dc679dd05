//! Perspective rectification of the detected quadrilateral.

use nalgebra::Point2;
use sudoku_scan_core::{
    warp_perspective, GrayImage, GrayImageView, Homography, OrderedQuad, PerspectiveMap,
};

use super::error::ScanError;

/// Axis-aligned square view of the puzzle plus the mapping pair that
/// produced it.
#[derive(Clone, Debug)]
pub struct RectifiedPuzzle {
    pub image: GrayImage,
    /// Side length of the square, pixels.
    pub side: usize,
    /// `forward` takes frame coordinates into this square; `inverse` goes
    /// back and is what reprojection uses.
    pub map: PerspectiveMap,
}

/// Warp the frame so the puzzle becomes an axis-aligned square.
///
/// The square's side is the longer of the detected top and right edges, so
/// the puzzle is never downsampled along its dominant dimension.
pub fn rectify(frame: &GrayImageView<'_>, quad: &OrderedQuad) -> Result<RectifiedPuzzle, ScanError> {
    let top = (quad.top_right - quad.top_left).norm();
    let right = (quad.bottom_right - quad.top_right).norm();
    let side = top.max(right);
    let side_px = side as usize;

    let dst = [
        Point2::new(0.0, 0.0),
        Point2::new(side - 1.0, 0.0),
        Point2::new(side - 1.0, side - 1.0),
        Point2::new(0.0, side - 1.0),
    ];

    let forward =
        Homography::from_corners(&quad.corners(), &dst).ok_or(ScanError::MappingFailed)?;
    let inverse = forward.inverse().ok_or(ScanError::NonInvertible)?;
    let map = PerspectiveMap { forward, inverse };

    let image = warp_perspective(frame, &map, side_px, side_px);
    Ok(RectifiedPuzzle {
        image,
        side: side_px,
        map,
    })
}
