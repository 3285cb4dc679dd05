//! Cell partitioning and glyph normalization.

use nalgebra::Point2;
use sudoku_scan_core::{
    adaptive_threshold_inv, contour_area, dilate3x3, find_external_contours, gaussian_blur,
    median3x3, upscale_nearest, GrayImage, GrayImageView,
};

use crate::board::SIZE;

use super::params::CellParams;

/// Equal 9x9 partition of the rectified square. Remainder pixels from the
/// integer division are dropped along the right and bottom edges.
#[derive(Clone, Copy, Debug)]
pub struct CellGrid {
    pub cell_w: usize,
    pub cell_h: usize,
}

impl CellGrid {
    /// `None` when the rectified image is too small to hold one pixel per
    /// cell, which short-circuits the frame as a miss.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let cell_w = width / SIZE;
        let cell_h = height / SIZE;
        (cell_w > 0 && cell_h > 0).then_some(Self { cell_w, cell_h })
    }

    /// Top-left pixel of cell (`row`, `col`).
    #[inline]
    pub fn origin(&self, row: usize, col: usize) -> (usize, usize) {
        (col * self.cell_w, row * self.cell_h)
    }

    /// Pixel center of a cell in rectified coordinates.
    #[inline]
    pub fn center(&self, row: usize, col: usize) -> Point2<f32> {
        let (x, y) = self.origin(row, col);
        Point2::new((x + self.cell_w / 2) as f32, (y + self.cell_h / 2) as f32)
    }

    /// Copy one cell out of the rectified image.
    pub fn crop_cell(&self, rectified: &GrayImage, row: usize, col: usize) -> GrayImage {
        let (x, y) = self.origin(row, col);
        rectified.crop(x, y, self.cell_w, self.cell_h)
    }
}

/// Isolate and standardize the digit glyph of one cell.
///
/// Returns `None` when the cell holds no glyph — the ordinary case, since
/// most cells of a puzzle are blank. Otherwise the result is the binarized
/// glyph (strokes as white foreground), cropped to the glyph's bounding box,
/// upscaled until its shorter side reaches `params.glyph_target`, and
/// lightly dilated for stroke robustness.
pub fn normalize_cell(cell: &GrayImageView<'_>, params: &CellParams) -> Option<GrayImage> {
    let margin = params.margin;
    if cell.width <= 2 * margin || cell.height <= 2 * margin {
        return None;
    }

    let blurred = gaussian_blur(cell, params.blur_window);
    let binary = adaptive_threshold_inv(
        &blurred.view(),
        params.threshold_window,
        params.threshold_offset,
    );
    let binary = median3x3(&binary.view());

    // the margin crop drops the grid lines shared with neighbouring cells
    let inner = binary.crop(
        margin,
        margin,
        binary.width - 2 * margin,
        binary.height - 2 * margin,
    );

    // the glyph body is the largest inner contour; specks with no enclosed
    // area never qualify
    let contours = find_external_contours(&inner.view());
    let mut best: Option<(&[Point2<f32>], f64)> = None;
    for contour in &contours {
        let area = contour_area(&contour.points);
        if area > best.map_or(0.0, |(_, a)| a) {
            best = Some((&contour.points, area));
        }
    }
    let (glyph_points, _) = best?;

    // bounding box, offset back into full-cell coordinates
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for p in glyph_points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let x0 = min_x as usize + margin;
    let y0 = min_y as usize + margin;
    let w = (max_x - min_x) as usize + 1;
    let h = (max_y - min_y) as usize + 1;
    let glyph = binary.crop(x0, y0, w, h);

    let target = params.glyph_target;
    let scaled = if glyph.width < target || glyph.height < target {
        let scale = (target as f32 / glyph.width as f32).max(target as f32 / glyph.height as f32);
        upscale_nearest(&glyph.view(), scale)
    } else {
        glyph
    };

    Some(dilate3x3(&scaled.view()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_drops_remainder_pixels() {
        let grid = CellGrid::new(458, 458).expect("grid");
        assert_eq!((grid.cell_w, grid.cell_h), (50, 50));
        assert_eq!(grid.origin(8, 8), (400, 400));
        assert_eq!(grid.center(0, 0), Point2::new(25.0, 25.0));
    }

    #[test]
    fn degenerate_partition_is_refused() {
        assert!(CellGrid::new(8, 458).is_none());
        assert!(CellGrid::new(0, 0).is_none());
    }

    fn cell_with_blob(side: usize, blob: usize) -> GrayImage {
        let mut cell = GrayImage::filled(side, side, 235);
        let start = (side - blob) / 2;
        for y in start..start + blob {
            for x in start..start + blob {
                cell.put(x, y, 25);
            }
        }
        cell
    }

    #[test]
    fn blank_cell_is_unrecognizable() {
        let cell = GrayImage::filled(50, 50, 235);
        assert!(normalize_cell(&cell.view(), &CellParams::default()).is_none());
    }

    #[test]
    fn glyph_is_cropped_and_upscaled_to_target() {
        let cell = cell_with_blob(50, 16);
        let glyph = normalize_cell(&cell.view(), &CellParams::default()).expect("glyph");
        assert!(glyph.width >= 40 && glyph.height >= 40);
        // mostly foreground in the middle, since the blob filled its box
        assert_eq!(glyph.get(glyph.width / 2, 0), 255);
    }

    #[test]
    fn normalization_is_scale_invariant() {
        let small = cell_with_blob(50, 16);
        let large = upscale_nearest(&small.view(), 2.0);

        let params = CellParams::default();
        let a = normalize_cell(&small.view(), &params).expect("small glyph");
        let b = normalize_cell(&large.view(), &params).expect("large glyph");
        assert_eq!((a.width, a.height), (b.width, b.height));
    }

    #[test]
    fn border_stroke_inside_margin_is_ignored() {
        let mut cell = GrayImage::filled(50, 50, 235);
        for y in 0..50 {
            cell.put(0, y, 25);
            cell.put(1, y, 25); // grid line remnant along one edge
        }
        assert!(normalize_cell(&cell.view(), &CellParams::default()).is_none());
    }
}
