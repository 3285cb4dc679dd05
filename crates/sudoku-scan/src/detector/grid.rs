//! Locating the puzzle quadrilateral in a binarized frame.

use log::debug;
use nalgebra::Point2;
use sudoku_scan_core::{
    approx_polygon, contour_area, contour_perimeter, find_external_contours, quad_side_lengths,
    vertex_angle_deg, GrayImageView,
};

use super::params::GridParams;

/// Check that a polygon approximation is plausibly the puzzle's outer
/// border: exactly four vertices, near-right interior angles, roughly equal
/// sides.
fn accept_quad(approx: &[Point2<f32>], params: &GridParams) -> Option<[Point2<f32>; 4]> {
    let quad: [Point2<f32>; 4] = approx.try_into().ok()?;

    for i in 0..4 {
        let angle = vertex_angle_deg(quad[i], quad[(i + 1) % 4], quad[(i + 2) % 4]).abs();
        if angle < params.min_angle_deg || angle > params.max_angle_deg {
            return None;
        }
    }

    let sides = quad_side_lengths(&quad);
    let mut shortest = f64::MAX;
    let mut longest = 0.0f64;
    for s in sides {
        shortest = shortest.min(s);
        longest = longest.max(s);
    }
    (shortest > 0.0 && longest / shortest <= params.max_side_ratio).then_some(quad)
}

/// Sweep the external contours of the mask for the largest acceptable
/// quadrilateral.
///
/// `None` is the expected "no puzzle visible" state, not an error. Ties on
/// area keep the first candidate in contour scan order.
pub fn find_puzzle_quad(mask: &GrayImageView<'_>, params: &GridParams) -> Option<[Point2<f32>; 4]> {
    let contours = find_external_contours(mask);

    let mut best: Option<([Point2<f32>; 4], f64)> = None;
    for contour in &contours {
        let perimeter = contour_perimeter(&contour.points);
        let approx = approx_polygon(&contour.points, params.approx_tolerance * perimeter);
        let Some(quad) = accept_quad(&approx, params) else {
            continue;
        };
        let area = contour_area(&contour.points);
        if best.map_or(true, |(_, a)| area > a) {
            best = Some((quad, area));
        }
    }

    debug!(
        "grid search: {} contours, winner area {:?}",
        contours.len(),
        best.map(|(_, a)| a)
    );
    best.map(|(quad, _)| quad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_scan_core::GrayImage;

    fn params() -> GridParams {
        GridParams::default()
    }

    #[test]
    fn perfect_square_is_accepted() {
        let quad = [
            Point2::new(0.0f32, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ];
        assert!(accept_quad(&quad, &params()).is_some());
    }

    #[test]
    fn sixty_degree_corner_is_rejected() {
        // parallelogram with 60/120 degree corners
        let quad = [
            Point2::new(0.0f32, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(150.0, 86.6),
            Point2::new(50.0, 86.6),
        ];
        assert!(accept_quad(&quad, &params()).is_none());
    }

    #[test]
    fn elongated_rectangle_is_rejected() {
        // side ratio 100:10
        let quad = [
            Point2::new(0.0f32, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert!(accept_quad(&quad, &params()).is_none());
    }

    #[test]
    fn five_sided_approximation_is_rejected() {
        let poly = [
            Point2::new(0.0f32, 0.0),
            Point2::new(60.0, -20.0),
            Point2::new(120.0, 0.0),
            Point2::new(120.0, 120.0),
            Point2::new(0.0, 120.0),
        ];
        assert!(accept_quad(&poly, &params()).is_none());
    }

    fn draw_square_outline(img: &mut GrayImage, x0: usize, y0: usize, side: usize, stroke: usize) {
        for t in 0..stroke {
            for i in 0..side {
                img.put(x0 + i, y0 + t, 255);
                img.put(x0 + i, y0 + side - 1 - t, 255);
                img.put(x0 + t, y0 + i, 255);
                img.put(x0 + side - 1 - t, y0 + i, 255);
            }
        }
    }

    #[test]
    fn largest_qualifying_contour_wins() {
        let mut mask = GrayImage::new(300, 300);
        draw_square_outline(&mut mask, 20, 20, 40, 3);
        draw_square_outline(&mut mask, 100, 80, 150, 3);

        let quad = find_puzzle_quad(&mask.view(), &params()).expect("quad");
        // winner is the big square; its outer boundary starts at (100, 80)
        let min_x = quad.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let min_y = quad.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!((min_x - 100.0).abs() <= 1.5, "min_x = {min_x}");
        assert!((min_y - 80.0).abs() <= 1.5, "min_y = {min_y}");
    }

    #[test]
    fn frame_without_quads_reports_nothing() {
        let mut mask = GrayImage::new(100, 100);
        for x in 10..90 {
            mask.put(x, 50, 255); // just a line
        }
        assert!(find_puzzle_quad(&mask.view(), &params()).is_none());
    }
}
