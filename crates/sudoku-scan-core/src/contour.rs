//! External contour extraction from a binary mask.
//!
//! Connected foreground regions (8-connectivity, any value > 0) are reported
//! by their outer boundary only; holes inside a region are ignored. Boundary
//! points are pixel coordinates traced clockwise.

use crate::GrayImageView;
use nalgebra::Point2;

/// Outer boundary of one connected foreground region.
#[derive(Clone, Debug)]
pub struct Contour {
    pub points: Vec<Point2<f32>>,
}

// Clockwise Moore neighbourhood in image coordinates (y grows downward),
// starting East.
const NEIGHBOURS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[inline]
fn is_foreground(src: &GrayImageView<'_>, x: i32, y: i32) -> bool {
    x >= 0
        && y >= 0
        && x < src.width as i32
        && y < src.height as i32
        && src.data[y as usize * src.width + x as usize] > 0
}

fn neighbour_index(from: (i32, i32), to: (i32, i32)) -> usize {
    let d = (to.0 - from.0, to.1 - from.1);
    NEIGHBOURS
        .iter()
        .position(|&n| n == d)
        .expect("backtrack is always 8-adjacent")
}

/// Moore boundary trace starting from the topmost-leftmost pixel of a region.
///
/// `start`'s western neighbour must be background, which holds for the first
/// pixel of a region encountered in row-major scan order.
fn trace_boundary(src: &GrayImageView<'_>, start: (i32, i32)) -> Vec<Point2<f32>> {
    let mut points = vec![Point2::new(start.0 as f32, start.1 as f32)];

    let mut cur = start;
    let mut backtrack = (start.0 - 1, start.1);
    // The trace is closed once the first move out of `start` repeats.
    let mut first_move: Option<(i32, i32)> = None;

    // Worst case touches every pixel from all eight sides.
    let cap = 8 * src.width.max(1) * src.height.max(1);

    for _ in 0..cap {
        let bidx = neighbour_index(cur, backtrack);
        let mut next = None;

        for k in 1..=8 {
            let idx = (bidx + k) % 8;
            let cand = (cur.0 + NEIGHBOURS[idx].0, cur.1 + NEIGHBOURS[idx].1);
            if is_foreground(src, cand.0, cand.1) {
                let prev = (bidx + k - 1) % 8;
                next = Some((cand, (cur.0 + NEIGHBOURS[prev].0, cur.1 + NEIGHBOURS[prev].1)));
                break;
            }
        }

        let Some((cand, new_backtrack)) = next else {
            break; // isolated pixel
        };

        if cur == start {
            match first_move {
                Some(fm) if fm == cand => break, // loop closed
                Some(_) => {}
                None => first_move = Some(cand),
            }
        }

        backtrack = new_backtrack;
        cur = cand;
        points.push(Point2::new(cur.0 as f32, cur.1 as f32));
    }

    // a closed trace re-pushes the start pixel just before terminating
    if points.len() > 1 && points.last() == Some(&points[0]) {
        points.pop();
    }

    points
}

/// Find the outer boundaries of all connected foreground regions, in
/// row-major order of their first pixel.
pub fn find_external_contours(src: &GrayImageView<'_>) -> Vec<Contour> {
    let (w, h) = (src.width, src.height);
    let mut visited = vec![false; w * h];
    let mut contours = Vec::new();
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if visited[y * w + x] || src.data[y * w + x] == 0 {
                continue;
            }

            contours.push(Contour {
                points: trace_boundary(src, (x as i32, y as i32)),
            });

            // flood the whole region so it is reported exactly once
            stack.push((x as i32, y as i32));
            visited[y * w + x] = true;
            while let Some((cx, cy)) = stack.pop() {
                for &(dx, dy) in &NEIGHBOURS {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if is_foreground(src, nx, ny) && !visited[ny as usize * w + nx as usize] {
                        visited[ny as usize * w + nx as usize] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    contours
}

/// Enclosed area of a closed polygon (shoelace formula), in squared pixels.
pub fn contour_area(points: &[Point2<f32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        acc += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    acc.abs() * 0.5
}

/// Length of the closed polyline through `points`.
pub fn contour_perimeter(points: &[Point2<f32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        let (dx, dy) = ((q.x - p.x) as f64, (q.y - p.y) as f64);
        acc += (dx * dx + dy * dy).sqrt();
    }
    acc
}
