//! Polygon simplification and quadrilateral handling.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
/// Falls back to point distance when `a == b`.
fn line_distance(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f64 {
    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-12 {
        let (px, py) = ((p.x - a.x) as f64, (p.y - a.y) as f64);
        return (px * px + py * py).sqrt();
    }
    ((p.x - a.x) as f64 * dy - (p.y - a.y) as f64 * dx).abs() / len
}

/// Ramer–Douglas–Peucker on an open polyline, keeping both endpoints.
fn rdp(points: &[Point2<f32>], eps: f64, out: &mut Vec<Point2<f32>>) {
    let last = points.len() - 1;
    if last < 2 {
        out.extend_from_slice(&points[..last]);
        return;
    }

    let (a, b) = (points[0], points[last]);
    let mut worst = 0usize;
    let mut worst_dist = 0.0f64;
    for (i, &p) in points.iter().enumerate().take(last).skip(1) {
        let d = line_distance(p, a, b);
        if d > worst_dist {
            worst_dist = d;
            worst = i;
        }
    }

    if worst_dist > eps {
        rdp(&points[..=worst], eps, out);
        rdp(&points[worst..], eps, out);
    } else {
        out.push(a);
    }
}

/// Approximate a closed contour by a polygon with vertex-to-curve deviation
/// at most `eps`.
///
/// The contour is split at the two points farthest from each other along the
/// first axis of variation, and each half is simplified independently, so the
/// result does not depend on a lucky choice of start vertex.
pub fn approx_polygon(points: &[Point2<f32>], eps: f64) -> Vec<Point2<f32>> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    // farthest point from the first vertex splits the loop into two chains
    let mut split = 0usize;
    let mut best = -1.0f64;
    for (i, &p) in points.iter().enumerate() {
        let (dx, dy) = ((p.x - points[0].x) as f64, (p.y - points[0].y) as f64);
        let d = dx * dx + dy * dy;
        if d > best {
            best = d;
            split = i;
        }
    }
    if split == 0 {
        return points.to_vec(); // all points coincide
    }

    let first_half: Vec<Point2<f32>> = points[..=split].to_vec();
    let mut second_half: Vec<Point2<f32>> = points[split..].to_vec();
    second_half.push(points[0]);

    let mut out = Vec::new();
    // each half contributes its leading endpoint, so concatenation closes up
    rdp(&first_half, eps, &mut out);
    rdp(&second_half, eps, &mut out);
    out
}

/// Angle in degrees at `vertex` between the edges toward `prev` and `next`,
/// signed by edge orientation. Callers interested in the interior angle take
/// the absolute value.
pub fn vertex_angle_deg(prev: Point2<f32>, vertex: Point2<f32>, next: Point2<f32>) -> f64 {
    let (ax, ay) = ((prev.x - vertex.x) as f64, (prev.y - vertex.y) as f64);
    let (bx, by) = ((next.x - vertex.x) as f64, (next.y - vertex.y) as f64);
    (ax * by - ay * bx).atan2(ax * bx + ay * by).to_degrees()
}

/// Edge lengths of a 4-gon, in vertex order.
pub fn quad_side_lengths(quad: &[Point2<f32>; 4]) -> [f64; 4] {
    let mut sides = [0.0f64; 4];
    for (i, side) in sides.iter_mut().enumerate() {
        let p = quad[i];
        let q = quad[(i + 1) % 4];
        let (dx, dy) = ((q.x - p.x) as f64, (q.y - p.y) as f64);
        *side = (dx * dx + dy * dy).sqrt();
    }
    sides
}

/// Quadrilateral corners with assigned roles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedQuad {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
}

impl OrderedQuad {
    /// Corners in TL, TR, BR, BL order.
    pub fn corners(&self) -> [Point2<f32>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

/// Assign corner roles to four unordered points.
///
/// TL minimizes `x + y`, BR maximizes it; TR maximizes `x - y`, BL minimizes
/// it. Ties go to the first point encountered in input order, which is
/// implementation-defined rather than a geometric rule.
pub fn order_corners(points: &[Point2<f32>; 4]) -> OrderedQuad {
    let mut tl = points[0];
    let mut tr = points[0];
    let mut br = points[0];
    let mut bl = points[0];

    for &p in points.iter().skip(1) {
        if p.x + p.y < tl.x + tl.y {
            tl = p;
        }
        if p.x - p.y > tr.x - tr.y {
            tr = p;
        }
        if p.x + p.y > br.x + br.y {
            br = p;
        }
        if p.x - p.y < bl.x - bl.y {
            bl = p;
        }
    }

    OrderedQuad {
        top_left: tl,
        top_right: tr,
        bottom_right: br,
        bottom_left: bl,
    }
}
