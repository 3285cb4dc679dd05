//! Projective mapping between the camera frame and the rectified puzzle
//! square.

use crate::{sample_bilinear_u8, GrayImage, GrayImageView};
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};

/// A 3x3 projective transform acting on 2-D points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    pub fn to_array(&self) -> [[f64; 3]; 3] {
        [
            [self.h[(0, 0)], self.h[(0, 1)], self.h[(0, 2)]],
            [self.h[(1, 0)], self.h[(1, 1)], self.h[(1, 2)]],
            [self.h[(2, 0)], self.h[(2, 1)], self.h[(2, 2)]],
        ]
    }

    /// Apply to a point: homogeneous multiply followed by the perspective
    /// divide.
    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Point2<f32> {
        let v = self.h * Vector3::new(p.x as f64, p.y as f64, 1.0);
        Point2::new((v[0] / v[2]) as f32, (v[1] / v[2]) as f32)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }

    /// Solve for the transform taking the four `src` points onto the four
    /// `dst` points (`dst ~ H * src`, `h33` fixed to 1).
    ///
    /// Both point sets are conditioned (centroid shift + isotropic scale)
    /// before solving, so pixel-magnitude coordinates do not degrade the
    /// 8x8 system.
    pub fn from_corners(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Self> {
        let (src_c, t_src) = condition(src);
        let (dst_c, t_dst) = condition(dst);

        // Each correspondence (x,y) -> (u,v) contributes two rows:
        //   x h11 + y h12 + h13 - u x h31 - u y h32 = u
        //   x h21 + y h22 + h23 - v x h31 - v y h32 = v
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for k in 0..4 {
            let (x, y) = (src_c[k][0], src_c[k][1]);
            let (u, v) = (dst_c[k][0], dst_c[k][1]);

            a[(2 * k, 0)] = x;
            a[(2 * k, 1)] = y;
            a[(2 * k, 2)] = 1.0;
            a[(2 * k, 6)] = -u * x;
            a[(2 * k, 7)] = -u * y;
            b[2 * k] = u;

            a[(2 * k + 1, 3)] = x;
            a[(2 * k + 1, 4)] = y;
            a[(2 * k + 1, 5)] = 1.0;
            a[(2 * k + 1, 6)] = -v * x;
            a[(2 * k + 1, 7)] = -v * y;
            b[2 * k + 1] = v;
        }

        let x = a.lu().solve(&b)?;
        let conditioned = Matrix3::new(
            x[0], x[1], x[2], //
            x[3], x[4], x[5], //
            x[6], x[7], 1.0,
        );

        // undo the conditioning: H = T_dst^-1 * Hc * T_src
        let h = t_dst.try_inverse()? * conditioned * t_src;
        let s = h[(2, 2)];
        if s.abs() < 1e-12 {
            return None;
        }
        let solved = Self::new(h / s);

        // a near-singular system can slip through the LU solve; reject the
        // result unless it actually reproduces the correspondence
        let scale = dst
            .iter()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(1.0f32, f32::max);
        for (s, d) in src.iter().zip(dst.iter()) {
            let q = solved.apply(*s);
            if !q.x.is_finite() || !q.y.is_finite() {
                return None;
            }
            if (q.x - d.x).abs() > 1e-4 * scale || (q.y - d.y).abs() > 1e-4 * scale {
                return None;
            }
        }
        Some(solved)
    }
}

/// Shift to the centroid and scale so the mean distance from it is sqrt(2).
fn condition(pts: &[Point2<f32>; 4]) -> ([Vector3<f64>; 4], Matrix3<f64>) {
    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    for p in pts {
        cx += p.x as f64;
        cy += p.y as f64;
    }
    cx /= 4.0;
    cy /= 4.0;

    let mut mean_dist = 0.0f64;
    for p in pts {
        let (dx, dy) = (p.x as f64 - cx, p.y as f64 - cy);
        mean_dist += (dx * dx + dy * dy).sqrt();
    }
    mean_dist /= 4.0;

    let s = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);

    let mut out = [Vector3::zeros(); 4];
    for (o, p) in out.iter_mut().zip(pts) {
        *o = t * Vector3::new(p.x as f64, p.y as f64, 1.0);
    }
    (out, t)
}

/// Forward/inverse mapping pair owned by one pipeline run.
///
/// `forward` maps frame coordinates into the rectified square; `inverse` is
/// its matrix inverse and goes back. The two stay mutual inverses up to
/// floating-point tolerance by construction.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveMap {
    pub forward: Homography,
    pub inverse: Homography,
}

impl PerspectiveMap {
    /// Estimate the map taking `src` onto `dst` together with its inverse.
    /// `None` when the correspondence is degenerate.
    pub fn between(src: &[Point2<f32>; 4], dst: &[Point2<f32>; 4]) -> Option<Self> {
        let forward = Homography::from_corners(src, dst)?;
        let inverse = forward.inverse()?;
        Some(Self { forward, inverse })
    }
}

/// Warp `src` through `map` into an `out_w` x `out_h` image: every output
/// pixel is pulled from the frame through the inverse mapping with bilinear
/// sampling.
pub fn warp_perspective(
    src: &GrayImageView<'_>,
    map: &PerspectiveMap,
    out_w: usize,
    out_h: usize,
) -> GrayImage {
    let mut out = GrayImage::new(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let p = map.inverse.apply(Point2::new(x as f32, y as f32));
            out.data[y * out_w + x] = sample_bilinear_u8(src, p.x, p.y);
        }
    }
    out
}
