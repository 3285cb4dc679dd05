//! Geometry and raster primitives for locating and rectifying a Sudoku grid.
//!
//! This crate is intentionally small and container-agnostic: it does *not*
//! depend on any concrete image type. Callers wrap their pixel buffers in
//! [`GrayImageView`] and adapt the results back out.

mod contour;
mod homography;
mod image;
mod logger;
mod quad;
mod threshold;

pub use contour::{contour_area, contour_perimeter, find_external_contours, Contour};
pub use homography::{warp_perspective, Homography, PerspectiveMap};
pub use image::{
    dilate3x3, gaussian_blur, median3x3, sample_bilinear, sample_bilinear_u8, upscale_nearest,
    GrayImage, GrayImageView,
};
pub use logger::{init_from_env, init_with_level};
pub use quad::{approx_polygon, order_corners, quad_side_lengths, vertex_angle_deg, OrderedQuad};
pub use threshold::adaptive_threshold_inv;
