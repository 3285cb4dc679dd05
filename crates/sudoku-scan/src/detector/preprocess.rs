//! Frame binarization ahead of structural detection.

use sudoku_scan_core::{adaptive_threshold_inv, dilate3x3, gaussian_blur, GrayImage, GrayImageView};

use super::params::PreprocessParams;

/// Turn an intensity frame into a binary mask: smooth, adaptive-threshold
/// with inverted polarity so grid lines and digits become foreground, then
/// dilate once so thin lines survive contour extraction.
pub fn binarize_frame(frame: &GrayImageView<'_>, params: &PreprocessParams) -> GrayImage {
    let blurred = gaussian_blur(frame, params.blur_window);
    let mask = adaptive_threshold_inv(
        &blurred.view(),
        params.threshold_window,
        params.threshold_offset,
    );
    dilate3x3(&mask.view())
}
