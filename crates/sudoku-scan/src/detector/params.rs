//! One record for every numeric constant in the pipeline.
//!
//! Deployed variants of this kind of scanner disagree on several of these
//! values (confidence gates of 50/80/90 have all been used, and kernel sizes
//! drift between revisions), so none of them is hard-coded: the defaults
//! below are one coherent, field-tested set, and callers override per
//! deployment.

use serde::{Deserialize, Serialize};

/// Frame binarization ahead of structural detection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessParams {
    /// Gaussian window suppressing sensor noise before thresholding.
    pub blur_window: usize,
    /// Neighbourhood size of the adaptive threshold.
    pub threshold_window: usize,
    /// Offset under the local mean a pixel must clear to become foreground.
    pub threshold_offset: i32,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            blur_window: 11,
            threshold_window: 11,
            threshold_offset: 2,
        }
    }
}

/// Acceptance window for puzzle-quadrilateral candidates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Polygon approximation tolerance, as a fraction of contour perimeter.
    pub approx_tolerance: f64,
    /// Interior angles must fall inside this band, degrees.
    pub min_angle_deg: f64,
    pub max_angle_deg: f64,
    /// Longest/shortest side ratio allowed for a near-square candidate.
    pub max_side_ratio: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            approx_tolerance: 0.02,
            min_angle_deg: 80.0,
            max_angle_deg: 100.0,
            max_side_ratio: 1.2,
        }
    }
}

/// Per-cell glyph isolation.
///
/// Cells are binarized with inverted polarity (glyph strokes become the
/// white foreground) before contour search; the recognition engine receives
/// the glyph in that polarity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CellParams {
    /// Gaussian window for per-cell smoothing.
    pub blur_window: usize,
    /// Adaptive threshold neighbourhood for the glyph binarization.
    pub threshold_window: usize,
    pub threshold_offset: i32,
    /// Pixels cropped from every cell edge to exclude the shared grid lines.
    pub margin: usize,
    /// Minimum glyph dimension handed to recognition; smaller crops are
    /// upscaled until the shorter side reaches this.
    pub glyph_target: usize,
}

impl Default for CellParams {
    fn default() -> Self {
        Self {
            blur_window: 3,
            threshold_window: 11,
            threshold_offset: 2,
            margin: 4,
            glyph_target: 40,
        }
    }
}

/// Full pipeline configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    pub preprocess: PreprocessParams,
    pub grid: GridParams,
    pub cell: CellParams,
    /// Minimum mean confidence (0-100) for a recognized digit to enter the
    /// board as a given.
    pub min_confidence: f32,
    /// Fraction of a cell that a reprojected digit should fill.
    pub overlay_fill: f32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            preprocess: PreprocessParams::default(),
            grid: GridParams::default(),
            cell: CellParams::default(),
            min_confidence: 50.0,
            overlay_fill: 0.8,
        }
    }
}

impl ScanParams {
    pub fn new() -> Self {
        Self::default()
    }
}
