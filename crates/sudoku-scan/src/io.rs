//! JSON parameter loading and the scan report written by the CLI.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detector::{PuzzleScan, ScanParams};

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Load scan parameters from a JSON file. Missing fields fall back to the
/// documented defaults.
pub fn load_params(path: impl AsRef<Path>) -> Result<ScanParams, ReportError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Machine-readable record of one still-image scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub image_path: String,
    pub frame_width: usize,
    pub frame_height: usize,
    /// Puzzle corners (TL, TR, BR, BL) in frame coordinates, when found.
    #[serde(default)]
    pub corners: Option<[[f32; 2]; 4]>,
    /// Row-major frame→rectified transform.
    #[serde(default)]
    pub mapping: Option<[[f64; 3]; 3]>,
    #[serde(default)]
    pub rectified_side: Option<usize>,
    #[serde(default)]
    pub recognized: Option<usize>,
    /// Nine board rows, `.` for empty cells.
    #[serde(default)]
    pub givens: Option<Vec<String>>,
    #[serde(default)]
    pub solution: Option<Vec<String>>,
}

impl ScanReport {
    pub fn new(image_path: impl Into<String>, frame_width: usize, frame_height: usize) -> Self {
        Self {
            image_path: image_path.into(),
            frame_width,
            frame_height,
            corners: None,
            mapping: None,
            rectified_side: None,
            recognized: None,
            givens: None,
            solution: None,
        }
    }

    /// Fill in the fields a successful detection provides.
    pub fn set_scan(&mut self, scan: &PuzzleScan) {
        let corners = scan.quad.corners();
        self.corners = Some([
            [corners[0].x, corners[0].y],
            [corners[1].x, corners[1].y],
            [corners[2].x, corners[2].y],
            [corners[3].x, corners[3].y],
        ]);
        self.mapping = Some(scan.map.forward.to_array());
        self.rectified_side = Some(scan.side);
        self.recognized = Some(scan.recognized);
        self.givens = Some(scan.board.row_strings());
        self.solution = scan.solution.as_ref().map(|s| s.row_strings());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");

        let mut report = ScanReport::new("frame.png", 640, 480);
        report.recognized = Some(27);
        report.write_json(&path).expect("write");

        let back = ScanReport::load_json(&path).expect("load");
        assert_eq!(back.image_path, "frame.png");
        assert_eq!(back.recognized, Some(27));
        assert!(back.corners.is_none());
    }

    #[test]
    fn params_file_overrides_selected_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{"min_confidence": 90.0, "cell": {"margin": 6}}"#).expect("write");

        let params = load_params(&path).expect("load");
        assert_eq!(params.min_confidence, 90.0);
        assert_eq!(params.cell.margin, 6);
        assert_eq!(params.preprocess.blur_window, 11);
    }
}
