//! Thin capability interfaces for frame acquisition and display, plus the
//! live scan loop that connects them.

use std::time::Duration;

use sudoku_scan_core::{GrayImage, GrayImageView};

use crate::detector::SudokuScanner;
use crate::overlay::{plan_overlay, GlyphMetrics, OverlayPlan};
use crate::recognize::DigitRecognizer;

/// Errors from frame acquisition. These are fatal for the run.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[cfg(feature = "image")]
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("frame acquisition failed: {0}")]
    Acquisition(String),
}

/// Yields intensity frames on demand.
///
/// `Ok(None)` is end of stream — terminal for the run, not an error.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<GrayImage>, SourceError>;
}

/// Live preview surface and key input.
pub trait DisplaySink {
    fn show(&mut self, name: &str, image: &GrayImageView<'_>);
    /// Wait up to `timeout` for a key press.
    fn wait_key(&mut self, timeout: Duration) -> Option<u32>;
    /// Hand over the overlay plan for a solved frame. Default: ignore.
    fn render_overlay(&mut self, _plan: &OverlayPlan) {}
}

/// Serves a single still image, then reports end of stream. Drives the same
/// pipeline as a live source, just once.
#[cfg(feature = "image")]
pub struct StillImageSource {
    path: std::path::PathBuf,
    served: bool,
}

#[cfg(feature = "image")]
impl StillImageSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: path.into(),
            served: false,
        }
    }
}

#[cfg(feature = "image")]
impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> Result<Option<GrayImage>, SourceError> {
        if self.served {
            return Ok(None);
        }
        self.served = true;

        let open_err = |source: image::ImageError| SourceError::Open {
            path: self.path.display().to_string(),
            source,
        };
        let decoded = image::ImageReader::open(&self.path)
            .map_err(|e| open_err(e.into()))?
            .decode()
            .map_err(open_err)?
            .to_luma8();

        Ok(Some(GrayImage {
            width: decoded.width() as usize,
            height: decoded.height() as usize,
            data: decoded.into_raw(),
        }))
    }
}

/// Drive the scanner over a source until the stream ends or a key is
/// pressed.
///
/// Each solved frame prints the solution to the console and hands the
/// overlay plan to the sink; a frame whose givens admit no solution prints a
/// fixed failure line and is shown without an overlay. Frames without a
/// puzzle pass through untouched. Acquisition failures abort with the error.
pub fn run_live(
    source: &mut dyn FrameSource,
    sink: &mut dyn DisplaySink,
    scanner: &SudokuScanner,
    engine: &mut dyn DigitRecognizer,
    metrics: GlyphMetrics,
) -> Result<(), SourceError> {
    loop {
        let Some(frame) = source.next_frame()? else {
            break;
        };

        match scanner.scan(&frame.view(), engine) {
            Ok(Some(scan)) => {
                match &scan.solution {
                    Some(solution) => {
                        println!("SOLVE:");
                        print!("{solution}");
                        if let Some(plan) =
                            plan_overlay(&scan, metrics, scanner.params().overlay_fill)
                        {
                            sink.render_overlay(&plan);
                        }
                    }
                    None => println!("COULDN'T FIND ANY SOLUTION :("),
                }
                sink.show("rectified", &scan.rectified.view());
            }
            Ok(None) => {}
            Err(err) => log::warn!("frame skipped: {err}"),
        }

        sink.show("original", &frame.view());
        if sink.wait_key(Duration::from_millis(27)).is_some() {
            break;
        }
    }
    Ok(())
}
