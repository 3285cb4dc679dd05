//! Digit recognition capability interface and the acceptance gate.

use sudoku_scan_core::GrayImageView;

/// One reading from the recognition engine: best-guess text plus the
/// engine's mean confidence in `[0, 100]`.
#[derive(Clone, Debug)]
pub struct DigitReading {
    pub text: String,
    pub confidence: f32,
}

/// External recognition engine narrowed to the Sudoku digit vocabulary.
///
/// Implementations are expected to be configured once at construction
/// (vocabulary `1`-`9`, single-character segmentation) and then reused for
/// every cell of every frame — engine start-up is costly and is the caller's
/// concern, which is why the pipeline takes the engine by `&mut` instead of
/// owning one.
///
/// `None` means the engine produced no reading for the glyph; that is an
/// ordinary outcome, not an error.
pub trait DigitRecognizer {
    fn recognize(&mut self, glyph: &GrayImageView<'_>) -> Option<DigitReading>;
}

/// Placeholder engine for runs without OCR attached: recognizes nothing, so
/// every cell stays empty and ungiven.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecognizer;

impl DigitRecognizer for NullRecognizer {
    fn recognize(&mut self, _glyph: &GrayImageView<'_>) -> Option<DigitReading> {
        None
    }
}

/// Gate a reading: accepted only when the confidence reaches
/// `min_confidence` and the first character is a digit in `1..=9`.
pub fn accept_reading(reading: &DigitReading, min_confidence: f32) -> Option<u8> {
    if reading.confidence < min_confidence {
        return None;
    }
    let first = reading.text.chars().next()?;
    let digit = first.to_digit(10)? as u8;
    (1..=9).contains(&digit).then_some(digit)
}
