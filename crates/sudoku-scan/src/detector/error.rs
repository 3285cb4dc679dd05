/// Errors that abort a frame scan.
///
/// "No puzzle in view" and "cell has no glyph" are expected outcomes, not
/// errors, and never appear here.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("perspective mapping estimation failed for the detected corners")]
    MappingFailed,
    #[error("perspective mapping is not invertible")]
    NonInvertible,
}
