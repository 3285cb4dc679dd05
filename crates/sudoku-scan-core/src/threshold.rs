//! Locally adaptive binarization.

use crate::{GrayImage, GrayImageView};

/// Summed-area table with one extra row/column of zeros, so that any window
/// sum is four lookups.
fn integral_image(src: &GrayImageView<'_>) -> Vec<u64> {
    let (w, h) = (src.width, src.height);
    let stride = w + 1;
    let mut sat = vec![0u64; stride * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += src.data[y * w + x] as u64;
            sat[(y + 1) * stride + (x + 1)] = sat[y * stride + (x + 1)] + row_sum;
        }
    }
    sat
}

/// Mean-adaptive threshold with inverted polarity.
///
/// A pixel becomes foreground (255) when it is darker than the mean of its
/// `window`-sized neighbourhood by more than `offset`; grid lines and printed
/// digits on a light background come out as foreground. The window is clamped
/// at the image border, matching the usual replicated-border convention.
pub fn adaptive_threshold_inv(src: &GrayImageView<'_>, window: usize, offset: i32) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let mut out = GrayImage::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let window = window.max(3);
    let half = (window / 2) as i64;
    let sat = integral_image(src);
    let stride = w + 1;

    for y in 0..h as i64 {
        let y0 = (y - half).max(0) as usize;
        let y1 = ((y + half) as usize).min(h - 1) + 1;
        for x in 0..w as i64 {
            let x0 = (x - half).max(0) as usize;
            let x1 = ((x + half) as usize).min(w - 1) + 1;

            let sum = sat[y1 * stride + x1] + sat[y0 * stride + x0]
                - sat[y0 * stride + x1]
                - sat[y1 * stride + x0];
            let count = ((y1 - y0) * (x1 - x0)) as i64;
            let mean = (sum as i64 / count) as i32;

            let v = src.data[y as usize * w + x as usize] as i32;
            out.data[y as usize * w + x as usize] = if v < mean - offset { 255 } else { 0 };
        }
    }
    out
}
