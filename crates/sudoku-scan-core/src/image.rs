//! Gray raster containers and the handful of filters the pipeline needs.

/// Borrowed view of a single-channel image. `data` is row-major, `len = w*h`.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned single-channel image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Allocate a zero-filled image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    /// Allocate an image filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    /// Copy out a sub-rectangle. The rectangle is clamped to the image bounds;
    /// a fully out-of-range request yields an empty image.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> GrayImage {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        let x0 = x.min(x1);
        let y0 = y.min(y1);
        let cw = x1 - x0;
        let ch = y1 - y0;

        let mut data = Vec::with_capacity(cw * ch);
        for row in y0..y1 {
            let start = row * self.width + x0;
            data.extend_from_slice(&self.data[start..start + cw]);
        }
        GrayImage {
            width: cw,
            height: ch,
            data,
        }
    }
}

#[inline]
fn get_clamped(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

/// Bilinear sample at a fractional position. Out-of-range taps read 0.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_clamped(src, x0, y0) as f32;
    let p10 = get_clamped(src, x0 + 1, y0) as f32;
    let p01 = get_clamped(src, x0, y0 + 1) as f32;
    let p11 = get_clamped(src, x0 + 1, y0 + 1) as f32;

    let top = p00 + fx * (p10 - p00);
    let bot = p01 + fx * (p11 - p01);
    top + fy * (bot - top)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).clamp(0.0, 255.0) as u8
}

/// Build a normalized 1-D Gaussian kernel for an odd `ksize`.
///
/// Sigma follows the usual kernel-size heuristic so that callers can specify
/// the smoothing purely through the window size.
fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (ksize / 2) as i32;
    let mut k = Vec::with_capacity(ksize);
    let mut sum = 0.0f32;
    for i in -half..=half {
        let v = (-(i * i) as f32 / (2.0 * sigma * sigma)).exp();
        k.push(v);
        sum += v;
    }
    for v in &mut k {
        *v /= sum;
    }
    k
}

/// Separable Gaussian smoothing with an odd window size.
///
/// Even sizes are rounded up; a window of 1 or an empty image is a copy.
pub fn gaussian_blur(src: &GrayImageView<'_>, ksize: usize) -> GrayImage {
    let ksize = if ksize % 2 == 0 { ksize + 1 } else { ksize };
    let (w, h) = (src.width, src.height);
    if ksize <= 1 || w == 0 || h == 0 {
        return GrayImage {
            width: w,
            height: h,
            data: src.data.to_vec(),
        };
    }

    let kernel = gaussian_kernel(ksize);
    let half = (ksize / 2) as i32;

    // horizontal pass into f32 scratch, then vertical pass back to u8
    let mut scratch = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (i, kv) in kernel.iter().enumerate() {
                let sx = (x as i32 + i as i32 - half).clamp(0, w as i32 - 1);
                acc += kv * src.data[y * w + sx as usize] as f32;
            }
            scratch[y * w + x] = acc;
        }
    }

    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (i, kv) in kernel.iter().enumerate() {
                let sy = (y as i32 + i as i32 - half).clamp(0, h as i32 - 1);
                acc += kv * scratch[sy as usize * w + x];
            }
            out.data[y * w + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Grayscale dilation with a 3x3 square structuring element.
pub fn dilate3x3(src: &GrayImageView<'_>) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let mut out = GrayImage::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let mut m = 0u8;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    m = m.max(get_clamped(src, x + dx, y + dy));
                }
            }
            out.data[y as usize * w + x as usize] = m;
        }
    }
    out
}

/// 3x3 median filter, used to knock out salt-and-pepper specks after
/// binarization. Border taps read 0.
pub fn median3x3(src: &GrayImageView<'_>) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let mut out = GrayImage::new(w, h);
    let mut window = [0u8; 9];
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let mut n = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    window[n] = get_clamped(src, x + dx, y + dy);
                    n += 1;
                }
            }
            window.sort_unstable();
            out.data[y as usize * w + x as usize] = window[4];
        }
    }
    out
}

/// Nearest-neighbour upscale by a uniform factor `scale >= 1`.
pub fn upscale_nearest(src: &GrayImageView<'_>, scale: f32) -> GrayImage {
    let ow = ((src.width as f32 * scale).round() as usize).max(1);
    let oh = ((src.height as f32 * scale).round() as usize).max(1);
    let mut out = GrayImage::new(ow, oh);
    for y in 0..oh {
        let sy = ((y as f32 / scale) as usize).min(src.height.saturating_sub(1));
        for x in 0..ow {
            let sx = ((x as f32 / scale) as usize).min(src.width.saturating_sub(1));
            out.data[y * ow + x] = src.data[sy * src.width + sx];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_clamps_to_bounds() {
        let mut img = GrayImage::new(8, 6);
        img.put(5, 3, 77);
        let c = img.crop(4, 2, 10, 10);
        assert_eq!(c.width, 4);
        assert_eq!(c.height, 4);
        assert_eq!(c.get(1, 1), 77);
    }

    #[test]
    fn blur_preserves_flat_regions() {
        let img = GrayImage::filled(20, 20, 200);
        let blurred = gaussian_blur(&img.view(), 11);
        assert!(blurred.data.iter().all(|&v| v == 200));
    }

    #[test]
    fn dilate_grows_single_pixel() {
        let mut img = GrayImage::new(7, 7);
        img.put(3, 3, 255);
        let d = dilate3x3(&img.view());
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                assert_eq!(d.get((3 + dx) as usize, (3 + dy) as usize), 255);
            }
        }
        assert_eq!(d.get(1, 3), 0);
    }

    #[test]
    fn median_removes_lone_speck() {
        let mut img = GrayImage::new(9, 9);
        img.put(4, 4, 255);
        let m = median3x3(&img.view());
        assert_eq!(m.get(4, 4), 0);
    }

    #[test]
    fn upscale_reaches_target_dims() {
        let img = GrayImage::filled(10, 20, 9);
        let up = upscale_nearest(&img.view(), 2.0);
        assert_eq!((up.width, up.height), (20, 40));
        assert!(up.data.iter().all(|&v| v == 9));
    }

    #[test]
    fn bilinear_interpolates_midpoint() {
        let mut img = GrayImage::new(2, 1);
        img.put(0, 0, 0);
        img.put(1, 0, 100);
        let v = sample_bilinear(&img.view(), 0.5, 0.0);
        assert!((v - 50.0).abs() < 1e-3);
    }
}
