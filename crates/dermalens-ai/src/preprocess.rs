//! Image decoding and tensor preprocessing.
//!
//! Converts arbitrary uploaded image bytes into the exact `(1, 3, 224, 224)`
//! normalized CHW tensor the backbone was trained on. The normalization
//! constants are the backbone's original pretraining statistics; changing
//! them degrades predictions silently rather than failing loudly, so they
//! are deliberately not configurable.

use image::imageops::FilterType;

use crate::error::ClassifyError;

/// Spatial resolution the backbone's positional embeddings expect.
pub const INPUT_SIZE: u32 = 224;

/// Input channel count; images are forced to RGB before tensor conversion.
pub const CHANNELS: usize = 3;

/// Per-channel normalization mean (RGB, pretraining statistics).
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Per-channel normalization standard deviation (RGB, pretraining statistics).
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// A single preprocessed image: CHW f32 data with a leading batch dim of 1.
#[derive(Debug)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    /// Tensor shape, always `[1, 3, 224, 224]`.
    pub fn shape(&self) -> [i64; 4] {
        [1, CHANNELS as i64, INPUT_SIZE as i64, INPUT_SIZE as i64]
    }

    /// Flat CHW data, length `3 * 224 * 224`.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Decode, resize, and normalize one uploaded image.
///
/// Accepts any format the `image` crate can decode (JPEG, PNG, WebP, ...);
/// alpha is dropped and grayscale expanded so the tensor is always
/// 3-channel. Resizing is bilinear and does not preserve aspect ratio.
pub fn preprocess(bytes: &[u8]) -> Result<ImageTensor, ClassifyError> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = decoded.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let plane = (INPUT_SIZE * INPUT_SIZE) as usize;
    let mut data = vec![0.0f32; CHANNELS * plane];

    // HWC u8 → CHW f32, scaled to [0,1] then normalized per channel.
    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..CHANNELS {
            data[c * plane + i] = (f32::from(pixel.0[c]) / 255.0 - MEAN[c]) / STD[c];
        }
    }

    Ok(ImageTensor { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn solid_rgb(w: u32, h: u32, rgb: [u8; 3]) -> Vec<u8> {
        encode_png(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            w,
            h,
            Rgb(rgb),
        )))
    }

    /// Tightest bounds any normalized value can take: pixel intensities are
    /// in [0,1], so channel c lies in [(0-mean)/std, (1-mean)/std].
    fn assert_in_normalized_range(tensor: &ImageTensor) {
        let plane = (INPUT_SIZE * INPUT_SIZE) as usize;
        for c in 0..CHANNELS {
            let lo = (0.0 - MEAN[c]) / STD[c];
            let hi = (1.0 - MEAN[c]) / STD[c];
            for &v in &tensor.data()[c * plane..(c + 1) * plane] {
                assert!(v.is_finite(), "non-finite value in channel {c}");
                assert!(
                    (lo - 1e-4..=hi + 1e-4).contains(&v),
                    "channel {c} value {v} outside [{lo}, {hi}]"
                );
            }
        }
    }

    #[test]
    fn rgb_any_resolution_yields_fixed_shape() {
        for (w, h) in [(1, 1), (50, 80), (224, 224), (512, 512), (1000, 300)] {
            let tensor = preprocess(&solid_rgb(w, h, [120, 90, 200])).unwrap();
            assert_eq!(tensor.shape(), [1, 3, 224, 224]);
            assert_eq!(tensor.data().len(), 3 * 224 * 224);
            assert_in_normalized_range(&tensor);
        }
    }

    #[test]
    fn grayscale_expands_to_three_channels() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(64, 64, image::Luma([77])));
        let tensor = preprocess(&encode_png(img)).unwrap();
        assert_eq!(tensor.shape(), [1, 3, 224, 224]);

        // All three channels come from the same intensity, so each plane is
        // uniform at (77/255 - mean[c]) / std[c].
        let plane = (INPUT_SIZE * INPUT_SIZE) as usize;
        for c in 0..CHANNELS {
            let expected = (77.0 / 255.0 - MEAN[c]) / STD[c];
            for &v in &tensor.data()[c * plane..(c + 1) * plane] {
                assert!((v - expected).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn rgba_alpha_is_dropped() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            96,
            96,
            Rgba([200, 10, 60, 128]),
        ));
        let tensor = preprocess(&encode_png(img)).unwrap();
        assert_eq!(tensor.shape(), [1, 3, 224, 224]);
        assert_in_normalized_range(&tensor);
    }

    #[test]
    fn solid_color_normalizes_exactly() {
        let tensor = preprocess(&solid_rgb(224, 224, [128, 128, 128])).unwrap();
        let plane = (INPUT_SIZE * INPUT_SIZE) as usize;
        for c in 0..CHANNELS {
            let expected = (128.0 / 255.0 - MEAN[c]) / STD[c];
            assert!((tensor.data()[c * plane] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn non_image_bytes_fail_with_decode_error() {
        let err = preprocess(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn empty_bytes_fail_with_decode_error() {
        let err = preprocess(&[]).unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)));
    }

    #[test]
    fn truncated_png_fails_with_decode_error() {
        let mut bytes = solid_rgb(32, 32, [0, 0, 0]);
        bytes.truncate(bytes.len() / 2);
        let err = preprocess(&bytes).unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)));
    }
}
