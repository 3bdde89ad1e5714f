// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the YOLO cell detector

use image::{Rgb, RgbImage};
use ndarray::Array4;

/// Default square input size of YOLOv8 exports
pub const YOLO_INPUT_SIZE: u32 = 640;

/// Letterbox padding color (Ultralytics default)
pub const PAD_VALUE: u8 = 114;

/// Preprocess an image for YOLO detection
///
/// Steps:
/// 1. Letterbox to `input_size` x `input_size` with gray (114) padding
/// 2. Scale pixel values to [0, 1]
/// 3. Convert to NCHW tensor format [1, 3, S, S] in RGB order
pub fn preprocess_for_detection(image: &RgbImage, input_size: u32) -> (Array4<f32>, LetterboxInfo) {
    let info = LetterboxInfo::new(image.width(), image.height(), input_size);
    let letterboxed = letterbox(image, input_size);

    let size = input_size as usize;
    let mut tensor = Array4::zeros((1, 3, size, size));

    for (x, y, pixel) in letterboxed.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
        }
    }

    (tensor, info)
}

/// Resize image with aspect ratio preservation and centered padding
pub fn letterbox(image: &RgbImage, target_size: u32) -> RgbImage {
    let mut output = RgbImage::from_pixel(
        target_size,
        target_size,
        Rgb([PAD_VALUE, PAD_VALUE, PAD_VALUE]),
    );

    let (orig_w, orig_h) = image.dimensions();
    if orig_w == 0 || orig_h == 0 {
        return output;
    }

    let info = LetterboxInfo::new(orig_w, orig_h, target_size);
    let resized = image::imageops::resize(
        image,
        info.scaled_width,
        info.scaled_height,
        image::imageops::FilterType::Triangle,
    );

    image::imageops::replace(
        &mut output,
        &resized,
        info.offset_x as i64,
        info.offset_y as i64,
    );

    output
}

/// Scaling factor and offsets applied during letterboxing
///
/// Used to map detector coordinates back to original image space.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterboxInfo {
    /// Scale factor applied
    pub scale: f32,
    /// X offset from padding
    pub offset_x: u32,
    /// Y offset from padding
    pub offset_y: u32,
    /// Width after scaling, before padding
    pub scaled_width: u32,
    /// Height after scaling, before padding
    pub scaled_height: u32,
    /// Original image width
    pub original_width: u32,
    /// Original image height
    pub original_height: u32,
}

impl LetterboxInfo {
    pub fn new(orig_w: u32, orig_h: u32, target_size: u32) -> Self {
        if orig_w == 0 || orig_h == 0 {
            return Self {
                scale: 1.0,
                offset_x: 0,
                offset_y: 0,
                scaled_width: 0,
                scaled_height: 0,
                original_width: orig_w,
                original_height: orig_h,
            };
        }

        let scale = (target_size as f32 / orig_w as f32).min(target_size as f32 / orig_h as f32);
        let scaled_width = ((orig_w as f32 * scale).round() as u32).clamp(1, target_size);
        let scaled_height = ((orig_h as f32 * scale).round() as u32).clamp(1, target_size);

        Self {
            scale,
            offset_x: (target_size - scaled_width) / 2,
            offset_y: (target_size - scaled_height) / 2,
            scaled_width,
            scaled_height,
            original_width: orig_w,
            original_height: orig_h,
        }
    }

    /// Map a point from letterboxed space back to original image space,
    /// clipped to the original image bounds
    pub fn map_to_original(&self, x: f32, y: f32) -> (f32, f32) {
        let orig_x = (x - self.offset_x as f32) / self.scale;
        let orig_y = (y - self.offset_y as f32) / self.scale;
        (
            orig_x.clamp(0.0, self.original_width as f32),
            orig_y.clamp(0.0, self.original_height as f32),
        )
    }
}
