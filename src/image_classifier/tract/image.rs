use crate::image_classifier::models::model_config::Normalization;
use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Square inputs are stretched; anything else is scaled to fit and centered
/// on a black canvas.
pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    if image.width() == image.height() {
        return image
            .resize_exact(width, height, imageops::FilterType::Triangle)
            .to_rgb8();
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).clamp(1, width);
    let new_h = ((h * scale) as u32).clamp(1, height);

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = RgbImage::new(width, height);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    padded
}

pub fn normalize(value: u8, channel: usize, normalization: Normalization) -> f32 {
    let value = value as f32;
    match normalization {
        Normalization::ZeroToOne => value / 255.0,
        Normalization::MinusOneToOne => value / 127.5 - 1.0,
        Normalization::ImageNet => (value / 255.0 - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel],
    }
}

/// NCHW `f32` tensor of shape `[1, 3, height, width]`.
fn image_to_tensor(rgb: &RgbImage, normalization: Normalization) -> Tensor {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        normalize(pixel[c], c, normalization)
    })
    .into_tensor()
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
    normalization: Normalization,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    if image.width() == 0 || image.height() == 0 {
        return Err("cannot build a tensor from a zero-area image".into());
    }

    let resized = resize_image(image, width, height);

    Ok(image_to_tensor(&resized, normalization))
}
