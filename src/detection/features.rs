use image::Rgb32FImage;

use crate::detection::steps::{ColorStatisticsStep, NormalizeStep, ResizeStep, RgbConversionStep};
use crate::detection::{preprocessing, ImageProcessingError};
use crate::models::ImageFeatures;
use crate::pipeline::{Pipeline, PipelineData};
use std::sync::Arc;

pub const MEAN_KEYS: [&str; 3] = ["mean_r", "mean_g", "mean_b"];
pub const STD_KEYS: [&str; 3] = ["std_r", "std_g", "std_b"];
pub const GREEN_MEAN_KEY: &str = "green_mean";
pub const GREEN_STD_KEY: &str = "green_std";

/// Build the feature extraction pipeline for a given square target size
pub fn build_feature_pipeline(target_size: u32) -> Pipeline {
    Pipeline::new()
        .add_step(Arc::new(RgbConversionStep))
        .add_step(Arc::new(ResizeStep { target_size }))
        .add_step(Arc::new(NormalizeStep))
        .add_step(Arc::new(ColorStatisticsStep))
}

/// Decode image bytes and compute colour statistics on the resized image.
pub fn extract(bytes: &[u8], pipeline: &Pipeline) -> Result<ImageFeatures, ImageProcessingError> {
    let img = preprocessing::decode(bytes)?;
    let results = pipeline.run(img)?;
    let data = results.first().ok_or(ImageProcessingError::NoOutput)?;
    ImageFeatures::from_metadata(data).ok_or(ImageProcessingError::MissingStatistics)
}

/// Per-channel mean and population standard deviation, denormalized to 0..=255.
///
/// Returns `None` for an empty image.
pub fn channel_statistics(tensor: &Rgb32FImage) -> Option<ImageFeatures> {
    let count = tensor.width() as usize * tensor.height() as usize;
    if count == 0 {
        return None;
    }
    let n = count as f64;

    let mut sums = [0f64; 3];
    for pixel in tensor.pixels() {
        for (c, sum) in sums.iter_mut().enumerate() {
            *sum += pixel[c] as f64 * 255.0;
        }
    }
    let mean_color = sums.map(|s| s / n);

    let mut squares = [0f64; 3];
    for pixel in tensor.pixels() {
        for (c, sq) in squares.iter_mut().enumerate() {
            let d = pixel[c] as f64 * 255.0 - mean_color[c];
            *sq += d * d;
        }
    }
    let std_color = squares.map(|s| (s / n).sqrt());

    Some(ImageFeatures {
        mean_color,
        std_color,
        green_mean: mean_color[1],
        green_std: std_color[1],
    })
}

impl ImageFeatures {
    /// Read features written by [`ColorStatisticsStep`].
    pub fn from_metadata(data: &PipelineData) -> Option<Self> {
        let mut mean_color = [0f64; 3];
        let mut std_color = [0f64; 3];
        for c in 0..3 {
            mean_color[c] = data.get_float(MEAN_KEYS[c])?;
            std_color[c] = data.get_float(STD_KEYS[c])?;
        }
        Some(Self {
            mean_color,
            std_color,
            green_mean: data.get_float(GREEN_MEAN_KEY)?,
            green_std: data.get_float(GREEN_STD_KEY)?,
        })
    }
}
