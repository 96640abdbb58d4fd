use crate::pipeline::{PipelineData, PipelineStep, PipelineContext, MetadataValue};
use crate::detection::{features, preprocessing};
use anyhow::Result;
use image::DynamicImage;

/// Convert image to three-channel 8-bit colour
pub struct RgbConversionStep;

impl PipelineStep for RgbConversionStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let source = item.image.color();
            let new_item = PipelineData {
                image: preprocessing::to_rgb(item.image),
                metadata: item.metadata,
            }
            .with_metadata("source_color", MetadataValue::String(format!("{:?}", source)))
            .with_metadata("converted", MetadataValue::Bool(source != image::ColorType::Rgb8));
            result.push(new_item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "RGB Conversion"
    }
}

/// Resize to the square resolution the classifier expects
pub struct ResizeStep {
    pub target_size: u32,
}

impl PipelineStep for ResizeStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        if self.target_size == 0 {
            anyhow::bail!("Resize target must be at least 1 pixel");
        }
        let mut result = Vec::new();
        for item in data {
            if item.image.width() == 0 || item.image.height() == 0 {
                anyhow::bail!("Cannot resize an empty image");
            }
            let resized = preprocessing::resize_square(&item.image, self.target_size);
            let new_item = PipelineData {
                image: resized,
                metadata: item.metadata,
            }
            .with_metadata("width", MetadataValue::Int(self.target_size as i64))
            .with_metadata("height", MetadataValue::Int(self.target_size as i64));
            result.push(new_item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Resize"
    }
}

/// Scale channel values into [0, 1] (model input representation)
pub struct NormalizeStep;

impl PipelineStep for NormalizeStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let normalized = preprocessing::normalize(&item.image);
            result.push(PipelineData {
                image: DynamicImage::ImageRgb32F(normalized),
                metadata: item.metadata,
            });
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Normalization"
    }
}

/// Compute per-channel colour statistics and store them as metadata
pub struct ColorStatisticsStep;

impl PipelineStep for ColorStatisticsStep {
    fn process(&self, data: Vec<PipelineData>, context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();
        for item in data {
            let tensor = item
                .image
                .as_rgb32f()
                .ok_or_else(|| anyhow::anyhow!("Colour statistics expect normalized RGB input"))?;
            let stats = features::channel_statistics(tensor)
                .ok_or_else(|| anyhow::anyhow!("Cannot compute statistics of an empty image"))?;

            if context.verbose {
                tracing::debug!(
                    green_mean = stats.green_mean,
                    red_std = stats.std_color[0],
                    "Colour statistics computed"
                );
            }

            let mut new_item = item;
            for c in 0..3 {
                new_item.metadata.insert(features::MEAN_KEYS[c].to_string(), MetadataValue::Float(stats.mean_color[c]));
                new_item.metadata.insert(features::STD_KEYS[c].to_string(), MetadataValue::Float(stats.std_color[c]));
            }
            new_item.metadata.insert(features::GREEN_MEAN_KEY.to_string(), MetadataValue::Float(stats.green_mean));
            new_item.metadata.insert(features::GREEN_STD_KEY.to_string(), MetadataValue::Float(stats.green_std));
            result.push(new_item);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Colour Statistics"
    }
}
