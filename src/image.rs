use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::Arguments;

pub mod averager;
pub mod format;
pub mod visualizer;

pub const DEFAULT_MAX_SIZE: u32 = 100;
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 245;

/// The raster formats recognised by content signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

pub const ALL_RASTER_FORMATS: &[RasterFormat] = &[RasterFormat::Jpeg, RasterFormat::Png];

impl ValueEnum for RasterFormat {
    fn value_variants<'a>() -> &'a [Self] {
        ALL_RASTER_FORMATS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Jpeg => Some(PossibleValue::new("jpeg").alias("jpg")),
            Self::Png => Some(PossibleValue::new("png")),
        }
    }
}

impl From<RasterFormat> for ::image::ImageFormat {
    fn from(value: RasterFormat) -> Self {
        match value {
            RasterFormat::Jpeg => ::image::ImageFormat::Jpeg,
            RasterFormat::Png => ::image::ImageFormat::Png,
        }
    }
}

/// Controls how a single image is averaged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AveragingOptions {
    /// shrink the image before iterating its pixels
    pub downsample: bool,
    /// longest side after downsampling
    pub max_size: u32,
    /// pixels with an alpha value at or below this are ignored
    pub alpha_threshold: u8,
}

impl Default for AveragingOptions {
    fn default() -> Self {
        Self {
            downsample: true,
            max_size: DEFAULT_MAX_SIZE,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl From<&Arguments> for AveragingOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            downsample: value.downsample,
            max_size: value.max_size,
            alpha_threshold: value.alpha_threshold,
        }
    }
}
