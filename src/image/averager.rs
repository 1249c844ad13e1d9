use std::fs;
use std::io::Read;
use std::path::Path;

use ::image::imageops::FilterType;
use ::image::DynamicImage;

use super::format::sniff_format;
use super::AveragingOptions;
use crate::color::{ColorAccumulator, ImageResult};
use crate::error::Error;
use crate::Result;

/// Averages the image stored at `path`.
///
/// The result is named after the final path component unless `name` is given.
pub fn average_image_file(
    path: &Path,
    name: Option<&str>,
    options: &AveragingOptions,
) -> Result<ImageResult> {
    let name = match name {
        Some(name) => name.to_owned(),
        None => file_name_of(path).ok_or(Error::MissingName)?,
    };
    log::debug!("Averaging image file '{}'", path.display());
    let bytes = fs::read(path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(path.to_string_lossy().into_owned(), e)
    })?;
    average_image_bytes(&bytes, name, options)
}

/// Averages an image read from an arbitrary stream. Streams carry no file name,
/// so `name` is mandatory.
pub fn average_image_reader<R: Read>(
    mut reader: R,
    name: Option<&str>,
    options: &AveragingOptions,
) -> Result<ImageResult> {
    let name = name.ok_or(Error::MissingName)?.to_owned();
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::UnableToOpenInputFileForReading(name.clone(), e))?;
    average_image_bytes(&bytes, name, options)
}

fn average_image_bytes(
    bytes: &[u8],
    name: String,
    options: &AveragingOptions,
) -> Result<ImageResult> {
    let format =
        sniff_format(bytes).ok_or_else(|| Error::UnsupportedImageSignature(name.clone()))?;
    let image = ::image::load_from_memory_with_format(bytes, format.into())
        .map_err(|e| Error::UnableToDecodeImage(name.clone(), e))?;
    log::debug!(
        "Image '{}' opened. Dimensions {} x {}",
        name,
        image.width(),
        image.height()
    );
    let color = average_pixels(&image, &name, options)?;
    let result = ImageResult::from_color(name, color);
    log::debug!(
        "Average of '{}': R={}, G={}, B={}",
        result.name,
        result.red,
        result.green,
        result.blue
    );
    Ok(result)
}

/// Averages the pixels of a decoded image, skipping pixels whose alpha value
/// does not exceed the configured threshold.
pub fn average_pixels(
    image: &DynamicImage,
    name: &str,
    options: &AveragingOptions,
) -> Result<[u8; 3]> {
    let color_type = image.color();
    let channel_count = color_type.channel_count();
    if channel_count < 3 {
        return Err(Error::UnsupportedChannelLayout(
            name.to_owned(),
            channel_count,
        ));
    }
    let downsampled;
    let image = if needs_downsampling(image, options) {
        let max_size = options.max_size.max(1);
        downsampled = image.resize(max_size, max_size, FilterType::Nearest);
        log::debug!(
            "Image '{}' resized to {} x {}",
            name,
            downsampled.width(),
            downsampled.height()
        );
        &downsampled
    } else {
        image
    };
    let accumulator = if color_type.has_alpha() {
        accumulate_translucent(image, options.alpha_threshold)
    } else {
        accumulate_opaque(image)
    };
    accumulator
        .average()
        .ok_or_else(|| Error::NoPixelsAveraged(name.to_owned()))
}

fn needs_downsampling(image: &DynamicImage, options: &AveragingOptions) -> bool {
    options.downsample && (image.width() > options.max_size || image.height() > options.max_size)
}

fn accumulate_translucent(image: &DynamicImage, alpha_threshold: u8) -> ColorAccumulator {
    let mut accumulator = ColorAccumulator::new();
    for pixel in image.to_rgba8().pixels() {
        let [red, green, blue, alpha] = pixel.0;
        if alpha > alpha_threshold {
            accumulator.push(red, green, blue);
        }
    }
    accumulator
}

fn accumulate_opaque(image: &DynamicImage) -> ColorAccumulator {
    let mut accumulator = ColorAccumulator::new();
    for pixel in image.to_rgb8().pixels() {
        let [red, green, blue] = pixel.0;
        accumulator.push(red, green, blue);
    }
    accumulator
}

pub(crate) fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
