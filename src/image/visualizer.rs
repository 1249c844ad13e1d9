use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use ::image::{Rgb, RgbImage};

use crate::color::ImageResult;
use crate::error::Error;
use crate::Result;

/// Width to height ratio of a rectangle built from results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidAspectRatio(format!("{}:{}", width, height)));
        }
        Ok(Self { width, height })
    }

    /// Largest `side` with `side * width` by `side * height` pixels fitting into
    /// `count` results, i.e. `floor(sqrt(count / (width * height)))`.
    fn side_length(&self, count: usize) -> u64 {
        let area = u64::from(self.width) * u64::from(self.height);
        let count = count as u64;
        let mut side = ((count as f64) / (area as f64)).sqrt() as u64;
        while side > 0 && side * side * area > count {
            side -= 1;
        }
        while (side + 1) * (side + 1) * area <= count {
            side += 1;
        }
        side
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 3,
            height: 2,
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAspectRatio(s.to_owned());
        let (width, height) = s.split_once([':', 'x']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Self::new(width, height).map_err(|_| invalid())
    }
}

fn pixel_of(result: &ImageResult) -> Rgb<u8> {
    Rgb(result.rgb())
}

/// Lays the results out as a single row, one pixel per result.
pub fn to_line(results: &[ImageResult]) -> Result<RgbImage> {
    if results.is_empty() {
        return Err(Error::EmptyResultSet);
    }
    let mut image = RgbImage::new(results.len() as u32, 1);
    for (column, result) in results.iter().enumerate() {
        image.put_pixel(column as u32, 0, pixel_of(result));
    }
    log::debug!("Created line image of {} pixels", results.len());
    Ok(image)
}

/// Lays the results out row by row into the largest rectangle of the given
/// aspect ratio that the result count can fill. Results beyond
/// `width * height` are not drawn.
pub fn to_rectangle(results: &[ImageResult], aspect_ratio: AspectRatio) -> Result<RgbImage> {
    if results.is_empty() {
        return Err(Error::EmptyResultSet);
    }
    let side = aspect_ratio.side_length(results.len());
    if side == 0 {
        return Err(Error::InsufficientResults(
            results.len(),
            aspect_ratio.width,
            aspect_ratio.height,
        ));
    }
    let width = (side * u64::from(aspect_ratio.width)) as u32;
    let height = (side * u64::from(aspect_ratio.height)) as u32;
    let mut image = RgbImage::new(width, height);
    for (index, result) in results
        .iter()
        .take(width as usize * height as usize)
        .enumerate()
    {
        let x = index as u32 % width;
        let y = index as u32 / width;
        image.put_pixel(x, y, pixel_of(result));
    }
    let dropped = results.len() - width as usize * height as usize;
    if dropped > 0 {
        log::info!(
            "Rectangle {} x {} holds {} of {} results, {} not drawn",
            width,
            height,
            width * height,
            results.len(),
            dropped
        );
    }
    Ok(image)
}

/// Saves a visualisation, the format is taken from the file extension.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    log::info!("Saving image {}", path.display());
    image
        .save(path)
        .map_err(|e| Error::FailedToSaveImage(path.to_string_lossy().into_owned(), e))
}
