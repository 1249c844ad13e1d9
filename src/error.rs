use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    UnsupportedImageSignature(String),
    UnableToDecodeImage(String, ::image::ImageError),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToReadDirectory(String, std::io::Error),
    NoPixelsAveraged(String),
    UnsupportedChannelLayout(String, u8),
    MissingName,
    DirectoryAveraging(String),
    TreeAveraging(String),
    EmptyResultSet,
    InsufficientResults(usize, u32, u32),
    InvalidAspectRatio(String),
    FailedToReadResults(std::io::Error),
    FailedToWriteResults(std::io::Error),
    FailedToSaveImage(String, ::image::ImageError),
}

impl Error {
    /// Errors raised because one image could not be opened or identified.
    pub fn is_image_open_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedImageSignature(_)
                | Self::UnableToDecodeImage(_, _)
                | Self::UnableToOpenInputFileForReading(_, _)
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedImageSignature(name) => {
                write!(f, "Content of '{}' is not a supported image format", name)
            }
            Self::UnableToDecodeImage(name, error) => {
                write!(f, "Unable to decode image '{}': {}", name, error)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToReadDirectory(path, error) => {
                write!(f, "Unable to read directory '{}': {}", path, error)
            }
            Self::NoPixelsAveraged(name) => {
                write!(
                    f,
                    "No pixels of '{}' passed the alpha threshold, nothing to average",
                    name
                )
            }
            Self::UnsupportedChannelLayout(name, channels) => {
                write!(
                    f,
                    "Image '{}' has {} color channel(s), at least 3 are required",
                    name, channels
                )
            }
            Self::MissingName => {
                write!(f, "A name must be provided when averaging an image stream")
            }
            Self::DirectoryAveraging(path) => {
                write!(f, "No image in directory '{}' was averaged", path)
            }
            Self::TreeAveraging(path) => {
                write!(f, "No directory below '{}' was averaged", path)
            }
            Self::EmptyResultSet => write!(f, "The result set is empty"),
            Self::InsufficientResults(count, width, height) => {
                write!(
                    f,
                    "{} result(s) are too few to fill a rectangle with aspect ratio {}:{}",
                    count, width, height
                )
            }
            Self::InvalidAspectRatio(value) => {
                write!(f, "Invalid aspect ratio '{}', expected WIDTH:HEIGHT", value)
            }
            Self::FailedToReadResults(error) => write!(f, "Failed to read results: {}", error),
            Self::FailedToWriteResults(error) => {
                write!(f, "Failed to write results: {}", error)
            }
            Self::FailedToSaveImage(path, error) => {
                write!(f, "Failed to save image '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {}
