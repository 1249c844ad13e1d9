use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::ValueEnum;
use threadpool::ThreadPool;

pub use crate::cli::CLIParser;
pub use crate::color::ImageResult;
pub use crate::directory::aggregator::{average_directory, average_each_image, DirectoryAverager};
pub use crate::directory::tree::{average_tree, TreeAverager};
pub use crate::error::Error;
pub use crate::image::averager::{average_image_file, average_image_reader};
pub use crate::image::visualizer::{save_image, to_line, to_rectangle, AspectRatio};
pub use crate::image::{AveragingOptions, RasterFormat};
pub use crate::results::{read_csv, write_csv};

mod cli;
pub mod color;
pub mod directory;
mod error;
pub mod image;
mod logger;
pub mod results;

pub type Result<T> = std::result::Result<T, error::Error>;

/// What the input path points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Image,
    Each,
    Directory,
    Tree,
    Csv,
}

impl ValueEnum for Mode {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Image,
            Self::Each,
            Self::Directory,
            Self::Tree,
            Self::Csv,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Image => Some(PossibleValue::new("image").help("Average a single image")),
            Self::Each => {
                Some(PossibleValue::new("each").help("Average every image in a directory"))
            }
            Self::Directory => Some(
                PossibleValue::new("directory").help("Average all images of a directory at once"),
            ),
            Self::Tree => Some(
                PossibleValue::new("tree").help("Average every directory of a directory tree"),
            ),
            Self::Csv => Some(PossibleValue::new("csv").help("Load results from a CSV file")),
        }
    }
}

pub struct Arguments {
    input: PathBuf,
    mode: Mode,
    csv_output: Option<PathBuf>,
    line_output: Option<PathBuf>,
    rectangle_output: Option<PathBuf>,
    aspect_ratio: AspectRatio,
    number_of_threads: usize,
    formats: Vec<RasterFormat>,
    downsample: bool,
    max_size: u32,
    alpha_threshold: u8,
}

fn with_directory_averager<T>(
    arguments: &Arguments,
    options: &AveragingOptions,
    action: impl FnOnce(&DirectoryAverager) -> Result<T>,
) -> Result<T> {
    log::info!("Starting {} worker thread(s)", arguments.number_of_threads);
    let threadpool = ThreadPool::new(arguments.number_of_threads.max(1));
    action(&DirectoryAverager::new(
        options,
        &arguments.formats,
        &threadpool,
    ))
}

fn collect_results(arguments: &Arguments) -> Result<Vec<ImageResult>> {
    let options = AveragingOptions::from(arguments);
    let input = arguments.input.as_path();
    match arguments.mode {
        Mode::Image => Ok(vec![average_image_file(input, None, &options)?]),
        Mode::Csv => read_csv(input),
        Mode::Each => with_directory_averager(arguments, &options, |averager| {
            averager.average_each_image(input)
        }),
        Mode::Directory => with_directory_averager(arguments, &options, |averager| {
            Ok(vec![averager.average_directory(input)?])
        }),
        Mode::Tree => with_directory_averager(arguments, &options, |averager| {
            TreeAverager::new(averager).average_tree(input)
        }),
    }
}

fn export_results(arguments: &Arguments, results: &[ImageResult]) -> Result<()> {
    if let Some(path) = &arguments.csv_output {
        write_csv(results, path)?;
    }
    if let Some(path) = &arguments.line_output {
        save_image(&to_line(results)?, path)?;
    }
    if let Some(path) = &arguments.rectangle_output {
        save_image(&to_rectangle(results, arguments.aspect_ratio)?, path)?;
    }
    Ok(())
}

/// Averages the configured input and writes every requested export.
pub fn average_and_export(arguments: &Arguments) -> Result<Vec<ImageResult>> {
    let results = collect_results(arguments)?;
    logger::log_results(&results);
    export_results(arguments, &results)?;
    Ok(results)
}
