use std::path::{Path, PathBuf};
use std::sync::mpsc;

use threadpool::ThreadPool;

use super::{images_in_directory, name_from_path};
use crate::color::{ColorAccumulator, ImageResult};
use crate::error::Error;
use crate::image::averager::average_image_file;
use crate::image::{AveragingOptions, RasterFormat};
use crate::Result;

/// Averages the images of one directory on a shared worker pool.
pub struct DirectoryAverager<'a> {
    options: &'a AveragingOptions,
    formats: &'a [RasterFormat],
    threadpool: &'a ThreadPool,
}

impl<'a> DirectoryAverager<'a> {
    pub fn new(
        options: &'a AveragingOptions,
        formats: &'a [RasterFormat],
        threadpool: &'a ThreadPool,
    ) -> Self {
        DirectoryAverager {
            options,
            formats,
            threadpool,
        }
    }

    pub fn formats(&self) -> &'a [RasterFormat] {
        self.formats
    }

    /// One result per image directly inside `path`, ordered by file name.
    /// Images that cannot be averaged are logged and left out.
    pub fn average_each_image(&self, path: &Path) -> Result<Vec<ImageResult>> {
        let images = images_in_directory(path, self.formats)?;
        Ok(self.average_files(images))
    }

    /// The mean of all per-image averages of `path`, named after the directory.
    pub fn average_directory(&self, path: &Path) -> Result<ImageResult> {
        let results = self.average_each_image(path)?;
        let name = name_from_path(path);
        let accumulator: ColorAccumulator = results.iter().collect();
        match accumulator.average() {
            Some(color) => {
                log::info!(
                    "Averaged {} image(s) in directory '{}'",
                    accumulator.count(),
                    name
                );
                Ok(ImageResult::from_color(name, color))
            }
            None => Err(Error::DirectoryAveraging(path.to_string_lossy().into_owned())),
        }
    }

    fn average_files(&self, files: Vec<PathBuf>) -> Vec<ImageResult> {
        let number_of_files = files.len();
        let (sender, receiver) = mpsc::channel();
        for (index, file) in files.into_iter().enumerate() {
            let sender = sender.clone();
            let options = *self.options;
            self.threadpool.execute(move || {
                let result = average_image_file(&file, None, &options);
                if sender.send((index, file, result)).is_err() {
                    log::error!("Result receiver closed before all images were averaged");
                }
            });
        }
        drop(sender);
        let mut results: Vec<(usize, ImageResult)> = Vec::with_capacity(number_of_files);
        let mut received = 0;
        for (index, file, result) in receiver.iter() {
            received += 1;
            match result {
                Ok(result) => results.push((index, result)),
                Err(error) => log::warn!("Skipping image '{}': {}", file.display(), error),
            }
        }
        if received < number_of_files {
            log::warn!(
                "{} image worker(s) stopped without reporting a result",
                number_of_files - received
            );
        }
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

/// Averages every image in `path` on a worker pool sized to the host.
pub fn average_each_image(
    path: &Path,
    formats: &[RasterFormat],
    options: &AveragingOptions,
) -> Result<Vec<ImageResult>> {
    let threadpool = ThreadPool::new(super::worker_count());
    DirectoryAverager::new(options, formats, &threadpool).average_each_image(path)
}

/// Averages all images in `path` into one color on a worker pool sized to the host.
pub fn average_directory(
    path: &Path,
    formats: &[RasterFormat],
    options: &AveragingOptions,
) -> Result<ImageResult> {
    let threadpool = ThreadPool::new(super::worker_count());
    DirectoryAverager::new(options, formats, &threadpool).average_directory(path)
}
