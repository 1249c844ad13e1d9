use std::path::Path;

use threadpool::ThreadPool;

use super::aggregator::DirectoryAverager;
use super::directories_with_images;
use crate::color::ImageResult;
use crate::error::Error;
use crate::image::{AveragingOptions, RasterFormat};
use crate::Result;

/// Walks a directory tree and averages every directory that directly holds images.
pub struct TreeAverager<'a> {
    directory_averager: &'a DirectoryAverager<'a>,
}

impl<'a> TreeAverager<'a> {
    pub fn new(directory_averager: &'a DirectoryAverager<'a>) -> Self {
        TreeAverager { directory_averager }
    }

    pub fn average_tree(&self, root: &Path) -> Result<Vec<ImageResult>> {
        let formats = self.directory_averager.formats();
        let directories = directories_with_images(root, formats)?;
        log::info!(
            "Found {} directories with images below '{}'",
            directories.len(),
            root.display()
        );
        let mut results = Vec::with_capacity(directories.len());
        for directory in directories {
            match self.directory_averager.average_directory(&directory) {
                Ok(result) => results.push(result),
                Err(error) => log::warn!("Skipping directory '{}': {}", directory.display(), error),
            }
        }
        if results.is_empty() {
            return Err(Error::TreeAveraging(root.to_string_lossy().into_owned()));
        }
        Ok(results)
    }
}

/// Averages every qualifying directory below `root` on a worker pool sized to the host.
pub fn average_tree(
    root: &Path,
    formats: &[RasterFormat],
    options: &AveragingOptions,
) -> Result<Vec<ImageResult>> {
    let threadpool = ThreadPool::new(super::worker_count());
    let directory_averager = DirectoryAverager::new(options, formats, &threadpool);
    TreeAverager::new(&directory_averager).average_tree(root)
}
