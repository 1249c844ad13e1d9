use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use crate::error::Error;
use crate::image::format::is_image_file;
use crate::image::RasterFormat;
use crate::Result;

pub mod aggregator;
pub mod tree;

pub const FALLBACK_NUMBER_OF_THREADS: usize = 4;

/// Number of workers used when none is configured.
pub fn worker_count() -> usize {
    match thread::available_parallelism() {
        Ok(count) => {
            log::debug!("Number of CPUs detected. Setting to {}", count);
            count.get()
        }
        Err(error) => {
            log::warn!(
                "Number of CPUs not found ({}). Setting default to {}",
                error,
                FALLBACK_NUMBER_OF_THREADS
            );
            FALLBACK_NUMBER_OF_THREADS
        }
    }
}

fn read_sorted_entries(path: &Path) -> Result<Vec<PathBuf>> {
    let to_error = |e: io::Error| Error::UnableToReadDirectory(path.to_string_lossy().into_owned(), e);
    let mut entries = fs::read_dir(path)
        .map_err(to_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(to_error)?;
    entries.sort();
    Ok(entries)
}

/// Files directly inside `path` whose content matches one of `formats`, sorted by name.
pub fn images_in_directory(path: &Path, formats: &[RasterFormat]) -> Result<Vec<PathBuf>> {
    let images: Vec<PathBuf> = read_sorted_entries(path)?
        .into_iter()
        .filter(|entry| is_image_file(entry, formats))
        .collect();
    log::debug!(
        "Found {} image(s) in directory '{}'",
        images.len(),
        path.display()
    );
    Ok(images)
}

/// `root` and every directory below it that directly contains an image, in
/// depth first order. Symbolic links to directories are not followed.
pub fn directories_with_images(root: &Path, formats: &[RasterFormat]) -> Result<Vec<PathBuf>> {
    let mut directories = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(directory) = pending.pop() {
        let entries = match read_sorted_entries(&directory) {
            Ok(entries) => entries,
            Err(error) if directory.as_path() != root => {
                log::warn!("Skipping directory: {}", error);
                continue;
            }
            Err(error) => return Err(error),
        };
        let mut has_image = false;
        let mut subdirectories = Vec::new();
        for entry in entries {
            match fs::symlink_metadata(&entry) {
                Ok(metadata) if metadata.is_dir() => subdirectories.push(entry),
                _ => has_image = has_image || is_image_file(&entry, formats),
            }
        }
        if has_image {
            log::debug!("Image found in directory '{}'", directory.display());
            directories.push(directory);
        }
        pending.extend(subdirectories.into_iter().rev());
    }
    Ok(directories)
}

/// The final component of `path`, resolving `.` and `..` first.
pub fn name_from_path(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().into_owned();
    }
    fs::canonicalize(path)
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
