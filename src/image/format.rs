use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::RasterFormat;

const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
const LONGEST_SIGNATURE: usize = PNG_SIGNATURE.len();

trait Signature {
    fn signature(&self) -> &'static [u8];
}

impl Signature for RasterFormat {
    fn signature(&self) -> &'static [u8] {
        match self {
            Self::Jpeg => &JPEG_SIGNATURE,
            Self::Png => &PNG_SIGNATURE,
        }
    }
}

/// Identifies the raster format from the leading bytes of an image.
pub fn sniff_format(header: &[u8]) -> Option<RasterFormat> {
    [RasterFormat::Jpeg, RasterFormat::Png]
        .into_iter()
        .find(|format| header.starts_with(format.signature()))
}

/// Reads the first bytes of `path` and identifies its raster format.
pub fn sniff_file(path: &Path) -> io::Result<Option<RasterFormat>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(LONGEST_SIGNATURE);
    file.take(LONGEST_SIGNATURE as u64).read_to_end(&mut header)?;
    Ok(sniff_format(&header))
}

/// True if `path` is a regular file whose content matches one of `formats`.
pub fn is_image_file(path: &Path, formats: &[RasterFormat]) -> bool {
    if !path.is_file() {
        return false;
    }
    match sniff_file(path) {
        Ok(Some(format)) => formats.contains(&format),
        Ok(None) => false,
        Err(error) => {
            log::debug!("Unable to sniff '{}': {}", path.display(), error);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::{sniff_format, RasterFormat};

    #[test]
    fn sniff_jpeg_header() {
        let header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(sniff_format(&header), Some(RasterFormat::Jpeg));
    }

    #[test]
    fn sniff_png_header() {
        let header = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n', 0x00];
        assert_eq!(sniff_format(&header), Some(RasterFormat::Png));
    }

    #[test]
    fn extension_like_text_is_not_an_image() {
        assert_eq!(sniff_format(b"picture.png"), None);
        assert_eq!(sniff_format(b"GIF89a"), None);
    }

    #[test]
    fn truncated_signature_is_rejected() {
        assert_eq!(sniff_format(&[0x89, b'P', b'N', b'G']), None);
        assert_eq!(sniff_format(&[0xFF, 0xD8]), None);
        assert_eq!(sniff_format(&[]), None);
    }
}
