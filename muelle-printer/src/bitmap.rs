//! Call-scoped spool file for a rendered ticket
//!
//! The OS shell "print" handler expects a file on disk, so the in-memory
//! canvas is written out as a BMP next to the system temp directory. The
//! file lives exactly as long as the [`SpoolBitmap`] value: dropping it
//! removes the file on every exit path, including dispatch failure.

use crate::error::PrintResult;
use image::{ImageFormat, RgbImage};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// A rendered ticket persisted to a temporary `.bmp` file.
pub struct SpoolBitmap {
    file: NamedTempFile,
}

impl SpoolBitmap {
    /// Encode `image` as BMP into a fresh temp file.
    pub fn write(image: &RgbImage) -> PrintResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("ticket-")
            .suffix(".bmp")
            .tempfile()?;

        image.write_to(file.as_file_mut(), ImageFormat::Bmp)?;

        debug!(path = %file.path().display(), "spool bitmap written");
        Ok(Self { file })
    }

    /// Path of the spooled file, valid until the value is dropped.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::path::PathBuf;

    fn sample_image() -> RgbImage {
        RgbImage::from_pixel(12, 8, Rgb([255, 255, 255]))
    }

    #[test]
    fn spool_file_exists_while_held() {
        let spool = SpoolBitmap::write(&sample_image()).unwrap();
        assert!(spool.path().exists());
        assert_eq!(
            spool.path().extension().and_then(|e| e.to_str()),
            Some("bmp")
        );
    }

    #[test]
    fn spool_file_contains_bmp_header() {
        let spool = SpoolBitmap::write(&sample_image()).unwrap();
        let bytes = std::fs::read(spool.path()).unwrap();
        assert_eq!(&bytes[..2], b"BM");
    }

    #[test]
    fn spool_file_removed_on_drop() {
        let path: PathBuf;
        {
            let spool = SpoolBitmap::write(&sample_image()).unwrap();
            path = spool.path().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }
}
