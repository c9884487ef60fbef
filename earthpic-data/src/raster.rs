//! PNG output for rendered pictures.

use std::io::{self, Cursor};

use camino::{Utf8Path, Utf8PathBuf};
use earthpic_core::{RasterSink, Rgb8};
use image::{ImageFormat, Rgba, RgbaImage};
use log::info;
use thiserror::Error;

/// Failure to encode or store a raster.
#[derive(Debug, Error)]
pub enum RasterError {
    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
    /// The encoded image could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// `RasterSink` over an RGBA image.
///
/// The image starts fully transparent; every pixel written by the renderer
/// becomes opaque. Writes outside the image are ignored.
#[derive(Debug, Clone)]
pub struct PngRaster {
    image: RgbaImage,
}

impl PngRaster {
    /// Create a transparent raster of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Raster dimensions as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The RGBA pixel at `(x, y)`, if it lies inside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Encode the raster as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut bytes = Cursor::new(Vec::new());
        self.image
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(RasterError::Encode)?;
        Ok(bytes.into_inner())
    }

    /// Encode the raster as PNG and write it to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Encode`] if encoding fails and
    /// [`RasterError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Utf8Path) -> Result<(), RasterError> {
        let bytes = self.encode_png()?;
        earthpic_fs::write_file(path, &bytes).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (width, height) = self.dimensions();
        info!("wrote {width}x{height} PNG to {path}");
        Ok(())
    }
}

impl RasterSink for PngRaster {
    fn set(&mut self, x: u32, y: u32, color: Rgb8) {
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = Rgba([color.r, color.g, color.b, u8::MAX]);
        }
    }
}
