//! Frame access and decoding.
//!
//! The engine only ever reads a frame through [`Frame`]: dimensions plus a
//! bounds-checked pixel lookup. Every decoded layout is presented as RGBA8,
//! so grayscale pixels read as `(l, l, l, a)` and images without alpha read
//! with `a = 255`.

use image::{DynamicImage, GenericImageView, ImageBuffer, ImageReader, Pixel, Rgba};
use std::ops::Deref;
use std::path::Path;
use thiserror::Error;

/// A pixel lookup outside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pixel ({x}, {y}) is outside the {width}x{height} frame")]
pub struct OutOfBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Read-only view of a decoded frame.
pub trait Frame {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Returns the pixel at (`x`, `y`) as RGBA8.
    fn pixel(&self, x: u32, y: u32) -> Result<Rgba<u8>, OutOfBounds>;

    /// Returns `Ok(())` if (`x`, `y`) lies inside the frame.
    fn check_bounds(&self, x: u32, y: u32) -> Result<(), OutOfBounds> {
        let (width, height) = (self.width(), self.height());
        if x < width && y < height {
            Ok(())
        } else {
            Err(OutOfBounds {
                x,
                y,
                width,
                height,
            })
        }
    }
}

impl Frame for DynamicImage {
    fn width(&self) -> u32 {
        DynamicImage::width(self)
    }

    fn height(&self) -> u32 {
        DynamicImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Result<Rgba<u8>, OutOfBounds> {
        self.check_bounds(x, y)?;
        Ok(GenericImageView::get_pixel(self, x, y))
    }
}

impl<P, C> Frame for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Result<Rgba<u8>, OutOfBounds> {
        self.check_bounds(x, y)?;
        Ok(self.get_pixel(x, y).to_rgba())
    }
}

/// Errors produced while loading a frame from disk or memory.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame file could not be read.
    #[error("failed to read frame: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a decodable image.
    #[error("failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),
}

/// Opens and decodes a frame, detecting the format from its contents.
pub fn open_frame(path: &Path) -> Result<DynamicImage, FrameError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?)
}
