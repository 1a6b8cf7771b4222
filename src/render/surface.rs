// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Decoded images waiting to be uploaded.
//!
//! A surface only has to say how big it is, whether it carries alpha (the
//! alpha mask of its pixel format, 0 meaning none) and hand out its bytes.
//! Decoding itself is left to the image crate or SDL_image.

use crate::error::GlResult;
use crate::render::gl::{PixelFormat, PixelLayout};
use image::DynamicImage;
use log::info;
use std::path::Path;

/// RGBA8888 alpha mask in little-endian byte order.
pub const RGBA_ALPHA_MASK: u32 = 0xff00_0000;

pub trait PixelSurface {
    /// `[width, height]` in pixels.
    fn size(&self) -> [i32; 2];

    /// Alpha bits of the pixel format; 0 when there is no alpha channel.
    fn alpha_mask(&self) -> u32;

    /// Runs `f` over the raw pixel bytes.
    fn with_pixels<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R;

    /// Bytes from the start of one row to the next. Packed rows by default.
    fn pitch(&self) -> usize {
        self.size()[0].max(0) as usize * self.upload_format().bytes_per_pixel()
    }

    fn has_alpha(&self) -> bool {
        self.alpha_mask() != 0
    }

    /// RGB without alpha, RGBA with it.
    fn upload_format(&self) -> PixelFormat {
        if self.has_alpha() {
            PixelFormat::Rgba
        } else {
            PixelFormat::Rgb
        }
    }

    fn layout(&self) -> PixelLayout {
        let [width, height] = self.size();
        PixelLayout {
            format: self.upload_format(),
            width,
            height,
            pitch: self.pitch(),
        }
    }
}

/// Decodes a file into a transient surface.
pub trait SurfaceLoader {
    type Surface: PixelSurface;

    fn load(&self, path: &str) -> GlResult<Self::Surface>;
}

/// Tightly packed RGB or RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSurface {
    pub width: u32,
    pub height: u32,
    pub alpha_mask: u32,
    pub pixels: Vec<u8>,
}

impl ImageSurface {
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            alpha_mask: 0,
            pixels,
        }
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            alpha_mask: RGBA_ALPHA_MASK,
            pixels,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> GlResult<Self> {
        let img = image::open(path.as_ref())?;
        let surface = Self::from(img);
        info!(
            "image decoded {:?} w{} h{} alpha={}",
            path.as_ref(),
            surface.width,
            surface.height,
            surface.has_alpha()
        );
        Ok(surface)
    }
}

impl From<DynamicImage> for ImageSurface {
    fn from(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        if img.color().has_alpha() {
            Self::from_rgba(width, height, img.to_rgba8().into_raw())
        } else {
            Self::from_rgb(width, height, img.to_rgb8().into_raw())
        }
    }
}

impl PixelSurface for ImageSurface {
    fn size(&self) -> [i32; 2] {
        [self.width as i32, self.height as i32]
    }

    fn alpha_mask(&self) -> u32 {
        self.alpha_mask
    }

    fn with_pixels<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.pixels)
    }
}

/// Decodes with the image crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader;

impl SurfaceLoader for ImageLoader {
    type Surface = ImageSurface;

    fn load(&self, path: &str) -> GlResult<ImageSurface> {
        ImageSurface::open(path)
    }
}
