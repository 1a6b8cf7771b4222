// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use thiserror::Error;

pub type GlResult<T> = Result<T, GlError>;

/// Failures coming out of the native collaborators.
///
/// The binding does not validate arguments and never retries: whatever the
/// window, GL or image layer reports is wrapped once and handed back.
#[derive(Error, Debug)]
pub enum GlError {
    #[error("GL context creation failed: {0}")]
    Context(String),
    #[error("GL load failed: {0}")]
    Load(String),
    #[error("texture allocation failed: {0}")]
    Texture(String),
    #[error("viewport has no height: {0}")]
    Viewport(String),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
