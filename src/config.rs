// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Render configuration.
//!
//! Loaded from a small TOML file and kept process-wide in a `OnceLock`, so
//! the window title, GL version and projection values are readable anywhere
//! without passing the struct around. Every key is optional.
//!
//! ```toml
//! title = "cube"
//! width = 1024
//! height = 768
//! gl_version = "4.1"
//! fov = 90
//! viewport = "TopLeft"
//! ```

use crate::error::GlResult;
use crate::render::{gl::GlVersion, viewport::Viewport};
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: GlVersion,
    /// Color buffer bits requested with the context.
    pub bit_depth: u8,
    /// Field of view in whole degrees; the projection uses half of it,
    /// truncated.
    pub fov: i32,
    pub near: f64,
    pub far: f64,
    pub viewport: Viewport,
    pub log_level: String,
    pub log_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "rust_pixel_gl".to_string(),
            width: 800,
            height: 600,
            gl_version: GlVersion::default(),
            bit_depth: 32,
            fov: 90,
            near: 0.1,
            far: 100.0,
            viewport: Viewport::Full,
            log_level: "info".to_string(),
            log_file: "log/rust_pixel_gl.log".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(text: &str) -> GlResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> GlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Global render configuration, set once at startup
pub static RENDER_CONFIG: OnceLock<RenderConfig> = OnceLock::new();

/// Installs `config` as the process-wide configuration.
/// Only the first call has an effect.
pub fn init_render_config(config: RenderConfig) {
    let _ = RENDER_CONFIG.set(config);
}

/// The installed configuration, or the defaults if none was installed.
pub fn get_render_config() -> &'static RenderConfig {
    RENDER_CONFIG.get_or_init(RenderConfig::default)
}
