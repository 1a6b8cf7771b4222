// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # OpenGL call surface
//!
//! [`GlApi`] is everything the binding asks of the graphics library: texture
//! objects, a few pieces of global state, the matrix stacks and immediate-mode
//! primitive submission. Raw `GLenum`s stay inside the backend; callers see
//! the small typed enums below.
//!
//! ## Submodules
//! - `immediate`: [`immediate::GlowGl`], the glow-backed implementation
//! - `shader`: shader compile/link helper used by the backend
//! - `shader_source`: GLSL for the immediate-mode batch

use bitflags::bitflags;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub mod immediate;
pub mod shader;
pub mod shader_source;

/// Pixel layout of an uploaded image, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn gl_enum(self) -> u32 {
        match self {
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Where the rows of an upload sit in the pixel buffer.
///
/// `pitch` is the distance in bytes between the starts of two rows. It is at
/// least `width * bytes_per_pixel`; SDL surfaces pad it to 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub format: PixelFormat,
    pub width: i32,
    pub height: i32,
    pub pitch: usize,
}

impl PixelLayout {
    /// A layout without row padding.
    pub fn packed(format: PixelFormat, width: i32, height: i32) -> Self {
        Self {
            format,
            width,
            height,
            pitch: width.max(0) as usize * format.bytes_per_pixel(),
        }
    }

    /// Bytes of pixel data in one row, padding excluded.
    pub fn row_bytes(&self) -> usize {
        self.width.max(0) as usize * self.format.bytes_per_pixel()
    }

    /// Bytes GL reads from the buffer: every row but the last at full pitch.
    pub fn required_len(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.pitch * (self.height as usize - 1) + self.row_bytes()
    }

    /// Refuses layouts GL would read past the end of `len` bytes for.
    pub fn check(&self, len: usize) -> Result<(), String> {
        if self.width < 0 || self.height < 0 {
            return Err(format!("negative texture size {}x{}", self.width, self.height));
        }
        if self.pitch < self.row_bytes() {
            return Err(format!(
                "pitch {} shorter than a {:?} row of {} pixels",
                self.pitch, self.format, self.width
            ));
        }
        let need = self.required_len();
        if len < need {
            return Err(format!(
                "{}x{} {:?} needs {} bytes, got {}",
                self.width, self.height, self.format, need, len
            ));
        }
        Ok(())
    }

    /// `UNPACK_ALIGNMENT` that makes GL step rows by exactly `pitch`, if any.
    pub fn unpack_alignment(&self) -> Option<i32> {
        let row = self.row_bytes();
        [1usize, 2, 4, 8]
            .into_iter()
            .find(|a| row.div_ceil(*a) * a == self.pitch)
            .map(|a| a as i32)
    }

    /// Copies the rows out without padding. `pixels` must have passed
    /// [`PixelLayout::check`].
    pub fn pack(&self, pixels: &[u8]) -> Vec<u8> {
        let row = self.row_bytes();
        let mut out = Vec::with_capacity(row * self.height.max(0) as usize);
        for y in 0..self.height.max(0) as usize {
            let start = y * self.pitch;
            out.extend_from_slice(&pixels[start..start + row]);
        }
        out
    }
}

/// Server-side capabilities toggled with enable/disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Texture2d,
    DepthTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMode {
    Projection,
    ModelView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Quads,
    Triangles,
}

impl Primitive {
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Primitive::Quads => 4,
            Primitive::Triangles => 3,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = glow::COLOR_BUFFER_BIT;
        const DEPTH = glow::DEPTH_BUFFER_BIT;
    }
}

/// The graphics collaborator.
///
/// Methods take `&self` like glow's `HasContext`, so one table can be shared
/// (through `Rc`) by the renderer and every texture created on it. Nothing
/// here validates its arguments except the pixel upload, which refuses
/// buffers shorter than its layout: values go straight to the driver.
pub trait GlApi {
    type Texture: Copy + fmt::Debug + PartialEq;

    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn bind_texture(&self, texture: Option<Self::Texture>);
    fn delete_texture(&self, texture: Self::Texture);
    /// NEAREST minification and magnification on the bound texture.
    fn texture_filter_nearest(&self);
    /// Uploads `pixels`, laid out as `layout` says, into the bound 2D
    /// texture, level 0. Fails without touching GL when `pixels` is too short.
    fn tex_image_2d(&self, layout: PixelLayout, pixels: &[u8]) -> Result<(), String>;

    fn enable(&self, cap: Capability);
    fn disable(&self, cap: Capability);
    fn clear(&self, mask: ClearFlags);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    fn matrix_mode(&self, mode: MatrixMode);
    fn load_identity(&self);
    /// Multiplies the current matrix by a perspective projection, fovy in degrees.
    fn perspective(&self, fovy: f64, aspect: f64, near: f64, far: f64);
    fn push_matrix(&self);
    fn pop_matrix(&self);
    fn translate(&self, x: f64, y: f64, z: f64);
    /// Rotates `angle` degrees around the axis (x, y, z).
    fn rotate(&self, angle: f64, x: f64, y: f64, z: f64);

    fn begin(&self, mode: Primitive);
    fn end(&self);
    fn vertex(&self, x: f64, y: f64, z: f64);
    fn tex_coord(&self, s: f64, t: f64);
    fn color(&self, r: u8, g: u8, b: u8, a: u8);

    /// Marks the table dead; the renderer calls this while its context is
    /// still current, right before dropping it.
    fn release(&self);
    /// True once [`GlApi::release`] ran. Texture deletes are skipped then.
    fn is_released(&self) -> bool;
}

/// OpenGL context versions the immediate-mode backend can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum GlVersion {
    V3_3,
    V4_0,
    V4_1,
    V4_2,
    V4_3,
    V4_4,
    V4_5,
    V4_6,
}

impl GlVersion {
    pub const ALL: [GlVersion; 8] = [
        GlVersion::V3_3,
        GlVersion::V4_0,
        GlVersion::V4_1,
        GlVersion::V4_2,
        GlVersion::V4_3,
        GlVersion::V4_4,
        GlVersion::V4_5,
        GlVersion::V4_6,
    ];

    pub fn major(self) -> u8 {
        match self {
            GlVersion::V3_3 => 3,
            _ => 4,
        }
    }

    pub fn minor(self) -> u8 {
        match self {
            GlVersion::V3_3 => 3,
            GlVersion::V4_0 => 0,
            GlVersion::V4_1 => 1,
            GlVersion::V4_2 => 2,
            GlVersion::V4_3 => 3,
            GlVersion::V4_4 => 4,
            GlVersion::V4_5 => 5,
            GlVersion::V4_6 => 6,
        }
    }

    /// `#version` line for shaders compiled on a context of this version.
    pub fn glsl_header(self) -> String {
        format!("#version {}{}0 core", self.major(), self.minor())
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        GlVersion::V3_3
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

impl FromStr for GlVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlVersion::ALL
            .iter()
            .copied()
            .find(|v| v.to_string() == s.trim())
            .ok_or_else(|| format!("unsupported OpenGL version {:?}", s))
    }
}

impl TryFrom<String> for GlVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
