// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! SDL2 glue: the window/context side of a [`Renderer`](crate::Renderer),
//! plus SDL_image surfaces as a texture source.
//! GL itself goes through glow, loaded with `SDL_GL_GetProcAddress`.

use crate::error::{GlError, GlResult};
use crate::render::{
    gl::{immediate::GlowGl, GlApi, GlVersion},
    surface::{PixelSurface, SurfaceLoader},
    window::GlWindow,
};
use log::info;
use sdl2::{
    image::LoadSurface,
    pixels::PixelFormatEnum,
    surface::{Surface, SurfaceRef},
    video::{GLContext, GLProfile, Window},
    VideoSubsystem,
};

pub struct SdlWindow {
    window: Window,
}

impl SdlWindow {
    /// Opens a centered OpenGL-capable window.
    pub fn new(video: &VideoSubsystem, title: &str, width: u32, height: u32) -> GlResult<Self> {
        let window = video
            .window(title, width, height)
            .opengl()
            .position_centered()
            .build()
            .map_err(|e| GlError::Sdl(e.to_string()))?;
        Ok(Self { window })
    }

    /// Wraps a window built elsewhere. It must have been built with `.opengl()`.
    pub fn from_window(window: Window) -> Self {
        Self { window }
    }

    pub fn raw(&self) -> &Window {
        &self.window
    }
}

impl GlWindow for SdlWindow {
    type Context = GLContext;
    type Gl = GlowGl;

    fn size(&self) -> [i32; 2] {
        let (w, h) = self.window.drawable_size();
        [w as i32, h as i32]
    }

    fn create_context(&self, version: GlVersion, bit_depth: u8) -> GlResult<GLContext> {
        // Set OpenGL attributes
        let gl_attr = self.window.subsystem().gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(version.major(), version.minor());
        gl_attr.set_buffer_size(bit_depth);
        gl_attr.set_double_buffer(true);

        let context = self.window.gl_create_context().map_err(GlError::Context)?;
        self.window
            .gl_make_current(&context)
            .map_err(GlError::Context)?;
        info!("gl context created, OpenGL {} core", version);
        Ok(context)
    }

    fn load_gl(
        &self,
        _context: &GLContext,
        version: GlVersion,
        size: [i32; 2],
        bit_depth: u8,
    ) -> GlResult<GlowGl> {
        let video = self.window.subsystem();
        let gl = unsafe {
            glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _)
        };
        let gl = GlowGl::new(gl, version).map_err(GlError::Load)?;
        gl.viewport(0, 0, size[0], size[1]);
        info!("gl loaded...{}x{} {}bpp", size[0], size[1], bit_depth);
        Ok(gl)
    }

    fn swap(&self) {
        self.window.gl_swap_window();
    }
}

impl PixelSurface for Surface<'_> {
    fn size(&self) -> [i32; 2] {
        [self.width() as i32, self.height() as i32]
    }

    fn alpha_mask(&self) -> u32 {
        self.pixel_format_enum()
            .into_masks()
            .map(|m| m.amask)
            .unwrap_or(0)
    }

    fn with_pixels<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        self.with_lock(f)
    }

    fn pitch(&self) -> usize {
        SurfaceRef::pitch(self) as usize
    }
}

/// Decodes files through SDL_image (`IMG_Load`).
///
/// Whatever SDL_image returns (palettized, 16 bit, BGR...) is converted to
/// RGB24, or RGBA32 when the image carries alpha or a color key, so the
/// bytes match the upload format.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdlImageLoader;

impl SurfaceLoader for SdlImageLoader {
    type Surface = Surface<'static>;

    fn load(&self, path: &str) -> GlResult<Surface<'static>> {
        let decoded =
            Surface::from_file(path).map_err(|e| GlError::Sdl(format!("{}: {}", path, e)))?;
        let keyed = decoded.color_key().is_ok();
        let target = if PixelSurface::has_alpha(&decoded) || keyed {
            PixelFormatEnum::RGBA32
        } else {
            PixelFormatEnum::RGB24
        };
        decoded
            .convert_format(target)
            .map_err(|e| GlError::Sdl(format!("{}: {}", path, e)))
    }
}
