// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use crate::error::GlResult;
use crate::render::gl::{GlApi, GlVersion};

/// The windowing collaborator a [`Renderer`](crate::Renderer) is bound to.
///
/// Releasing the rendering context is dropping `Context`: for SDL that is
/// `SDL_GL_DeleteContext`.
pub trait GlWindow {
    type Context;
    type Gl: GlApi;

    /// Drawable size in pixels, `[width, height]`.
    fn size(&self) -> [i32; 2];

    /// Creates a context for this window and makes it current.
    fn create_context(&self, version: GlVersion, bit_depth: u8) -> GlResult<Self::Context>;

    /// Loads the GL function table against the current context.
    fn load_gl(
        &self,
        context: &Self::Context,
        version: GlVersion,
        size: [i32; 2],
        bit_depth: u8,
    ) -> GlResult<Self::Gl>;

    /// Presents the back buffer.
    fn swap(&self);
}
