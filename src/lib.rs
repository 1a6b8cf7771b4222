// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! rust_pixel_gl binds an SDL2 window to an OpenGL rendering context.
//!
//! It creates the context, loads image files into GPU textures (at most once
//! per path through [`TextureManager`]), draws textured quads and colored or
//! textured cubes, and sets up split-screen viewports with a perspective
//! projection.
//!
//! The heavy lifting stays with the native collaborators: SDL2 owns the window
//! and the context, OpenGL (through glow) owns rasterization, and the image
//! crate or SDL_image owns decoding. The binding only does coordinate
//! bookkeeping on top of them.
//!
//! # Example
//!
//! ```ignore
//! let window = SdlWindow::new(&video, "cube", 800, 600)?;
//! let mut renderer = Renderer::new(window, GlVersion::V3_3, 32)?;
//! let mut textures = TextureManager::new();
//! let crate_tex = Texture::create(&mut textures, &renderer, "assets/crate.png")?;
//!
//! renderer.set_viewport(Viewport::Full, 90, 0.1, 100.0)?;
//! renderer.clear();
//! renderer.draw_cube([1.0, 1.0, 1.0], [255, 0, 0, 255]);
//! renderer.draw_cube_textured([0.5, 0.5, 0.5], Some(&crate_tex));
//! renderer.draw();
//! ```
//!
//! Everything here is single threaded: textures and the renderer share the GL
//! function table through `Rc`, so none of these types is `Send`.

pub mod config;
pub mod error;
pub mod log;
pub mod render;
pub mod vector;

pub use config::{get_render_config, init_render_config, RenderConfig};
pub use error::{GlError, GlResult};
pub use render::{
    cube::Face,
    gl::{GlApi, GlVersion},
    renderer::Renderer,
    surface::{ImageLoader, ImageSurface, PixelSurface, SurfaceLoader},
    texture::Texture,
    texture_manager::TextureManager,
    viewport::{Viewport, ViewportRegion},
    window::GlWindow,
};
#[cfg(sdl_backend)]
pub use render::adapter::sdl::{SdlImageLoader, SdlWindow};
pub use vector::{distance, Components, Rgba};
