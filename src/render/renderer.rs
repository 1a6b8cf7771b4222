// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Renderer owns the rendering context of one window.
//!
//! Per frame: `clear()`, draw calls, `draw()` to present. `set_viewport`
//! picks one of the split-screen regions and resets the projection for it.

use crate::error::{GlError, GlResult};
use crate::render::{
    cube::{Face, FACE_TEX_COORDS},
    gl::{Capability, ClearFlags, GlApi, GlVersion, MatrixMode, Primitive},
    texture::Texture,
    viewport::Viewport,
    window::GlWindow,
};
use crate::vector::Rgba;
use log::{debug, info};
use std::rc::Rc;

pub struct Renderer<W: GlWindow> {
    window: W,
    context: Option<W::Context>,
    gl: Rc<W::Gl>,
}

impl<W: GlWindow> Renderer<W> {
    /// Creates a context on `window` and loads GL against it.
    /// Whatever the window or driver reports on failure is returned as is.
    pub fn new(window: W, version: GlVersion, bit_depth: u8) -> GlResult<Self> {
        let context = window.create_context(version, bit_depth)?;
        let size = window.size();
        let gl = window.load_gl(&context, version, size, bit_depth)?;
        info!(
            "renderer ready: OpenGL {} {}x{} {}bpp",
            version, size[0], size[1], bit_depth
        );
        Ok(Self {
            window,
            context: Some(context),
            gl: Rc::new(gl),
        })
    }

    pub fn gl(&self) -> &Rc<W::Gl> {
        &self.gl
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_size(&self) -> [i32; 2] {
        self.window.size()
    }

    pub fn clear(&self) {
        self.gl.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
    }

    /// Presents the back buffer.
    pub fn draw(&self) {
        self.window.swap();
    }

    /// Scopes output to `viewport` and loads a perspective projection.
    ///
    /// The arithmetic is integral: the vertical angle is `fov / 2` and the
    /// aspect `width / height` of the region, both truncated (fov 45 on
    /// 800x600 gives 22 and 1). fov/near/far go to the driver unchecked.
    /// A region with no height is an error and leaves GL untouched.
    pub fn set_viewport(
        &self,
        viewport: Viewport,
        fov: i32,
        near: f64,
        far: f64,
    ) -> GlResult<()> {
        let region = viewport.region(self.window.size());
        let aspect = region.aspect().ok_or_else(|| {
            GlError::Viewport(format!("{:?} of {:?}", viewport, region.size))
        })?;

        let [x, y, w, h] = region.rect;
        self.gl.viewport(x, y, w, h);

        self.gl.matrix_mode(MatrixMode::Projection);
        self.gl.load_identity();

        // set perspective
        self.gl.perspective(f64::from(fov / 2), f64::from(aspect), near, far);
        Ok(())
    }

    /// Draws a box of half-extents `size` with every face in `color`.
    pub fn draw_cube(&self, size: impl AsRef<[f64]>, color: impl AsRef<[u8]>) {
        let color = color.as_ref();
        self.draw_cube_colors(size, &[color; 6]);
    }

    /// Draws a box of half-extents `size`, one RGBA color per face in
    /// top, bottom, front, back, left, right order. Missing colors draw black
    /// with zero alpha.
    pub fn draw_cube_colors<C: AsRef<[u8]>>(&self, size: impl AsRef<[f64]>, colors: &[C]) {
        let size = size.as_ref();
        let gl = &*self.gl;

        // begin drawing a quad
        gl.begin(Primitive::Quads);
        for face in Face::visible(size) {
            let color = colors.get(face.index()).map(|c| c.as_ref());
            gl.color(color.red(), color.green(), color.blue(), color.alpha());
            for [x, y, z] in face.corners(size) {
                gl.vertex(x, y, z);
            }
        }
        gl.end();
    }

    /// Draws a box of half-extents `size` with `texture` on every face.
    /// Does nothing at all without a texture.
    pub fn draw_cube_textured(&self, size: impl AsRef<[f64]>, texture: Option<&Texture<W::Gl>>) {
        // ensure we have a texture
        let Some(texture) = texture else {
            return;
        };
        let size = size.as_ref();
        let gl = &*self.gl;

        gl.enable(Capability::Texture2d);

        // bind the texture
        texture.bind();

        gl.begin(Primitive::Quads);
        for face in Face::visible(size) {
            for ([s, t], [x, y, z]) in FACE_TEX_COORDS.into_iter().zip(face.corners(size)) {
                gl.tex_coord(s, t);
                gl.vertex(x, y, z);
            }
        }
        gl.end();

        gl.disable(Capability::Texture2d);
    }

    /// Releases the rendering context. Later calls do nothing.
    pub fn dispose(&mut self) {
        if let Some(context) = self.context.take() {
            // still current here; textures check this before deleting
            self.gl.release();
            drop(context);
            debug!("rendering context released");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.context.is_none()
    }
}

impl<W: GlWindow> Drop for Renderer<W> {
    fn drop(&mut self) {
        self.dispose();
    }
}
