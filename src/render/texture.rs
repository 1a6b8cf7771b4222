// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use crate::error::{GlError, GlResult};
use crate::render::{
    gl::{Capability, GlApi, Primitive},
    renderer::Renderer,
    surface::{ImageLoader, PixelSurface, SurfaceLoader},
    texture_manager::TextureManager,
    window::GlWindow,
};
use crate::vector::Components;
use log::{debug, info, warn};
use std::cell::Cell;
use std::rc::Rc;

/// Angle in degrees a quad is turned around its rotation vector.
pub const QUAD_ROTATION_DEGREES: f64 = 1.0;

/// One GPU texture, uploaded from a decoded surface.
///
/// The handle is deleted at most once: by [`Texture::dispose`] or, failing
/// that, on drop. A texture that outlives its renderer does not delete
/// anything, since the handle went away with the context.
pub struct Texture<G: GlApi> {
    gl: Rc<G>,
    handle: G::Texture,
    size: [i32; 2],
    disposed: Cell<bool>,
}

impl<G: GlApi> Texture<G> {
    /// Uploads `surface` on the renderer's context. The new texture is left bound.
    pub fn new<W>(renderer: &Renderer<W>, surface: &impl PixelSurface) -> GlResult<Self>
    where
        W: GlWindow<Gl = G>,
    {
        Self::from_gl(renderer.gl().clone(), surface)
    }

    /// Uploads `surface`. A pixel buffer shorter than the surface's size and
    /// pitch call for is refused before anything is allocated.
    pub fn from_gl(gl: Rc<G>, surface: &impl PixelSurface) -> GlResult<Self> {
        let layout = surface.layout();
        surface
            .with_pixels(|pixels| layout.check(pixels.len()))
            .map_err(GlError::Texture)?;

        let handle = gl.create_texture().map_err(GlError::Texture)?;
        let texture = Self {
            gl,
            handle,
            size: [layout.width, layout.height],
            disposed: Cell::new(false),
        };
        texture.bind();

        let gl = &*texture.gl;
        gl.texture_filter_nearest();
        // map the surface to the texture in video memory, according to whether it has alpha
        surface
            .with_pixels(|pixels| gl.tex_image_2d(layout, pixels))
            .map_err(GlError::Texture)?;
        info!(
            "texture...w{} h{} {:?} pitch {}",
            layout.width, layout.height, layout.format, layout.pitch
        );

        Ok(texture)
    }

    /// Returns the cached texture for `file_name`, decoding and uploading it
    /// with the image crate on first use.
    pub fn create<W>(
        manager: &mut TextureManager<G>,
        renderer: &Renderer<W>,
        file_name: &str,
    ) -> GlResult<Rc<Self>>
    where
        W: GlWindow<Gl = G>,
    {
        Self::create_with(manager, renderer.gl(), file_name, &ImageLoader)
    }

    /// [`Texture::create`] over any decoder. The surface only lives until the
    /// upload is done.
    pub fn create_with<L: SurfaceLoader>(
        manager: &mut TextureManager<G>,
        gl: &Rc<G>,
        file_name: &str,
        loader: &L,
    ) -> GlResult<Rc<Self>> {
        // check if the texture has already been loaded
        if let Some(texture) = manager.get_texture_from_name(file_name) {
            debug!("texture cache hit {}", file_name);
            return Ok(texture);
        }

        let texture = {
            let surface = loader.load(file_name)?;
            Self::from_gl(gl.clone(), &surface)?
        };
        info!("texture load:{:?}", file_name);
        Ok(manager.add_texture(texture, file_name))
    }

    pub fn bind(&self) {
        self.gl.bind_texture(Some(self.handle));
    }

    /// Draws the texture as a quad of `size * scale` at `position`.
    ///
    /// `origin` is the pivot in texture pixels, scaled and subtracted from
    /// the position; `None` pins the quad's bottom-left corner to the
    /// position. Short slices read as zeros.
    pub fn draw(&self, position: &[f64], rotation: &[f64], scale: &[f64], origin: Option<&[i32]>) {
        let gl = &*self.gl;

        gl.enable(Capability::Texture2d);
        gl.push_matrix();

        self.bind();

        let draw_x = position.x() - scale.x() * f64::from(origin.x());
        let draw_y = position.y() - scale.y() * f64::from(origin.y());
        gl.translate(draw_x, draw_y, 0.0);

        gl.rotate(QUAD_ROTATION_DEGREES, rotation.x(), rotation.y(), rotation.z());

        let w = f64::from(self.size.x()) * scale.x();
        let h = f64::from(self.size.y()) * scale.y();
        gl.begin(Primitive::Quads);
        gl.tex_coord(1.0, 1.0);
        gl.vertex(w, h, 0.0); // top right
        gl.tex_coord(0.0, 1.0);
        gl.vertex(0.0, h, 0.0); // top left
        gl.tex_coord(0.0, 0.0);
        gl.vertex(0.0, 0.0, 0.0); // bottom left
        gl.tex_coord(1.0, 0.0);
        gl.vertex(w, 0.0, 0.0); // bottom right
        gl.end();

        gl.pop_matrix();

        gl.disable(Capability::Texture2d);
    }

    /// Deletes the GPU handle. Later calls do nothing.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if self.gl.is_released() {
            warn!("texture {:?} outlived its context, not deleted", self.handle);
            return;
        }
        self.gl.delete_texture(self.handle);
        debug!("texture {:?} released", self.handle);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn handle(&self) -> G::Texture {
        self.handle
    }

    pub fn size(&self) -> [i32; 2] {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size[0]
    }

    pub fn height(&self) -> i32 {
        self.size[1]
    }
}

impl<G: GlApi> Drop for Texture<G> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::gl::{GlVersion, PixelFormat, PixelLayout};
    use crate::render::mock::{GlCall, MockGl, MockWindow};
    use crate::render::surface::ImageSurface;

    fn rgb_surface(w: u32, h: u32) -> ImageSurface {
        ImageSurface::from_rgb(w, h, vec![0; (w * h * 3) as usize])
    }

    struct CountingLoader {
        loads: Cell<u32>,
    }

    impl SurfaceLoader for CountingLoader {
        type Surface = ImageSurface;

        fn load(&self, path: &str) -> GlResult<ImageSurface> {
            self.loads.set(self.loads.get() + 1);
            if path.ends_with(".png") {
                Ok(ImageSurface::from_rgba(2, 2, vec![255; 16]))
            } else {
                Err(GlError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    path.to_string(),
                )))
            }
        }
    }

    #[test]
    fn upload_sequence_for_rgb_surface() {
        let gl = Rc::new(MockGl::default());
        let tex = Texture::from_gl(gl.clone(), &rgb_surface(4, 2)).unwrap();
        assert_eq!(tex.size(), [4, 2]);
        assert_eq!(
            gl.calls(),
            vec![
                GlCall::CreateTexture(1),
                GlCall::BindTexture(Some(1)),
                GlCall::NearestFilter,
                GlCall::TexImage2d(PixelLayout::packed(PixelFormat::Rgb, 4, 2), 24),
            ]
        );
    }

    #[test]
    fn alpha_surface_uploads_rgba() {
        let gl = Rc::new(MockGl::default());
        let surface = ImageSurface::from_rgba(1, 1, vec![1, 2, 3, 4]);
        let _tex = Texture::from_gl(gl.clone(), &surface).unwrap();
        assert_eq!(
            gl.count(|c| *c == GlCall::TexImage2d(PixelLayout::packed(PixelFormat::Rgba, 1, 1), 4)),
            1
        );
    }

    #[test]
    fn allocation_failure_propagates() {
        let gl = Rc::new(MockGl::default());
        gl.fail_textures.set(true);
        let err = Texture::from_gl(gl.clone(), &rgb_surface(1, 1)).err();
        assert!(matches!(err, Some(GlError::Texture(_))));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn short_pixel_buffer_is_refused() {
        let gl = Rc::new(MockGl::default());
        let err = Texture::from_gl(gl.clone(), &ImageSurface::from_rgb(100, 100, vec![])).err();
        assert!(matches!(err, Some(GlError::Texture(_))));
        // nothing allocated, nothing uploaded
        assert!(gl.calls().is_empty());

        let one_short = ImageSurface::from_rgba(2, 2, vec![0; 15]);
        assert!(Texture::from_gl(gl.clone(), &one_short).is_err());
        assert!(gl.calls().is_empty());
    }

    /// Rows padded to a 4 byte pitch, as SDL hands them out.
    struct PaddedSurface {
        pixels: Vec<u8>,
    }

    impl PixelSurface for PaddedSurface {
        fn size(&self) -> [i32; 2] {
            [5, 2]
        }

        fn alpha_mask(&self) -> u32 {
            0
        }

        fn with_pixels<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
            f(&self.pixels)
        }

        fn pitch(&self) -> usize {
            16
        }
    }

    #[test]
    fn padded_rows_upload_with_their_pitch() {
        let gl = Rc::new(MockGl::default());
        let surface = PaddedSurface { pixels: vec![7; 32] };
        let tex = Texture::from_gl(gl.clone(), &surface).unwrap();
        assert_eq!(tex.size(), [5, 2]);
        let layout = PixelLayout {
            format: PixelFormat::Rgb,
            width: 5,
            height: 2,
            pitch: 16,
        };
        assert_eq!(gl.count(|c| *c == GlCall::TexImage2d(layout, 32)), 1);
        assert_eq!(layout.unpack_alignment(), Some(4));
    }

    #[test]
    fn padded_rows_missing_the_last_row_are_refused() {
        let gl = Rc::new(MockGl::default());
        let surface = PaddedSurface { pixels: vec![7; 20] };
        assert!(Texture::from_gl(gl.clone(), &surface).is_err());
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn texture_outliving_its_context_skips_delete() {
        let gl = Rc::new(MockGl::default());
        let tex = Texture::from_gl(gl.clone(), &rgb_surface(1, 1)).unwrap();
        gl.release();
        drop(tex);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteTexture(_))), 0);
    }

    #[test]
    fn texture_dropped_after_renderer_dispose_skips_delete() {
        let mut renderer = Renderer::new(MockWindow::new(64, 64), GlVersion::V3_3, 32).unwrap();
        let tex = Texture::new(&renderer, &rgb_surface(2, 2)).unwrap();
        renderer.dispose();
        let gl = renderer.gl().clone();
        drop(renderer);
        drop(tex);
        assert!(tex_deletes(&gl).is_empty());
    }

    fn tex_deletes(gl: &MockGl) -> Vec<GlCall> {
        gl.calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::DeleteTexture(_)))
            .collect()
    }

    #[test]
    fn dispose_is_idempotent() {
        let gl = Rc::new(MockGl::default());
        let tex = Texture::from_gl(gl.clone(), &rgb_surface(1, 1)).unwrap();
        tex.dispose();
        tex.dispose();
        assert!(tex.is_disposed());
        drop(tex);
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteTexture(1))), 1);
    }

    #[test]
    fn drop_releases_undisposed_texture() {
        let gl = Rc::new(MockGl::default());
        {
            let _tex = Texture::from_gl(gl.clone(), &rgb_surface(1, 1)).unwrap();
        }
        assert_eq!(gl.count(|c| matches!(c, GlCall::DeleteTexture(_))), 1);
    }

    #[test]
    fn draw_offsets_by_scaled_origin() {
        let gl = Rc::new(MockGl::default());
        let tex = Texture::from_gl(gl.clone(), &rgb_surface(16, 8)).unwrap();
        gl.reset();

        tex.draw(&[10.0, 20.0], &[0.0, 0.0, 1.0], &[2.0, 3.0], Some(&[1, 2]));
        assert_eq!(
            gl.calls(),
            vec![
                GlCall::Enable(Capability::Texture2d),
                GlCall::PushMatrix,
                GlCall::BindTexture(Some(1)),
                GlCall::Translate(8.0, 14.0, 0.0),
                GlCall::Rotate(QUAD_ROTATION_DEGREES, 0.0, 0.0, 1.0),
                GlCall::Begin(Primitive::Quads),
                GlCall::TexCoord(1.0, 1.0),
                GlCall::Vertex(32.0, 24.0, 0.0),
                GlCall::TexCoord(0.0, 1.0),
                GlCall::Vertex(0.0, 24.0, 0.0),
                GlCall::TexCoord(0.0, 0.0),
                GlCall::Vertex(0.0, 0.0, 0.0),
                GlCall::TexCoord(1.0, 0.0),
                GlCall::Vertex(32.0, 0.0, 0.0),
                GlCall::End,
                GlCall::PopMatrix,
                GlCall::Disable(Capability::Texture2d),
            ]
        );
    }

    #[test]
    fn draw_with_empty_inputs_falls_back_to_zero() {
        let gl = Rc::new(MockGl::default());
        let tex = Texture::from_gl(gl.clone(), &rgb_surface(16, 8)).unwrap();
        gl.reset();

        tex.draw(&[], &[], &[], None);
        let calls = gl.calls();
        assert!(calls.contains(&GlCall::Translate(0.0, 0.0, 0.0)));
        assert!(calls.contains(&GlCall::Rotate(QUAD_ROTATION_DEGREES, 0.0, 0.0, 0.0)));
        // zero scale collapses the quad onto the origin
        assert_eq!(
            gl.count(|c| matches!(c, GlCall::Vertex(x, y, _) if *x == 0.0 && *y == 0.0)),
            4
        );
    }

    #[test]
    fn cache_loads_each_path_once() {
        let gl = Rc::new(MockGl::default());
        let mut manager = TextureManager::new();
        let loader = CountingLoader { loads: Cell::new(0) };

        let a = Texture::create_with(&mut manager, &gl, "assets/a.png", &loader).unwrap();
        let b = Texture::create_with(&mut manager, &gl, "assets/a.png", &loader).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(loader.loads.get(), 1);
        assert_eq!(gl.count(|c| matches!(c, GlCall::TexImage2d(..))), 1);

        let c = Texture::create_with(&mut manager, &gl, "assets/c.png", &loader).unwrap();
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn create_decodes_png_once_through_image_crate() {
        let path = std::env::temp_dir().join(format!(
            "rust_pixel_gl_texture_{}.png",
            std::process::id()
        ));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let name = path.to_string_lossy().to_string();

        let renderer = Renderer::new(MockWindow::new(64, 64), GlVersion::V3_3, 32).unwrap();
        let mut manager = TextureManager::new();
        let a = Texture::create(&mut manager, &renderer, &name).unwrap();
        let b = Texture::create(&mut manager, &renderer, &name).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.size(), [3, 2]);
        assert_eq!(
            renderer.gl().count(|c| *c
                == GlCall::TexImage2d(PixelLayout::packed(PixelFormat::Rgba, 3, 2), 24)),
            1
        );
        assert_eq!(manager.len(), 1);
        drop((a, b));
        manager.clear();
    }

    #[test]
    fn failed_decode_is_not_cached() {
        let gl = Rc::new(MockGl::default());
        let mut manager = TextureManager::new();
        let loader = CountingLoader { loads: Cell::new(0) };

        assert!(Texture::create_with(&mut manager, &gl, "missing.bmp", &loader).is_err());
        assert!(Texture::create_with(&mut manager, &gl, "missing.bmp", &loader).is_err());
        assert_eq!(loader.loads.get(), 2);
        assert!(manager.is_empty());
        assert!(gl.calls().is_empty());
    }
}
