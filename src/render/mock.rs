// RustPixel
// copyright zipxing@hotmail.com 2022～2025

// Recording stand-ins for the GL and window collaborators, test builds only.

use crate::error::{GlError, GlResult};
use crate::render::gl::{
    Capability, ClearFlags, GlApi, GlVersion, MatrixMode, PixelLayout, Primitive,
};
use crate::render::window::GlWindow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateTexture(u32),
    BindTexture(Option<u32>),
    DeleteTexture(u32),
    NearestFilter,
    /// Layout and the length of the pixel slice handed over.
    TexImage2d(PixelLayout, usize),
    Enable(Capability),
    Disable(Capability),
    Clear(ClearFlags),
    Viewport(i32, i32, i32, i32),
    MatrixMode(MatrixMode),
    LoadIdentity,
    Perspective(f64, f64, f64, f64),
    PushMatrix,
    PopMatrix,
    Translate(f64, f64, f64),
    Rotate(f64, f64, f64, f64),
    Begin(Primitive),
    End,
    Vertex(f64, f64, f64),
    TexCoord(f64, f64),
    Color(u8, u8, u8, u8),
    Release,
}

#[derive(Default)]
pub struct MockGl {
    pub calls: RefCell<Vec<GlCall>>,
    next_id: Cell<u32>,
    pub fail_textures: Cell<bool>,
    released: Cell<bool>,
}

impl MockGl {
    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl GlApi for MockGl {
    type Texture = u32;

    fn create_texture(&self) -> Result<u32, String> {
        if self.fail_textures.get() {
            return Err("out of texture names".to_string());
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.record(GlCall::CreateTexture(id));
        Ok(id)
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.record(GlCall::BindTexture(texture));
    }

    fn delete_texture(&self, texture: u32) {
        self.record(GlCall::DeleteTexture(texture));
    }

    fn texture_filter_nearest(&self) {
        self.record(GlCall::NearestFilter);
    }

    fn tex_image_2d(&self, layout: PixelLayout, pixels: &[u8]) -> Result<(), String> {
        layout.check(pixels.len())?;
        self.record(GlCall::TexImage2d(layout, pixels.len()));
        Ok(())
    }

    fn enable(&self, cap: Capability) {
        self.record(GlCall::Enable(cap));
    }

    fn disable(&self, cap: Capability) {
        self.record(GlCall::Disable(cap));
    }

    fn clear(&self, mask: ClearFlags) {
        self.record(GlCall::Clear(mask));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn matrix_mode(&self, mode: MatrixMode) {
        self.record(GlCall::MatrixMode(mode));
    }

    fn load_identity(&self) {
        self.record(GlCall::LoadIdentity);
    }

    fn perspective(&self, fovy: f64, aspect: f64, near: f64, far: f64) {
        self.record(GlCall::Perspective(fovy, aspect, near, far));
    }

    fn push_matrix(&self) {
        self.record(GlCall::PushMatrix);
    }

    fn pop_matrix(&self) {
        self.record(GlCall::PopMatrix);
    }

    fn translate(&self, x: f64, y: f64, z: f64) {
        self.record(GlCall::Translate(x, y, z));
    }

    fn rotate(&self, angle: f64, x: f64, y: f64, z: f64) {
        self.record(GlCall::Rotate(angle, x, y, z));
    }

    fn begin(&self, mode: Primitive) {
        self.record(GlCall::Begin(mode));
    }

    fn end(&self) {
        self.record(GlCall::End);
    }

    fn vertex(&self, x: f64, y: f64, z: f64) {
        self.record(GlCall::Vertex(x, y, z));
    }

    fn tex_coord(&self, s: f64, t: f64) {
        self.record(GlCall::TexCoord(s, t));
    }

    fn color(&self, r: u8, g: u8, b: u8, a: u8) {
        self.record(GlCall::Color(r, g, b, a));
    }

    fn release(&self) {
        self.released.set(true);
        self.record(GlCall::Release);
    }

    fn is_released(&self) -> bool {
        self.released.get()
    }
}

/// Window side bookkeeping shared with the test body.
#[derive(Default)]
pub struct WindowLog {
    pub swaps: Cell<u32>,
    pub contexts_created: Cell<u32>,
    pub contexts_released: Cell<u32>,
    pub requested: RefCell<Option<(GlVersion, u8)>>,
}

pub struct MockContext {
    log: Rc<WindowLog>,
}

impl Drop for MockContext {
    fn drop(&mut self) {
        let released = &self.log.contexts_released;
        released.set(released.get() + 1);
    }
}

pub struct MockWindow {
    pub size: [i32; 2],
    pub log: Rc<WindowLog>,
    pub fail_context: bool,
}

impl MockWindow {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: [width, height],
            log: Rc::new(WindowLog::default()),
            fail_context: false,
        }
    }
}

impl GlWindow for MockWindow {
    type Context = MockContext;
    type Gl = MockGl;

    fn size(&self) -> [i32; 2] {
        self.size
    }

    fn create_context(&self, version: GlVersion, bit_depth: u8) -> GlResult<MockContext> {
        if self.fail_context {
            return Err(GlError::Context("no GL visual".to_string()));
        }
        *self.log.requested.borrow_mut() = Some((version, bit_depth));
        let created = &self.log.contexts_created;
        created.set(created.get() + 1);
        Ok(MockContext {
            log: self.log.clone(),
        })
    }

    fn load_gl(
        &self,
        _context: &MockContext,
        _version: GlVersion,
        _size: [i32; 2],
        _bit_depth: u8,
    ) -> GlResult<MockGl> {
        Ok(MockGl::default())
    }

    fn swap(&self) {
        let swaps = &self.log.swaps;
        swaps.set(swaps.get() + 1);
    }
}

pub fn is_vertex(call: &GlCall) -> bool {
    matches!(call, GlCall::Vertex(..))
}
