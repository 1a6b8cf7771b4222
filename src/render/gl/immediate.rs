// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Immediate-mode drawing on a core-profile context.
//!
//! Core profiles dropped glBegin/glEnd and the matrix stacks, so `GlowGl`
//! keeps them on the CPU side: a projection and a modelview stack, the
//! current color / texcoord, and the vertices collected between `begin` and
//! `end`. `end` flushes the batch through a single program with
//! `mvp = projection * modelview`. Quads are split into two triangles each.
//!
//! Vertex layout (9 floats): position xyz, texcoord st, color rgba.

use crate::render::gl::{
    shader::GlShader,
    shader_source::{IMMEDIATE_FRAGMENT_SRC, IMMEDIATE_VERTEX_SRC},
    Capability, ClearFlags, GlApi, GlVersion, MatrixMode, PixelLayout, Primitive,
};
use glam::{DMat4, DVec3};
use glow::HasContext;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};

const FLOATS_PER_VERTEX: usize = 9;
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// CPU mirror of the fixed-function state.
#[derive(Debug, Clone)]
pub struct ImmediateState {
    pub mode: MatrixMode,
    pub projection: Vec<DMat4>,
    pub modelview: Vec<DMat4>,
    pub primitive: Option<Primitive>,
    pub vertices: Vec<f32>,
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub texture_2d: bool,
}

impl Default for ImmediateState {
    fn default() -> Self {
        Self {
            mode: MatrixMode::ModelView,
            projection: vec![DMat4::IDENTITY],
            modelview: vec![DMat4::IDENTITY],
            primitive: None,
            vertices: vec![],
            color: [1.0, 1.0, 1.0, 1.0],
            tex_coord: [0.0, 0.0],
            texture_2d: false,
        }
    }
}

impl ImmediateState {
    fn stack_mut(&mut self) -> &mut Vec<DMat4> {
        match self.mode {
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::ModelView => &mut self.modelview,
        }
    }

    /// Top of the active stack; stacks are never empty.
    pub fn current_mut(&mut self) -> &mut DMat4 {
        let stack = self.stack_mut();
        let last = stack.len() - 1;
        &mut stack[last]
    }

    pub fn mvp(&self) -> DMat4 {
        let p = self.projection.last().copied().unwrap_or(DMat4::IDENTITY);
        let m = self.modelview.last().copied().unwrap_or(DMat4::IDENTITY);
        p * m
    }

    pub fn push(&mut self) {
        let top = *self.current_mut();
        self.stack_mut().push(top);
    }

    /// Popping the last matrix is a stack underflow; GL ignores it, so do we.
    pub fn pop(&mut self) {
        let stack = self.stack_mut();
        if stack.len() > 1 {
            stack.pop();
        } else {
            warn!("matrix stack underflow ignored");
        }
    }

    pub fn multiply(&mut self, m: DMat4) {
        let top = self.current_mut();
        *top = *top * m;
    }

    pub fn rotate(&mut self, angle: f64, x: f64, y: f64, z: f64) {
        let axis = DVec3::new(x, y, z);
        // a zero axis has no direction to rotate around
        if axis.length_squared() == 0.0 {
            return;
        }
        self.multiply(DMat4::from_axis_angle(axis.normalize(), angle.to_radians()));
    }

    pub fn push_vertex(&mut self, x: f64, y: f64, z: f64) {
        self.vertices
            .extend_from_slice(&[x as f32, y as f32, z as f32]);
        self.vertices.extend_from_slice(&self.tex_coord);
        self.vertices.extend_from_slice(&self.color);
    }

    /// Drains the batch into triangle-list order.
    pub fn take_triangles(&mut self) -> Vec<f32> {
        let verts = std::mem::take(&mut self.vertices);
        match self.primitive.take() {
            Some(Primitive::Quads) => {
                let quad_len = FLOATS_PER_VERTEX * Primitive::Quads.vertices_per_primitive();
                let mut out = Vec::with_capacity(verts.len() / 4 * 6);
                // an incomplete trailing quad is dropped, as GL does
                for quad in verts.chunks_exact(quad_len) {
                    for i in QUAD_TRIANGLES {
                        out.extend_from_slice(
                            &quad[i * FLOATS_PER_VERTEX..(i + 1) * FLOATS_PER_VERTEX],
                        );
                    }
                }
                out
            }
            Some(Primitive::Triangles) => {
                let tri_len = FLOATS_PER_VERTEX * Primitive::Triangles.vertices_per_primitive();
                let keep = verts.len() / tri_len * tri_len;
                verts[..keep].to_vec()
            }
            None => vec![],
        }
    }
}

/// glow-backed [`GlApi`].
///
/// The program, VAO and VBO are deleted by [`GlApi::release`], which the
/// renderer calls while its context is still current. There is no Drop impl
/// issuing GL calls after the context is gone.
pub struct GlowGl {
    pub gl: glow::Context,
    shader: GlShader,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    mvp_loc: Option<glow::UniformLocation>,
    use_texture_loc: Option<glow::UniformLocation>,
    texture_loc: Option<glow::UniformLocation>,
    state: RefCell<ImmediateState>,
    released: Cell<bool>,
}

impl GlowGl {
    pub fn new(gl: glow::Context, version: GlVersion) -> Result<Self, String> {
        let shader = GlShader::new(
            &gl,
            &version.glsl_header(),
            IMMEDIATE_VERTEX_SRC,
            IMMEDIATE_FRAGMENT_SRC,
        )?;

        let (vao, vbo) = unsafe {
            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));
            let vbo = gl.create_buffer()?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));

            let stride = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 12);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 4, glow::FLOAT, false, stride, 20);

            gl.bind_vertex_array(None);
            (vao, vbo)
        };

        let mvp_loc = shader.uniform_location(&gl, "mvp");
        let use_texture_loc = shader.uniform_location(&gl, "useTexture");
        let texture_loc = shader.uniform_location(&gl, "texture1");
        info!("immediate-mode program ready, GLSL {}", version.glsl_header());

        Ok(Self {
            gl,
            shader,
            vao,
            vbo,
            mvp_loc,
            use_texture_loc,
            texture_loc,
            state: RefCell::new(ImmediateState::default()),
            released: Cell::new(false),
        })
    }

    fn capability(cap: Capability) -> Option<u32> {
        match cap {
            // not a core-profile capability, tracked in ImmediateState
            Capability::Texture2d => None,
            Capability::DepthTest => Some(glow::DEPTH_TEST),
        }
    }

    fn flush(&self) {
        let (triangles, mvp, texture_2d) = {
            let mut st = self.state.borrow_mut();
            let tris = st.take_triangles();
            (tris, st.mvp(), st.texture_2d)
        };
        if triangles.is_empty() {
            return;
        }
        let count = (triangles.len() / FLOATS_PER_VERTEX) as i32;
        let gl = &self.gl;
        self.shader.bind(gl);
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&triangles[..]),
                glow::STREAM_DRAW,
            );
            gl.uniform_matrix_4_f32_slice(
                self.mvp_loc.as_ref(),
                false,
                &mvp.as_mat4().to_cols_array(),
            );
            gl.uniform_1_i32(self.use_texture_loc.as_ref(), texture_2d as i32);
            gl.uniform_1_i32(self.texture_loc.as_ref(), 0);
            gl.draw_arrays(glow::TRIANGLES, 0, count);
            gl.bind_vertex_array(None);
        }
        debug!("flushed {} vertices", count);
    }
}

impl GlApi for GlowGl {
    type Texture = glow::Texture;

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0);
            self.gl.bind_texture(glow::TEXTURE_2D, texture);
        }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn texture_filter_nearest(&self) {
        unsafe {
            let nearest = glow::NEAREST as i32;
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, nearest);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, nearest);
        }
    }

    fn tex_image_2d(&self, layout: PixelLayout, pixels: &[u8]) -> Result<(), String> {
        layout.check(pixels.len())?;
        // rows GL cannot step over with an alignment are repacked first
        let (align, packed) = match layout.unpack_alignment() {
            Some(align) => (align, None),
            None => (1, Some(layout.pack(pixels))),
        };
        let format = layout.format.gl_enum();
        unsafe {
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, align);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                layout.width,
                layout.height,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(packed.as_deref().unwrap_or(pixels)),
            );
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
        }
        Ok(())
    }

    fn enable(&self, cap: Capability) {
        match Self::capability(cap) {
            Some(c) => unsafe { self.gl.enable(c) },
            None => self.state.borrow_mut().texture_2d = true,
        }
    }

    fn disable(&self, cap: Capability) {
        match Self::capability(cap) {
            Some(c) => unsafe { self.gl.disable(c) },
            None => self.state.borrow_mut().texture_2d = false,
        }
    }

    fn clear(&self, mask: ClearFlags) {
        unsafe { self.gl.clear(mask.bits()) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn matrix_mode(&self, mode: MatrixMode) {
        self.state.borrow_mut().mode = mode;
    }

    fn load_identity(&self) {
        *self.state.borrow_mut().current_mut() = DMat4::IDENTITY;
    }

    fn perspective(&self, fovy: f64, aspect: f64, near: f64, far: f64) {
        self.state
            .borrow_mut()
            .multiply(DMat4::perspective_rh_gl(fovy.to_radians(), aspect, near, far));
    }

    fn push_matrix(&self) {
        self.state.borrow_mut().push();
    }

    fn pop_matrix(&self) {
        self.state.borrow_mut().pop();
    }

    fn translate(&self, x: f64, y: f64, z: f64) {
        self.state
            .borrow_mut()
            .multiply(DMat4::from_translation(DVec3::new(x, y, z)));
    }

    fn rotate(&self, angle: f64, x: f64, y: f64, z: f64) {
        self.state.borrow_mut().rotate(angle, x, y, z);
    }

    fn begin(&self, mode: Primitive) {
        let mut st = self.state.borrow_mut();
        st.vertices.clear();
        st.primitive = Some(mode);
    }

    fn end(&self) {
        self.flush();
    }

    fn vertex(&self, x: f64, y: f64, z: f64) {
        self.state.borrow_mut().push_vertex(x, y, z);
    }

    fn tex_coord(&self, s: f64, t: f64) {
        self.state.borrow_mut().tex_coord = [s as f32, t as f32];
    }

    fn color(&self, r: u8, g: u8, b: u8, a: u8) {
        self.state.borrow_mut().color = [r, g, b, a].map(|c| c as f32 / 255.0);
    }

    fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        unsafe {
            self.gl.delete_program(self.shader.program);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
        }
        debug!("immediate-mode program released");
    }

    fn is_released(&self) -> bool {
        self.released.get()
    }
}
