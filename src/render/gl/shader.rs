// RustPixel
// copyright zipxing@hotmail.com 2022～2025

use glow::HasContext;

/// A linked vertex + fragment program.
#[derive(Clone, Copy, Debug)]
pub struct GlShader {
    pub program: glow::NativeProgram,
}

impl GlShader {
    /// Compiles both stages with `ver` prepended and links them.
    /// The stage objects are deleted once the program is linked.
    pub fn new(
        gl: &glow::Context,
        ver: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, String> {
        unsafe {
            let vertex_shader = compile(gl, glow::VERTEX_SHADER, ver, vertex_source)
                .map_err(|e| format!("Vertex Shader Compilation Error: {}", e))?;
            let fragment_shader = match compile(gl, glow::FRAGMENT_SHADER, ver, fragment_source) {
                Ok(s) => s,
                Err(e) => {
                    gl.delete_shader(vertex_shader);
                    return Err(format!("Fragment Shader Compilation Error: {}", e));
                }
            };

            let program = gl.create_program()?;
            gl.attach_shader(program, vertex_shader);
            gl.attach_shader(program, fragment_shader);
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            gl.detach_shader(program, vertex_shader);
            gl.detach_shader(program, fragment_shader);
            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);
            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(format!("Program Linking Error: {}", log));
            }

            Ok(Self { program })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
        }
    }

    pub fn uniform_location(&self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        unsafe { gl.get_uniform_location(self.program, name) }
    }
}

unsafe fn compile(
    gl: &glow::Context,
    kind: u32,
    ver: &str,
    source: &str,
) -> Result<glow::NativeShader, String> {
    let shader = gl.create_shader(kind)?;
    gl.shader_source(shader, &format!("{}\n{}", ver, source));
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(log);
    }
    Ok(shader)
}
