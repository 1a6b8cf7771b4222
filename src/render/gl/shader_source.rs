// RustPixel
// copyright zipxing@hotmail.com 2022～2025

// GLSL for the immediate-mode batch. The `#version` line is prepended at
// compile time from the context's GlVersion.

pub const IMMEDIATE_VERTEX_SRC: &str = r#"
layout(location = 0) in vec3 aPos;
layout(location = 1) in vec2 aTexCoord;
layout(location = 2) in vec4 aColor;

uniform mat4 mvp;

out vec2 vTexCoord;
out vec4 vColor;

void main() {
    gl_Position = mvp * vec4(aPos, 1.0);
    vTexCoord = aTexCoord;
    vColor = aColor;
}
"#;

// useTexture mirrors GL_TEXTURE_2D enable state; texel * color is GL_MODULATE
pub const IMMEDIATE_FRAGMENT_SRC: &str = r#"
in vec2 vTexCoord;
in vec4 vColor;

uniform sampler2D texture1;
uniform int useTexture;

out vec4 FragColor;

void main() {
    if (useTexture != 0) {
        FragColor = texture(texture1, vTexCoord) * vColor;
    } else {
        FragColor = vColor;
    }
}
"#;
