// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! - `window`: the window/context collaborator a renderer is bound to
//! - `gl`: the GL call surface, plus the glow backend that emulates the
//!   fixed-function pipeline on a core profile
//! - `renderer`: context lifetime, clearing, viewports and cubes
//! - `surface`: decoded images waiting for upload
//! - `texture` / `texture_manager`: GPU textures and the per-path cache
//! - `cube` / `viewport`: the face and region tables
//! - `adapter`: concrete windowing backends (SDL2)

pub mod adapter;
pub mod cube;
pub mod gl;
pub mod renderer;
pub mod surface;
pub mod texture;
pub mod texture_manager;
pub mod viewport;
pub mod window;

#[cfg(test)]
pub(crate) mod mock;
