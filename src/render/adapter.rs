// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Windowing backends. SDL2 is the only one so far and needs the `sdl`
//! feature, which links the native SDL2 and SDL2_image libraries.

#[cfg(sdl_backend)]
pub mod sdl;
