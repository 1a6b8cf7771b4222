// RustPixel
// copyright zipxing@hotmail.com 2022～2025

fn main() {
    use cfg_aliases::cfg_aliases;

    cfg_aliases! {
        // Platform aliases
        wasm: { target_arch = "wasm32" },

        // SDL window/context glue, desktop only
        sdl_backend: { all(feature = "sdl", not(wasm)) },
    }
}
