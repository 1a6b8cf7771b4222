// RustPixel
// copyright zipxing@hotmail.com 2022～2025

/// cube-demo: a spinning colored cube, optionally a textured one, in one
/// viewport or split over the four quarters of the window.
///
/// Usage:
/// cargo run --features sdl --bin cube-demo
/// cargo run --features sdl --bin cube-demo -- --texture assets/crate.png --split
/// cargo run --features sdl --bin cube-demo -- -c render.toml --sdl-image -t logo.png
///
use clap::Parser;
use rust_pixel_gl::{
    get_render_config, init_render_config,
    log::{init_log, level_from_str},
    render::gl::{Capability, GlApi, MatrixMode},
    RenderConfig, Renderer, SdlImageLoader, SdlWindow, Texture, TextureManager, Viewport,
};
use sdl2::{event::Event, image::InitFlag, keyboard::Keycode};
use std::error::Error;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "cube-demo", version, about = "Colored and textured cubes over SDL2 + OpenGL")]
struct Args {
    /// TOML render config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Image shown on the second cube and as a quad
    #[arg(short, long)]
    texture: Option<String>,

    /// Draw into the four quarter viewports instead of one
    #[arg(short, long)]
    split: bool,

    /// Decode the texture with SDL_image instead of the image crate
    #[arg(long)]
    sdl_image: bool,
}

const FACE_COLORS: [[u8; 4]; 6] = [
    [230, 60, 60, 255],
    [60, 230, 60, 255],
    [60, 60, 230, 255],
    [230, 230, 60, 255],
    [60, 230, 230, 255],
    [230, 60, 230, 255],
];

const QUARTERS: [Viewport; 4] = [
    Viewport::TopLeft,
    Viewport::TopRight,
    Viewport::BottomLeft,
    Viewport::BottomRight,
];

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    init_render_config(config);
    let cfg = get_render_config();
    init_log(level_from_str(&cfg.log_level), &cfg.log_file);

    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let _image = sdl2::image::init(InitFlag::PNG | InitFlag::JPG)?;

    let window = SdlWindow::new(&video, &cfg.title, cfg.width, cfg.height)?;
    let mut renderer = Renderer::new(window, cfg.gl_version, cfg.bit_depth)?;
    let mut textures = TextureManager::new();

    let texture = match &args.texture {
        Some(path) if args.sdl_image => Some(Texture::create_with(
            &mut textures,
            renderer.gl(),
            path,
            &SdlImageLoader,
        )?),
        Some(path) => Some(Texture::create(&mut textures, &renderer, path)?),
        None => None,
    };

    let viewports: Vec<Viewport> = if args.split {
        QUARTERS.to_vec()
    } else {
        vec![cfg.viewport]
    };

    renderer.gl().enable(Capability::DepthTest);
    let mut event_pump = sdl.event_pump()?;
    let mut angle = 0.0;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }

        renderer.clear();
        for (i, viewport) in viewports.iter().enumerate() {
            renderer.set_viewport(*viewport, cfg.fov, cfg.near, cfg.far)?;

            let gl = renderer.gl();
            gl.matrix_mode(MatrixMode::ModelView);
            gl.load_identity();
            gl.translate(0.0, 0.0, -4.0);
            gl.rotate(angle + 30.0 * i as f64, 1.0, 1.0, 0.0);

            match &texture {
                Some(tex) if i % 2 == 1 => {
                    renderer.draw_cube_textured([0.8, 0.8, 0.8], Some(tex));
                }
                _ => renderer.draw_cube_colors([1.0, 1.0, 1.0], &FACE_COLORS),
            }
        }

        if let Some(tex) = &texture {
            // a unit quad in the lower left of the full window
            renderer.set_viewport(Viewport::Full, cfg.fov, cfg.near, cfg.far)?;
            let gl = renderer.gl();
            gl.matrix_mode(MatrixMode::ModelView);
            gl.load_identity();
            gl.translate(0.0, 0.0, -5.0);
            let scale = [
                1.0 / f64::from(tex.width().max(1)),
                1.0 / f64::from(tex.height().max(1)),
            ];
            tex.draw(&[-3.0, -2.0], &[0.0, 0.0, 1.0], &scale, None);
        }

        renderer.draw();
        angle = (angle + 1.0) % 360.0;
        std::thread::sleep(Duration::from_millis(16));
    }

    // textures go before the context they live in
    drop(texture);
    textures.clear();
    renderer.dispose();
    Ok(())
}
