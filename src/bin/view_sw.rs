//! Interactive software-rendered view.
//!
//! Controls  W/↑ = forward  S/↓ = back  A/← D/→ = turn
//!           M = toggle map  V = single ray / full sweep  Esc = quit
//!
//! ```bash
//! cargo run --release --bin view_sw -- [--map level.txt] [--columns 320]
//! ```

use clap::Parser;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::{
    f64::consts::FRAC_PI_3,
    path::PathBuf,
    time::{Duration, Instant},
};

use gridcast_rs::{
    engine::{ProjectionConfig, ViewMode},
    level::{load_level, reference_map, screen_block_size},
    renderer::{RendererExt, ScreenLayout, Software},
    sim::{FrameDriver, Intent, SIM_FPS, TicRunner},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Level layout file; the built-in 8x8 level when omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Cell size in world units, unless the file sets one;
    /// defaults to an eighth of the shorter window side
    #[arg(long)]
    block: Option<f64>,

    #[arg(long, default_value_t = 1024)]
    width: usize,

    #[arg(long, default_value_t = 512)]
    height: usize,

    /// Columns cast in sweep mode
    #[arg(long, default_value_t = 120)]
    columns: usize,

    /// Field of view in degrees for sweep mode
    #[arg(long, default_value_t = FRAC_PI_3.to_degrees())]
    fov: f64,

    /// Start with one ray per frame instead of the full sweep
    #[arg(long)]
    single_ray: bool,

    /// Simulation tics per second
    #[arg(long, default_value_t = SIM_FPS)]
    tic_rate: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let block = opts
        .block
        .unwrap_or_else(|| screen_block_size(opts.width, opts.height));
    let map = match &opts.map {
        Some(path) => load_level(path, block)?,
        None => reference_map(block)?,
    };
    info!(
        "level {}x{} cells, block {}",
        map.width(),
        map.height(),
        map.block_size()
    );

    let sweep = ViewMode::Sweep {
        columns: opts.columns.max(1),
        fov: opts.fov.to_radians(),
    };
    let mut mode = if opts.single_ray { ViewMode::SingleRay } else { sweep };

    let config = ProjectionConfig {
        viewport_height: opts.height as f64,
        max_slice_height: opts.height as f64,
        ..ProjectionConfig::default()
    };
    let mut driver = FrameDriver::new(map, config, mode);
    let mut tics = TicRunner::new(opts.tic_rate);
    let mut renderer = Software::default();
    let mut show_map = true;

    let (w, h) = (opts.width, opts.height);
    let mut win = Window::new("Gridcast Software Render", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- toggles ------------------------------------------ */
        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            show_map = !show_map;
        }
        if win.is_key_pressed(Key::V, KeyRepeat::No) {
            mode = match mode {
                ViewMode::SingleRay => sweep,
                ViewMode::Sweep { .. } => ViewMode::SingleRay,
            };
            driver.set_mode(mode);
            info!("view mode: {mode:?}");
        }

        /* --------------- sample held keys once per frame ------------------ */
        let mut intent = Intent::empty();
        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            intent |= Intent::FORWARD;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            intent |= Intent::BACKWARD;
        }
        if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
            intent |= Intent::TURN_LEFT;
        }
        if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
            intent |= Intent::TURN_RIGHT;
        }

        for _ in 0..tics.pump() {
            driver.step(intent);
        }

        /* draw */
        let frame = driver.render();
        let layout = if show_map {
            ScreenLayout::side_by_side(w, h)
        } else {
            ScreenLayout::full(w, h)
        };

        let mut present = Ok(());
        renderer.draw_frame(w, h, &layout, &driver, &frame, |fb, fw, fh| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            present = win.update_with_buffer(fb, fw, fh);
        });
        present?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            let fps = 1000.0 / avg_ms;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
