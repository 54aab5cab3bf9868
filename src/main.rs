//! Headless probe: apply a command script to the player and print what the
//! raycaster sees.
//!
//! ```bash
//! cargo run --bin probe -- --commands "ffrr"
//! cargo run --bin probe -- --map level.txt --columns 8
//! ```

use clap::Parser;
use std::{f64::consts::FRAC_PI_3, path::PathBuf};

use gridcast_rs::{
    engine::{ProjectionConfig, Raycaster, ViewMode},
    level::{load_level, reference_map},
    sim::{Command, FrameDriver},
    world::PlayerState,
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Level layout file; the built-in 8x8 level when omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Cell size in world units, unless the file sets one
    #[arg(long, default_value_t = 64.0)]
    block: f64,

    /// Commands applied before casting: f/b move, l/r turn
    #[arg(long, default_value = "")]
    commands: String,

    /// Cast this many columns across the FOV instead of a single ray
    #[arg(long)]
    columns: Option<usize>,

    /// Field of view in degrees for --columns
    #[arg(long, default_value_t = FRAC_PI_3.to_degrees())]
    fov: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let map = match &opts.map {
        Some(path) => load_level(path, opts.block)?,
        None => reference_map(opts.block)?,
    };

    let commands = Command::parse_script(&opts.commands)
        .map_err(|c| anyhow::anyhow!("unknown command `{c}` (use f, b, l, r)"))?;

    let mode = match opts.columns {
        Some(columns) => ViewMode::Sweep {
            columns,
            fov: opts.fov.to_radians(),
        },
        None => ViewMode::SingleRay,
    };

    let mut player = PlayerState::centered_on(&map);
    for cmd in commands {
        cmd.apply(&mut player);
    }
    let driver = FrameDriver::with_player(map, player, ProjectionConfig::default(), mode);

    let p = driver.player();
    println!(
        "player ({:.3}, {:.3}) angle {:.4} rad, delta ({:.3}, {:.3})",
        p.position().x,
        p.position().y,
        p.angle(),
        p.delta().x,
        p.delta().y
    );

    if mode == ViewMode::SingleRay {
        let caster = Raycaster::default();
        let h = caster.horizontal_phase(p.position(), driver.map(), p.angle());
        let v = caster.vertical_phase(p.position(), driver.map(), p.angle());
        println!("horizontal phase: {:?} at {:.3}", h.distance, h.point);
        println!("vertical phase:   {:?} at {:.3}", v.distance, v.point);
    }

    let frame = driver.render();
    for (col, hit) in frame.hits.iter().enumerate() {
        let slice = frame.slices.iter().find(|s| s.screen_x == col);
        match slice {
            Some(s) => println!(
                "col {col:3}: {:?} dist {:.3} -> corrected {:.3}, height {:.2} top {:.2}",
                hit.orientation, hit.distance, s.distance, s.height, s.top
            ),
            None => println!("col {col:3}: no wall in reach"),
        }
    }
    Ok(())
}
