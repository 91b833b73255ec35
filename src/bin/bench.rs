//! Headless render benchmark: spins the viewer through the demo scene
//! and reports the average frame cost.
//!
//! ```bash
//! cargo run --release --bin bench -- --frames 2000
//! ```

use clap::Parser;
use std::time::Instant;

use gridcast_rs::demo::{demo_bank, demo_grid, demo_player};
use gridcast_rs::renderer::{RenderFlags, Renderer};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Frames to render
    #[arg(long, default_value_t = 1000)]
    frames: usize,

    /// Projection plane width, pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Projection plane height, pixels
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Draw walls as flat colors instead of textures
    #[arg(long)]
    flat: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let grid = demo_grid();
    let bank = demo_bank();
    let mut player = demo_player(opts.width, 60.0);
    let mut renderer = Renderer::new(opts.width, opts.height);

    let flags = if opts.flat {
        RenderFlags::FLAT_WALLS
    } else {
        RenderFlags::TEXTURED_WALLS
    };

    // keep the optimizer honest: fold every frame into a checksum
    let mut checksum = 0u64;

    let t0 = Instant::now();
    for _ in 0..opts.frames {
        // slow pan from the spawn; no two frames see the same walls
        player.turn(0.31);

        renderer.render(&player, &grid, bank, flags);
        checksum = checksum.wrapping_add(renderer.frame()[renderer.frame().len() / 2] as u64);
    }
    let total = t0.elapsed();

    let avg_ms = total.as_secs_f64() * 1000.0 / opts.frames as f64;
    println!(
        "{} frames at {}×{}: avg {:.3} ms ({:.1} FPS), checksum {checksum:#x}",
        opts.frames, opts.width, opts.height, avg_ms, 1000.0 / avg_ms
    );
    Ok(())
}
