//! First-person walk through the built-in demo scene.
//!
//! ```bash
//! cargo run --release
//! ```
//!
//! Arrows/WASD move, Alt + ←/→ strafes, M toggles the minimap,
//! Escape quits.

use clap::Parser;
use glam::Vec2;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

use gridcast_rs::demo::{demo_bank, demo_grid, demo_player};
use gridcast_rs::renderer::{RenderFlags, Renderer, Rgba};
use gridcast_rs::world::{Cell, Grid, Player};

const MOVE_SPEED: f32 = 4.0; // world units per frame
const TURN_SPEED: f32 = 2.5; // degrees per frame
const BODY: f32 = 8.0; // collision half-width

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Projection plane width, pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Projection plane height, pixels
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Draw walls as flat colors instead of textures
    #[arg(long)]
    flat: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let grid = demo_grid();
    let bank = demo_bank();
    let mut player = demo_player(opts.width, opts.fov);
    let mut renderer = Renderer::new(opts.width, opts.height);

    let flags = if opts.flat {
        RenderFlags::FLAT_WALLS
    } else {
        RenderFlags::TEXTURED_WALLS
    };

    let mut win = Window::new("Gridcast", opts.width, opts.height, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut frame_buf = vec![0u32; opts.width * opts.height];
    let mut show_map = true;

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* movement --------------------------------------------------------- */
        let run = if win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift) {
            2.0
        } else {
            1.0
        };
        let mut forward = 0.0;
        let mut side = 0.0;

        if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
            forward += MOVE_SPEED * run;
        }
        if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
            forward -= MOVE_SPEED * run;
        }

        let alt = win.is_key_down(Key::LeftAlt) || win.is_key_down(Key::RightAlt);
        if alt {
            /* Alt + ←/→  = strafe */
            if win.is_key_down(Key::Left) {
                side -= MOVE_SPEED * run;
            }
            if win.is_key_down(Key::Right) {
                side += MOVE_SPEED * run;
            }
        } else {
            /* plain ←/→   = turn   */
            if win.is_key_down(Key::Left) {
                player.turn(TURN_SPEED * run);
            }
            if win.is_key_down(Key::Right) {
                player.turn(-TURN_SPEED * run);
            }
        }

        /* WASD strafing mirrors arrow-key strafing */
        if win.is_key_down(Key::A) {
            side -= MOVE_SPEED * run;
        }
        if win.is_key_down(Key::D) {
            side += MOVE_SPEED * run;
        }

        if forward != 0.0 || side != 0.0 {
            walk(&grid, &mut player, forward, side);
        }

        if win.is_key_pressed(Key::M, KeyRepeat::No) {
            show_map = !show_map;
        }

        /* draw */
        renderer.render(&player, &grid, bank, flags);
        acc_time += t0.elapsed();
        acc_frames += 1;

        frame_buf.clear();
        frame_buf.extend_from_slice(renderer.frame());
        if show_map {
            draw_minimap(&mut frame_buf, opts.width, &grid, &player, renderer.hits());
        }
        win.update_with_buffer(&frame_buf, opts.width, opts.height)?;

        // ─────────── accumulate & report every ~3 s ────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, fps);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Axis-separated slide: try the full step, then each axis alone.
fn walk(grid: &Grid, player: &mut Player, forward: f32, side: f32) {
    let dir = player.forward() * forward + player.right() * side;
    let from = player.pos();
    let to = from + dir;
    for cand in [to, Vec2::new(to.x, from.y), Vec2::new(from.x, to.y)] {
        if passable(grid, cand) {
            player.set_pos(cand);
            return;
        }
    }
}

/// A spot is passable when the whole body square rests on open floor.
fn passable(grid: &Grid, p: Vec2) -> bool {
    [
        Vec2::new(p.x - BODY, p.y - BODY),
        Vec2::new(p.x + BODY, p.y - BODY),
        Vec2::new(p.x - BODY, p.y + BODY),
        Vec2::new(p.x + BODY, p.y + BODY),
    ]
    .into_iter()
    .all(|c| matches!(grid.cell_at(c), Some(Cell::FloorCeiling { .. })))
}

/// Top-left overhead inset: cell layout, this frame's wall hits, player dot.
fn draw_minimap(fb: &mut [u32], fb_w: usize, grid: &Grid, player: &Player, hits: &[Vec2]) {
    const ORIGIN: i32 = 8; // inset margin, pixels
    const CELL_PX: usize = 4; // minimap pixels per grid cell

    let fb_h = fb.len() / fb_w;
    let mut plot = |x: i32, y: i32, c: Rgba| {
        let (x, y) = (x + ORIGIN, y + ORIGIN);
        if x >= 0 && y >= 0 && (x as usize) < fb_w && (y as usize) < fb_h {
            fb[y as usize * fb_w + x as usize] = c;
        }
    };

    for cy in 0..grid.height() {
        for cx in 0..grid.width() {
            let c = match grid.cell(cx, cy) {
                Some(Cell::Wall { .. }) => 0xFF_B8B8B8,
                _ => 0xFF_242424,
            };
            for py in 0..CELL_PX {
                for px in 0..CELL_PX {
                    plot((cx * CELL_PX + px) as i32, (cy * CELL_PX + py) as i32, c);
                }
            }
        }
    }

    // one amber dot per column: the wall point that column's ray hit
    let to_px = CELL_PX as f32 / grid.cell_size();
    for hit in hits {
        plot((hit.x * to_px) as i32, (hit.y * to_px) as i32, 0xFF_FFC040);
    }

    let p = player.pos() * to_px;
    for dy in -1..=1 {
        for dx in -1..=1 {
            plot(p.x as i32 + dx, p.y as i32 + dy, 0xFF_FF4040);
        }
    }
}
