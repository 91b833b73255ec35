//! Column-raycasting software renderer.
//!
//! One [`Renderer`] owns the framebuffer and every piece of per-frame
//! scratch (hit points, wall depths, visible sprites), so independent
//! instances never share hidden state.
//!
//! A frame is one [`Renderer::render`] call: walk the screen columns left
//! to right across the field of view, per column cast a ray
//! ([`raycast::cast_column`]), draw the wall slice it found, then the
//! floor and ceiling rows the slice leaves open; after the column loop,
//! project and blit sprites against the recorded wall depths.  The
//! finished frame is loaned out read-only through [`Renderer::frame`].

pub mod framebuffer;
pub mod planes;
pub mod raycast;
pub mod sprites;
pub mod walls;

use bitflags::bitflags;
use glam::Vec2;
use smallvec::SmallVec;

use crate::world::{Cell, Grid, Player, TextureBank};
use framebuffer::Framebuffer;
use raycast::cast_column;
use sprites::VisSprite;

pub use sprites::COLOR_KEY;

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

bitflags! {
    /// Wall draw-mode selection.  Floors, ceilings and sprites always
    /// draw; the bits only pick how wall slices are filled.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderFlags: u32 {
        /// Solid-color slices from the grid's wall color table.
        const FLAT_WALLS = 0x1;
        /// Texture-mapped slices; authoritative when both bits are set.
        const TEXTURED_WALLS = 0x2;
    }
}

/// Owns the projection plane and all per-frame scratch.
///
/// Plane dimensions are fixed for the lifetime of the value; build a new
/// renderer to change resolution.
pub struct Renderer {
    fb: Framebuffer,
    /// Per-column world hit point of the last frame.
    hits: Vec<Vec2>,
    /// Per-column corrected wall distance, read by the sprite pass.
    depth: Vec<f32>,
    /// Sprites surviving projection this frame, sorted far to near.
    vis: SmallVec<[VisSprite; 8]>,

    width: usize,
    height: usize,
    center_row: i32,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "projection plane must be non-empty, got {width}×{height}"
        );
        Self {
            fb: Framebuffer::new(width, height),
            hits: vec![Vec2::ZERO; width],
            depth: vec![f32::INFINITY; width],
            vis: SmallVec::new(),
            width,
            height,
            center_row: (height / 2) as i32,
        }
    }

    /// Reset every per-frame buffer; nothing survives from the previous
    /// frame.
    fn begin_frame(&mut self) {
        self.fb.clear();
        self.hits.fill(Vec2::ZERO);
        self.depth.fill(f32::INFINITY);
        self.vis.clear();
    }

    /// Render one frame into the internal framebuffer.
    ///
    /// Panics when a ray escapes the grid or a resolved hit is not a wall
    /// cell: both mean the grid is not perimeter-enclosed, which map
    /// builders are expected to rule out up front (`Grid::is_enclosed`).
    pub fn render(&mut self, player: &Player, grid: &Grid, bank: &TextureBank, flags: RenderFlags) {
        self.begin_frame();

        let angle_step = player.fov() / self.width as f32;
        // leftmost ray of the view arc; walks rightward (clockwise)
        let mut ray_angle = player.view_angle() + player.fov() * 0.5;

        for x in 0..self.width {
            let angle = ray_angle.rem_euclid(360.0);
            let hit = cast_column(angle, player, grid);
            assert!(
                hit.distance.is_finite(),
                "ray escaped the grid at column {x}: the perimeter must be fully walled"
            );
            self.hits[x] = hit.point;
            self.depth[x] = hit.distance;

            let (cx, cy) = hit.cell;
            let Some(Cell::Wall { texture }) = grid.cell(cx, cy) else {
                panic!("column {x} resolved to a non-wall cell at ({cx}, {cy})");
            };

            let height = walls::slice_height(grid.cell_size(), hit.distance, player.plane_dist());
            let (top, bot) = walls::slice_span(height, self.center_row);

            if flags.contains(RenderFlags::TEXTURED_WALLS) {
                self.draw_textured_slice(x, &hit, height, texture, grid, bank);
            } else if flags.contains(RenderFlags::FLAT_WALLS) {
                self.draw_flat_slice(x, top, bot, grid.wall_color(texture));
            }

            self.draw_floor_slice(x, angle, bot, player, grid, bank);
            self.draw_ceiling_slice(x, angle, top, player, grid, bank);

            ray_angle -= angle_step;
        }

        self.draw_sprites(player, grid, bank);
    }

    /*──────────────────────── frame accessors ───────────────────────*/

    /// Finished frame, row-major `width × height`.  Valid until the next
    /// [`Renderer::render`] call.
    #[inline]
    pub fn frame(&self) -> &[Rgba] {
        self.fb.pixels()
    }

    /// Per-column world hit points of the last frame, for overlays such
    /// as a minimap.  Length equals [`Renderer::width`].
    #[inline]
    pub fn hits(&self) -> &[Vec2] {
        &self.hits
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    /// `side`×`side` box on the default checker texture (id 0).
    fn boxed_scene(side: usize) -> (Grid, TextureBank) {
        let mut cells = vec![Cell::FloorCeiling { floor: 0, ceiling: 0 }; side * side];
        for i in 0..side {
            cells[i] = Cell::Wall { texture: 0 };
            cells[(side - 1) * side + i] = Cell::Wall { texture: 0 };
            cells[i * side] = Cell::Wall { texture: 0 };
            cells[i * side + side - 1] = Cell::Wall { texture: 0 };
        }
        (
            Grid::new(side, side, 64.0, cells).unwrap(),
            TextureBank::default_with_checker(),
        )
    }

    #[test]
    fn three_by_three_center_column() {
        let (grid, bank) = boxed_scene(3);
        let player = Player::new(Vec2::new(96.0, 96.0), 0.0, 60.0, 32.0, 800);

        let mut r = Renderer::new(800, 480);
        r.render(&player, &grid, &bank, RenderFlags::FLAT_WALLS);

        // column 400 rides the exact view axis: 30° − 400 · (60/800) = 0°
        let hit = r.hits()[400];
        assert!((hit.x - 128.0).abs() < 1e-3);
        assert!((hit.y - 96.0).abs() < 1.0);
        assert!((r.depth[400] - 32.0).abs() < 1e-3);

        // the east wall fills the whole column at this range
        let fb = r.frame();
        assert_eq!(fb[240 * 800 + 400], grid.wall_color(0));
    }

    #[test]
    fn hits_cover_every_column() {
        let (grid, bank) = boxed_scene(8);
        let player = Player::new(Vec2::new(250.0, 230.0), 123.0, 60.0, 32.0, 320);

        let mut r = Renderer::new(320, 200);
        r.render(&player, &grid, &bank, RenderFlags::TEXTURED_WALLS);

        assert_eq!(r.hits().len(), 320);
        for (x, h) in r.hits().iter().enumerate() {
            assert!(h.x.is_finite() && h.y.is_finite(), "column {x}");
        }
        assert!(r.depth.iter().all(|d| d.is_finite()));
    }

    #[test]
    fn cardinal_views_render_without_panicking() {
        let (grid, bank) = boxed_scene(6);
        let mut r = Renderer::new(160, 100);
        for view in [0.0, 90.0, 180.0, 270.0, 359.5] {
            let player = Player::new(Vec2::new(200.0, 200.0), view, 60.0, 32.0, 160);
            r.render(&player, &grid, &bank, RenderFlags::TEXTURED_WALLS);
            assert!(r.frame().iter().any(|&p| p != 0), "view {view}");
        }
    }

    #[test]
    fn wall_flags_only_change_wall_pixels() {
        let (grid, bank) = boxed_scene(8);
        let player = Player::new(Vec2::new(250.0, 230.0), 40.0, 60.0, 32.0, 320);

        let mut r = Renderer::new(320, 200);
        r.render(&player, &grid, &bank, RenderFlags::FLAT_WALLS);
        let flat = r.frame().to_vec();
        r.render(&player, &grid, &bank, RenderFlags::TEXTURED_WALLS);
        let textured = r.frame().to_vec();

        for (i, (a, b)) in flat.iter().zip(&textured).enumerate() {
            if a == b {
                continue;
            }
            let (x, y) = (i % 320, (i / 320) as i32);
            let height = walls::slice_height(grid.cell_size(), r.depth[x], player.plane_dist());
            let (top, _) = walls::slice_span(height, r.center_row);
            // textured slices span [top, top+height); flat spans lie inside
            assert!(
                y >= top && y < top + height,
                "pixel ({x}, {y}) differs outside the wall span of column {x}"
            );
        }
    }

    #[test]
    fn sprite_behind_a_wall_leaves_the_frame_unchanged() {
        let (mut grid, mut bank) = boxed_scene(8);
        let tex = bank
            .insert(
                "TOTEM",
                crate::world::Texture {
                    name: "TOTEM".into(),
                    w: 4,
                    h: 4,
                    pixels: vec![0xFF_123456; 16],
                },
            )
            .unwrap();
        let player = Player::new(Vec2::new(100.0, 256.0), 0.0, 60.0, 32.0, 320);

        let mut r = Renderer::new(320, 200);
        r.render(&player, &grid, &bank, RenderFlags::TEXTURED_WALLS);
        let before = r.frame().to_vec();

        // drop the sprite inside the east perimeter wall: every column it
        // covers already carries a nearer wall hit
        grid.add_sprite(Vec2::new(480.0, 256.0), tex).unwrap();
        r.render(&player, &grid, &bank, RenderFlags::TEXTURED_WALLS);

        assert_eq!(before, r.frame());
    }

    #[test]
    fn both_flags_draw_the_textured_walls() {
        let (mut grid, bank) = boxed_scene(3);
        grid.set_wall_color(0, 0xFF_AA00AA);
        let player = Player::new(Vec2::new(96.0, 96.0), 0.0, 60.0, 32.0, 80);

        let mut r = Renderer::new(80, 60);
        r.render(&player, &grid, &bank, RenderFlags::TEXTURED_WALLS);
        let textured_only = r.frame().to_vec();
        r.render(
            &player,
            &grid,
            &bank,
            RenderFlags::TEXTURED_WALLS | RenderFlags::FLAT_WALLS,
        );

        // textured mode is authoritative: the flat color never lands
        assert_eq!(textured_only, r.frame());
        assert!(!r.frame().contains(&0xFF_AA00AA));
    }
}
