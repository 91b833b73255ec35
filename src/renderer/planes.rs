// Floor and ceiling drawing runs the wall projection backwards: for each
// screen row under (or over) a wall slice, unproject the pixel into a
// world point and sample the art of whichever cell lies there.

use std::ops::Range;

use glam::Vec2;

use crate::renderer::Renderer;
use crate::world::{Cell, Grid, Player, TextureBank};

/// Screen rows the floor pass covers below a wall ending at `wall_bottom`.
///
/// The start is clamped past the center row, so the similar-triangle
/// division never sees `row_diff == 0` no matter how degenerate the
/// slice was.
#[inline]
pub fn floor_rows(wall_bottom: i32, center_row: i32, plane_h: usize) -> Range<i32> {
    wall_bottom.max(center_row + 1)..plane_h as i32
}

/// Screen rows the ceiling pass covers above a wall starting at
/// `wall_top`, clamped short of the center row like [`floor_rows`].
#[inline]
pub fn ceiling_rows(wall_top: i32, center_row: i32) -> Range<i32> {
    0..wall_top.min(center_row - 1) + 1
}

impl Renderer {
    /// Floor pixels of column `x` below the wall slice.
    pub(crate) fn draw_floor_slice(
        &mut self,
        x: usize,
        ray_angle: f32,
        wall_bottom: i32,
        player: &Player,
        grid: &Grid,
        bank: &TextureBank,
    ) {
        let (s, c) = ray_angle.to_radians().sin_cos();
        let ray_dir = Vec2::new(c, -s);
        let cos_beta = (player.view_angle() - ray_angle).to_radians().cos();
        let cell = grid.cell_size();

        for y in floor_rows(wall_bottom, self.center_row, self.height) {
            let row_diff = (y - self.center_row) as f32;
            let straight = (player.eye_height() / row_diff) * player.plane_dist();
            // off-axis rays reach the same row farther out
            let p = player.pos() + ray_dir * (straight / cos_beta);

            let Some(Cell::FloorCeiling { floor, .. }) = grid.cell_at(p) else {
                continue;
            };
            let tex = bank
                .texture(floor)
                .expect("floor texture id has no backing surface");
            let u = (((p.x.rem_euclid(cell)) / cell) * tex.w as f32) as usize;
            let v = (((p.y.rem_euclid(cell)) / cell) * tex.h as f32) as usize;
            self.fb.set_pixel(
                x,
                y as usize,
                tex.pixels[v.min(tex.h - 1) * tex.w + u.min(tex.w - 1)],
            );
        }
    }

    /// Ceiling pixels of column `x` above the wall slice.  Mirrors the
    /// floor pass with the row difference taken upward from the center.
    pub(crate) fn draw_ceiling_slice(
        &mut self,
        x: usize,
        ray_angle: f32,
        wall_top: i32,
        player: &Player,
        grid: &Grid,
        bank: &TextureBank,
    ) {
        let (s, c) = ray_angle.to_radians().sin_cos();
        let ray_dir = Vec2::new(c, -s);
        let cos_beta = (ray_angle - player.view_angle()).to_radians().cos();
        let cell = grid.cell_size();

        for y in ceiling_rows(wall_top, self.center_row) {
            let row_diff = (self.center_row - y) as f32;
            let straight = (player.eye_height() / row_diff) * player.plane_dist();
            let p = player.pos() + ray_dir * (straight / cos_beta);

            let Some(Cell::FloorCeiling { ceiling, .. }) = grid.cell_at(p) else {
                continue;
            };
            let tex = bank
                .texture(ceiling)
                .expect("ceiling texture id has no backing surface");
            let u = (((p.x.rem_euclid(cell)) / cell) * tex.w as f32) as usize;
            let v = (((p.y.rem_euclid(cell)) / cell) * tex.h as f32) as usize;
            self.fb.set_pixel(
                x,
                y as usize,
                tex.pixels[v.min(tex.h - 1) * tex.w + u.min(tex.w - 1)],
            );
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
