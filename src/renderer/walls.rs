// Wall slices: geometry shared by both draw modes, then the flat fill
// and the texture-mapped fill as renderer methods.

use crate::renderer::Renderer;
use crate::renderer::Rgba;
use crate::renderer::raycast::{Axis, RayHit};
use crate::world::{Grid, TextureBank, TextureId};

/// On-screen height in pixels of a wall `dist` away.
///
/// Straight similar-triangle projection; `dist` is the corrected distance
/// so the height is already fisheye-free.
#[inline]
pub fn slice_height(cell_size: f32, dist: f32, plane_dist: f32) -> i32 {
    ((cell_size / dist) * plane_dist) as i32
}

/// `(wall_top, wall_bottom)` rows for a slice, symmetric about the center
/// row.  Deliberately unclamped: out-of-plane ends are clipped at draw
/// time, while the raw values drive the floor/ceiling row loops.
#[inline]
pub fn slice_span(height: i32, center_row: i32) -> (i32, i32) {
    (center_row - height / 2, center_row + height / 2)
}

impl Renderer {
    /// Fill rows `[top, bot)` of column `x` with one flat color.
    pub(crate) fn draw_flat_slice(&mut self, x: usize, top: i32, bot: i32, color: Rgba) {
        let y0 = top.max(0);
        let y1 = bot.min(self.height as i32);
        for y in y0..y1 {
            self.fb.set_pixel(x, y as usize, color);
        }
    }

    /// Texture-map column `x`: one texture column rescaled onto
    /// `height` destination rows (nearest neighbor both ways).
    pub(crate) fn draw_textured_slice(
        &mut self,
        x: usize,
        hit: &RayHit,
        height: i32,
        tex_id: TextureId,
        grid: &Grid,
        bank: &TextureBank,
    ) {
        let tex = bank
            .texture(tex_id)
            .expect("wall texture id has no backing surface");
        let cell = grid.cell_size();

        // sample along the crossed grid line
        let along = match hit.axis {
            Axis::Horizontal => hit.point.x,
            Axis::Vertical => hit.point.y,
        };
        let tex_x = ((along.rem_euclid(cell) / cell) * tex.w as f32) as usize;
        let tex_x = tex_x.min(tex.w - 1);

        let top = self.center_row - height / 2;
        for i in 0..height {
            let y = top + i;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            let tex_y = (i as usize * tex.h) / height as usize;
            self.fb
                .set_pixel(x, y as usize, tex.pixels[tex_y * tex.w + tex_x]);
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
