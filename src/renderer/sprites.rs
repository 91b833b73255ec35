// Billboard pass.  Sprites are projected to square screen footprints,
// sorted far to near, and blitted with a per-column depth test against
// the wall distances recorded by the column loop.

use glam::Vec2;

use crate::renderer::Renderer;
use crate::renderer::Rgba;
use crate::renderer::raycast::perpendicular_distance;
use crate::world::{Grid, Player, TextureBank, TextureId};

/// Reserved fully-transparent texel color in sprite art.
pub const COLOR_KEY: Rgba = 0xFF_980088;

/// A sprite after projection, ready to blit.
#[derive(Clone, Copy, Debug)]
pub struct VisSprite {
    pub left: i32,
    pub top: i32,
    /// Square footprint edge in pixels.
    pub side: i32,
    /// Corrected distance, compared against the per-column wall depth.
    pub depth: f32,
    pub tex: TextureId,
}

#[inline]
fn first_quadrant(a: f32) -> bool {
    (0.0..=90.0).contains(&a)
}
#[inline]
fn fourth_quadrant(a: f32) -> bool {
    (270.0..=360.0).contains(&a)
}

/// Screen x of the sprite's center column.
///
/// `q` is the angle from the leftmost view ray to the sprite, converted
/// to columns at `plane_w / fov` per degree.  When the view arc and the
/// sprite direction sit on opposite sides of the 0°/360° seam, `q` is
/// folded by a full turn to stay continuous.
pub fn sprite_screen_x(player: &Player, plane_w: usize, sprite_pos: Vec2) -> f32 {
    let to_sprite = sprite_pos - player.pos();
    let sprite_angle = (-to_sprite.y)
        .atan2(to_sprite.x)
        .to_degrees()
        .rem_euclid(360.0);

    let view = player.view_angle();
    let mut q = (view + player.fov() * 0.5) - sprite_angle;
    if first_quadrant(view) && fourth_quadrant(sprite_angle) {
        q += 360.0;
    }
    if fourth_quadrant(view) && first_quadrant(sprite_angle) {
        q -= 360.0;
    }

    q * (plane_w as f32 / player.fov())
}

impl Renderer {
    /// Project and draw every sprite in the grid's list.  Runs after the
    /// column loop so the wall depth array is complete.
    pub(crate) fn draw_sprites(&mut self, player: &Player, grid: &Grid, bank: &TextureBank) {
        let cell = grid.cell_size();

        self.vis.clear();
        for s in grid.sprites() {
            let euclid = (s.pos - player.pos()).length();
            if euclid < 1.0 {
                continue; // inside the viewer, no meaningful projection
            }
            let depth = perpendicular_distance(player.view_angle(), player.pos(), s.pos);
            if depth <= 0.0 {
                continue; // behind the view plane
            }
            let side = ((cell / euclid) * player.plane_dist()) as i32;
            if side <= 0 {
                continue;
            }

            let center_x = sprite_screen_x(player, self.width, s.pos);
            let left = (center_x - side as f32 * 0.5) as i32;
            if left + side <= 0 || left >= self.width as i32 {
                continue; // completely off-screen
            }

            self.vis.push(VisSprite {
                left,
                top: self.center_row - side / 2,
                side,
                depth,
                tex: s.texture,
            });
        }

        // far to near, so nearer sprites win the overlap
        self.vis.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for spr in &self.vis {
            let tex = bank
                .texture(spr.tex)
                .expect("sprite texture id has no backing surface");
            let u_step = tex.w as f32 / spr.side as f32;
            let v_step = tex.h as f32 / spr.side as f32;

            for sx in 0..spr.side {
                let col = spr.left + sx;
                if col < 0 || col >= self.width as i32 {
                    continue;
                }
                if spr.depth >= self.depth[col as usize] {
                    continue; // wall in front of this column
                }
                let u = ((sx as f32 * u_step) as usize).min(tex.w - 1);

                for sy in 0..spr.side {
                    let row = spr.top + sy;
                    if row < 0 || row >= self.height as i32 {
                        continue;
                    }
                    let v = ((sy as f32 * v_step) as usize).min(tex.h - 1);
                    let color = tex.pixels[v * tex.w + u];
                    if color != COLOR_KEY {
                        self.fb.set_pixel(col as usize, row as usize, color);
                    }
                }
            }
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
