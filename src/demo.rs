// Built-in scene so the binaries run with no assets on disk: procedural
// 64×64 art and a hand-laid map, all deterministic.

use glam::Vec2;
use once_cell::sync::Lazy;

use crate::renderer::{COLOR_KEY, Rgba};
use crate::world::{Cell, Grid, Player, Texture, TextureBank, TextureId};

/// Cell side of the built-in scene, world units.
pub const DEMO_CELL: f32 = 64.0;

/// Side length of every generated texture.
const TEX_SIDE: usize = 64;

// Ids follow bank insertion order; `demo_bank` checks they line up.
const BRICK: TextureId = 1;
const STONE: TextureId = 2;
const TILES: TextureId = 3;
const PANELS: TextureId = 4;
const TOTEM: TextureId = 5;

const SPAWN: Vec2 = Vec2::new(7.5 * DEMO_CELL, 11.5 * DEMO_CELL);
const SPAWN_ANGLE: f32 = 90.0; // up-screen, into the totem hall

/// `#` brick wall, `%` stone wall, `.` open floor, `o` open floor with a
/// totem sprite at the cell center.
static DEMO_MAP: [&str; 14] = [
    "################",
    "#..............#",
    "#..##......%%..#",
    "#..##......%%..#",
    "#......o.......#",
    "#....%....%....#",
    "#....%....%....#",
    "#....%....%....#",
    "#...........o..#",
    "#..%%......##..#",
    "#..%%......##..#",
    "#..............#",
    "#..o...........#",
    "################",
];

/*──────────────────────────── procedural art ───────────────────────────*/

#[inline]
const fn rgb(r: u32, g: u32, b: u32) -> Rgba {
    0xFF_00_0000 | (r << 16) | (g << 8) | b
}

// integer mix, stable across runs
#[inline]
fn mix(x: usize, y: usize) -> u32 {
    let mut v = (x as u32).wrapping_mul(0x9E37_79B9) ^ (y as u32).wrapping_mul(0x85EB_CA6B);
    v ^= v >> 15;
    v.wrapping_mul(0x2C1B_3C6D) >> 8
}

fn brick(x: usize, y: usize) -> Rgba {
    let course = y / 16;
    let shift = if course & 1 == 0 { 0 } else { 16 };
    if y % 16 >= 14 || (x + shift) % 32 >= 30 {
        return rgb(0x8A, 0x81, 0x78); // mortar
    }
    let j = mix((x + shift) / 32, course) & 0x17;
    rgb(0x9A + j, 0x46 + (j >> 1), 0x3C)
}

fn stone(x: usize, y: usize) -> Rgba {
    if x % 21 == 0 || y % 21 == 0 {
        return rgb(0x44, 0x44, 0x4C); // seams
    }
    let j = mix(x, y) & 0x0F;
    rgb(0x66 + j, 0x66 + j, 0x6E + j)
}

fn tiles(x: usize, y: usize) -> Rgba {
    if x % 16 == 0 || y % 16 == 0 {
        return rgb(0x2E, 0x2A, 0x24); // grout
    }
    let j = mix(x, y) & 0x07;
    if (x / 16 + y / 16) & 1 == 0 {
        rgb(0x7E + j, 0x6E + j, 0x52)
    } else {
        rgb(0x64 + j, 0x58 + j, 0x40)
    }
}

fn panels(_x: usize, y: usize) -> Rgba {
    if y % 8 == 7 {
        return rgb(0x17, 0x13, 0x11); // slat gaps
    }
    let j = mix(y / 8, 3) & 0x07;
    rgb(0x30 + j, 0x28 + j, 0x26)
}

/// Idol billboard: gold head, green body, stone plinth, keyed elsewhere.
fn totem(x: usize, y: usize) -> Rgba {
    let dx = x as i32 - 32;
    let dy = y as i32 - 14;
    if dx * dx + dy * dy <= 100 {
        return rgb(0xC8, 0xB0, 0x30);
    }
    let half = 6 + y.saturating_sub(20) / 6;
    if (20..58).contains(&y) && dx.unsigned_abs() as usize <= half {
        return rgb(0x2F, 0x6B, 0x35);
    }
    if y >= 58 && dx.unsigned_abs() <= 14 {
        return rgb(0x55, 0x52, 0x4E);
    }
    COLOR_KEY
}

fn surface(name: &str, shade: fn(usize, usize) -> Rgba) -> Texture {
    let mut pixels = vec![0u32; TEX_SIDE * TEX_SIDE];
    for y in 0..TEX_SIDE {
        for x in 0..TEX_SIDE {
            pixels[y * TEX_SIDE + x] = shade(x, y);
        }
    }
    Texture {
        name: name.to_string(),
        w: TEX_SIDE,
        h: TEX_SIDE,
        pixels,
    }
}

static DEMO_BANK: Lazy<TextureBank> = Lazy::new(|| {
    let mut bank = TextureBank::default_with_checker();
    let art: [(&str, TextureId, fn(usize, usize) -> Rgba); 5] = [
        ("BRICK", BRICK, brick),
        ("STONE", STONE, stone),
        ("TILES", TILES, tiles),
        ("PANELS", PANELS, panels),
        ("TOTEM", TOTEM, totem),
    ];
    for (name, id, shade) in art {
        let got = bank
            .insert(name, surface(name, shade))
            .expect("demo texture names are unique");
        debug_assert_eq!(got, id, "demo texture id drifted for {name}");
    }
    bank
});

/*──────────────────────────── scene accessors ──────────────────────────*/

/// Shared bank holding the generated demo art.
pub fn demo_bank() -> &'static TextureBank {
    &DEMO_BANK
}

/// Decoded demo map with wall colors and totem sprites attached.
pub fn demo_grid() -> Grid {
    let h = DEMO_MAP.len();
    let w = DEMO_MAP[0].len();
    let mut cells = Vec::with_capacity(w * h);
    let mut totems = Vec::new();
    for (cy, row) in DEMO_MAP.iter().enumerate() {
        assert_eq!(row.len(), w, "demo map row {cy} is ragged");
        for (cx, code) in row.bytes().enumerate() {
            cells.push(match code {
                b'#' => Cell::Wall { texture: BRICK },
                b'%' => Cell::Wall { texture: STONE },
                b'.' | b'o' => Cell::FloorCeiling {
                    floor: TILES,
                    ceiling: PANELS,
                },
                other => panic!("demo map code {:?} at ({cx}, {cy})", other as char),
            });
            if code == b'o' {
                totems.push(Vec2::new(
                    (cx as f32 + 0.5) * DEMO_CELL,
                    (cy as f32 + 0.5) * DEMO_CELL,
                ));
            }
        }
    }

    let mut grid = Grid::new(w, h, DEMO_CELL, cells).expect("demo map fits the grid limits");
    grid.set_wall_color(BRICK, 0xFF_9A4A3A);
    grid.set_wall_color(STONE, 0xFF_6E6E76);
    for pos in totems {
        grid.add_sprite(pos, TOTEM)
            .expect("demo totems sit inside the map");
    }
    grid
}

/// Viewer at the scene spawn, projecting onto a plane `plane_w` wide.
pub fn demo_player(plane_w: usize, fov_deg: f32) -> Player {
    Player::new(SPAWN, SPAWN_ANGLE, fov_deg, DEMO_CELL * 0.5, plane_w)
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RenderFlags, Renderer};

    #[test]
    fn map_is_enclosed_with_totems_on_open_cells() {
        let grid = demo_grid();
        assert!(grid.is_enclosed());
        assert_eq!(grid.sprites().len(), 3);
        for spr in grid.sprites() {
            assert!(matches!(
                grid.cell_at(spr.pos),
                Some(Cell::FloorCeiling { .. })
            ));
        }
    }

    #[test]
    fn bank_ids_match_the_map_codes() {
        let bank = demo_bank();
        assert_eq!(bank.id("BRICK"), Some(BRICK));
        assert_eq!(bank.id("STONE"), Some(STONE));
        assert_eq!(bank.id("TILES"), Some(TILES));
        assert_eq!(bank.id("PANELS"), Some(PANELS));
        assert_eq!(bank.id("TOTEM"), Some(TOTEM));
    }

    #[test]
    fn totem_art_keeps_a_keyed_border() {
        let tex = demo_bank().texture(TOTEM).unwrap();
        for x in 0..TEX_SIDE {
            assert_eq!(tex.pixels[x], COLOR_KEY, "top row must stay keyed");
        }
        for y in 0..TEX_SIDE {
            assert_eq!(tex.pixels[y * TEX_SIDE], COLOR_KEY);
            assert_eq!(tex.pixels[y * TEX_SIDE + TEX_SIDE - 1], COLOR_KEY);
        }
        assert!(tex.pixels.iter().any(|&c| c != COLOR_KEY));
    }

    #[test]
    fn spawn_stands_on_open_floor() {
        let grid = demo_grid();
        let player = demo_player(320, 60.0);
        assert!(matches!(
            grid.cell_at(player.pos()),
            Some(Cell::FloorCeiling { .. })
        ));
    }

    #[test]
    fn scene_renders_from_the_spawn() {
        let grid = demo_grid();
        let mut r = Renderer::new(320, 200);
        r.render(
            &demo_player(320, 60.0),
            &grid,
            demo_bank(),
            RenderFlags::TEXTURED_WALLS,
        );
        assert!(r.hits().iter().all(|h| h.is_finite()));
        assert!(r.frame().iter().any(|&c| c != 0));
    }
}
