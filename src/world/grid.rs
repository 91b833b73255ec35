// Tile world the rays march through: a bounded 2D array of cell codes,
// a sprite list, and the flat-color table for untextured wall drawing.
// Cell codes arrive already decoded; the renderer never re-masks bits.

use glam::Vec2;

use crate::renderer::Rgba;
use crate::world::texture::TextureId;

/// Hard cap on grid side length, in cells.
pub const MAX_GRID_SIDE: usize = 64;

/// Hard cap on the sprite list.
pub const MAX_SPRITES: usize = 128;

/// Flat color used for wall ids missing from the color table.
pub const DEFAULT_WALL_COLOR: Rgba = 0xFF_707070;

/// One grid cell, decoded.  `Wall` and `FloorCeiling` are mutually
/// exclusive by construction; `Empty` renders as cleared background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall { texture: TextureId },
    FloorCeiling { floor: TextureId, ceiling: TextureId },
}

impl Cell {
    #[inline]
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall { .. })
    }
}

/// World-positioned billboard; projected by the renderer, owned here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    pub texture: TextureId,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridError {
    #[error("grid dimensions {0}×{1} outside 1..={MAX_GRID_SIDE}")]
    BadDimensions(usize, usize),

    #[error("cell vector holds {got} codes, grid needs {expected}")]
    CellCount { expected: usize, got: usize },

    #[error("cell size must be positive, got {0}")]
    BadCellSize(f32),

    #[error("sprite list full ({MAX_SPRITES} max)")]
    TooManySprites,

    #[error("sprite position ({0}, {1}) outside the grid")]
    SpriteOutOfBounds(f32, f32),
}

/// Immutable-during-render tile world.
///
/// Row-major cells, row 0 at the top (world y grows downward, matching the
/// screen).  All world coordinates are in the same units as `cell_size`.
#[derive(Debug)]
pub struct Grid {
    w: usize,
    h: usize,
    cell_size: f32,
    cells: Vec<Cell>,
    sprites: Vec<Sprite>,
    wall_colors: Vec<Rgba>,
}

impl Grid {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Build a grid from pre-decoded cells (row-major, `w * h` of them).
    pub fn new(w: usize, h: usize, cell_size: f32, cells: Vec<Cell>) -> Result<Self, GridError> {
        if w == 0 || h == 0 || w > MAX_GRID_SIDE || h > MAX_GRID_SIDE {
            return Err(GridError::BadDimensions(w, h));
        }
        if cells.len() != w * h {
            return Err(GridError::CellCount {
                expected: w * h,
                got: cells.len(),
            });
        }
        if !(cell_size > 0.0) {
            return Err(GridError::BadCellSize(cell_size));
        }
        Ok(Self {
            w,
            h,
            cell_size,
            cells,
            sprites: Vec::new(),
            wall_colors: Vec::new(),
        })
    }

    /// Register the flat color drawn for wall texture `id` when textured
    /// drawing is off.  Unset ids fall back to `DEFAULT_WALL_COLOR`.
    pub fn set_wall_color(&mut self, id: TextureId, color: Rgba) {
        let idx = id as usize;
        if idx >= self.wall_colors.len() {
            self.wall_colors.resize(idx + 1, DEFAULT_WALL_COLOR);
        }
        self.wall_colors[idx] = color;
    }

    /// Append a sprite, bounded by `MAX_SPRITES` and the world rectangle.
    pub fn add_sprite(&mut self, pos: Vec2, texture: TextureId) -> Result<(), GridError> {
        if self.sprites.len() >= MAX_SPRITES {
            return Err(GridError::TooManySprites);
        }
        let size = self.world_size();
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= size.x || pos.y >= size.y {
            return Err(GridError::SpriteOutOfBounds(pos.x, pos.y));
        }
        self.sprites.push(Sprite { pos, texture });
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }
    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// World-unit extent: `(w, h) * cell_size`.
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32) * self.cell_size
    }

    /// Cell lookup by *cell* coordinates; `None` outside the grid.
    #[inline]
    pub fn cell(&self, cx: usize, cy: usize) -> Option<Cell> {
        if cx < self.w && cy < self.h {
            Some(self.cells[cy * self.w + cx])
        } else {
            None
        }
    }

    /// Cell coordinates covering world point `p`; `None` outside the grid.
    #[inline]
    pub fn cell_index(&self, p: Vec2) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let cx = (p.x / self.cell_size) as usize;
        let cy = (p.y / self.cell_size) as usize;
        if cx < self.w && cy < self.h {
            Some((cx, cy))
        } else {
            None
        }
    }

    /// Cell content at world point `p`; `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, p: Vec2) -> Option<Cell> {
        let (cx, cy) = self.cell_index(p)?;
        self.cell(cx, cy)
    }

    /// Flat color for wall texture `id` (table lookup with fallback).
    #[inline]
    pub fn wall_color(&self, id: TextureId) -> Rgba {
        self.wall_colors
            .get(id as usize)
            .copied()
            .unwrap_or(DEFAULT_WALL_COLOR)
    }

    /// True when every perimeter cell is a wall, i.e. no ray can leave the
    /// grid.  Advisory check for map builders; the renderer asserts the
    /// consequence (every ray hits) rather than re-walking the border.
    pub fn is_enclosed(&self) -> bool {
        let top_bottom = (0..self.w).all(|x| {
            self.cells[x].is_wall() && self.cells[(self.h - 1) * self.w + x].is_wall()
        });
        let sides = (0..self.h).all(|y| {
            self.cells[y * self.w].is_wall() && self.cells[y * self.w + self.w - 1].is_wall()
        });
        top_bottom && sides
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    /// `side`×`side` box: wall perimeter, floor/ceiling interior.
    fn boxed(side: usize) -> Grid {
        let mut cells = vec![Cell::FloorCeiling { floor: 1, ceiling: 2 }; side * side];
        for i in 0..side {
            cells[i] = Cell::Wall { texture: 0 };
            cells[(side - 1) * side + i] = Cell::Wall { texture: 0 };
            cells[i * side] = Cell::Wall { texture: 0 };
            cells[i * side + side - 1] = Cell::Wall { texture: 0 };
        }
        Grid::new(side, side, 64.0, cells).unwrap()
    }

    #[test]
    fn builder_rejects_bad_input() {
        assert_eq!(
            Grid::new(0, 3, 64.0, vec![]).unwrap_err(),
            GridError::BadDimensions(0, 3)
        );
        assert_eq!(
            Grid::new(65, 3, 64.0, vec![Cell::Empty; 65 * 3]).unwrap_err(),
            GridError::BadDimensions(65, 3)
        );
        assert_eq!(
            Grid::new(2, 2, 64.0, vec![Cell::Empty; 3]).unwrap_err(),
            GridError::CellCount {
                expected: 4,
                got: 3
            }
        );
        assert_eq!(
            Grid::new(2, 2, 0.0, vec![Cell::Empty; 4]).unwrap_err(),
            GridError::BadCellSize(0.0)
        );
    }

    #[test]
    fn cell_lookup_bounds() {
        let g = boxed(3);
        assert_eq!(g.cell(0, 0), Some(Cell::Wall { texture: 0 }));
        assert_eq!(g.cell(1, 1), Some(Cell::FloorCeiling { floor: 1, ceiling: 2 }));
        assert_eq!(g.cell(3, 1), None);
        assert_eq!(g.cell(1, 3), None);
    }

    #[test]
    fn world_point_to_cell() {
        let g = boxed(3);
        assert_eq!(g.cell_index(Vec2::new(96.0, 96.0)), Some((1, 1)));
        // exact cell boundary belongs to the higher-index cell
        assert_eq!(g.cell_index(Vec2::new(128.0, 64.0)), Some((2, 1)));
        assert_eq!(g.cell_index(Vec2::new(-0.5, 96.0)), None);
        assert_eq!(g.cell_index(Vec2::new(96.0, 192.0)), None);
        assert_eq!(
            g.cell_at(Vec2::new(96.0, 96.0)),
            Some(Cell::FloorCeiling { floor: 1, ceiling: 2 })
        );
    }

    #[test]
    fn enclosure_detection() {
        let g = boxed(4);
        assert!(g.is_enclosed());

        let mut cells = vec![Cell::Wall { texture: 0 }; 9];
        cells[3] = Cell::Empty; // hole in the left border
        let open = Grid::new(3, 3, 64.0, cells).unwrap();
        assert!(!open.is_enclosed());
    }

    #[test]
    fn sprite_capacity_and_bounds() {
        let mut g = boxed(3);
        assert_eq!(
            g.add_sprite(Vec2::new(-1.0, 10.0), 3).unwrap_err(),
            GridError::SpriteOutOfBounds(-1.0, 10.0)
        );
        for _ in 0..MAX_SPRITES {
            g.add_sprite(Vec2::new(96.0, 96.0), 3).unwrap();
        }
        assert_eq!(
            g.add_sprite(Vec2::new(96.0, 96.0), 3).unwrap_err(),
            GridError::TooManySprites
        );
        assert_eq!(g.sprites().len(), MAX_SPRITES);
    }

    #[test]
    fn wall_color_table_with_fallback() {
        let mut g = boxed(3);
        assert_eq!(g.wall_color(0), DEFAULT_WALL_COLOR);
        g.set_wall_color(2, 0xFF_AA0000);
        assert_eq!(g.wall_color(2), 0xFF_AA0000);
        // ids skipped by the resize get the fallback, not garbage
        assert_eq!(g.wall_color(1), DEFAULT_WALL_COLOR);
        assert_eq!(g.wall_color(9), DEFAULT_WALL_COLOR);
    }
}
