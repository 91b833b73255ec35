// Ray-grid intersection.  Each column's ray runs two independent sweeps,
// one along each grid-line family, and keeps the nearer wall.
//
// Angles are degrees in [0, 360): 0° = +x, counter-clockwise positive,
// world y growing down the screen, so (0°, 180°) points up-screen.

use glam::Vec2;

use crate::world::{Grid, Player};

/// Grid-line family a sweep marches across.  The wall slice samples its
/// texture along the other axis, so the winner's family travels with the
/// hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Merged result of one column's ray cast.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Corrected (perpendicular) distance to the wall; `f32::INFINITY`
    /// when the ray left the grid without hitting one.
    pub distance: f32,
    /// World-space intersection point.
    pub point: Vec2,
    /// Cell coordinates of the wall; saturated on a miss.
    pub cell: (usize, usize),
    /// Family of the crossed grid line.
    pub axis: Axis,
}

impl RayHit {
    /// Sentinel for a sweep that escaped the grid (or sits on its
    /// singular angle).  Always loses the min-distance merge to any
    /// real hit.
    fn miss(axis: Axis) -> Self {
        Self {
            distance: f32::INFINITY,
            point: Vec2::INFINITY,
            cell: (usize::MAX, usize::MAX),
            axis,
        }
    }

    #[inline]
    pub fn is_miss(&self) -> bool {
        self.distance.is_infinite()
    }
}

/// Distance of `hit` projected onto the viewing axis.
///
/// Wall heights scale with this, not with Euclidean distance: rays at the
/// edge of the view arc travel farther to reach a flat wall, and dividing
/// by the raw length would bow every wall outward (fisheye).
#[inline]
pub fn perpendicular_distance(view_angle: f32, pos: Vec2, hit: Vec2) -> f32 {
    let dx = hit.x - pos.x;
    let dy = pos.y - hit.y;
    let (s, c) = view_angle.to_radians().sin_cos();
    dx * c + dy * s
}

/// Cast one ray at `angle` (degrees, pre-normalized to [0, 360)) and
/// return the nearer of the two sweep results; ties prefer the
/// horizontal sweep.
///
/// Inside a perimeter-walled grid at least one sweep always lands, so
/// the result is finite.  On an open grid both sweeps can escape and the
/// caller sees the miss sentinel.
pub fn cast_column(angle: f32, player: &Player, grid: &Grid) -> RayHit {
    let h = horizontal_sweep(angle, player, grid);
    let v = vertical_sweep(angle, player, grid);
    if h.distance <= v.distance { h } else { v }
}

/// March `p` along `delta` until a wall cell or the grid edge.
#[inline]
fn march(mut p: Vec2, delta: Vec2, player: &Player, grid: &Grid, axis: Axis) -> RayHit {
    loop {
        let Some((cx, cy)) = grid.cell_index(p) else {
            return RayHit::miss(axis);
        };
        if grid.cell(cx, cy).is_some_and(|c| c.is_wall()) {
            return RayHit {
                distance: perpendicular_distance(player.view_angle(), player.pos(), p),
                point: p,
                cell: (cx, cy),
                axis,
            };
        }
        p += delta;
    }
}

/// Sweep across horizontal grid lines (rows).  Singular at 0° and 180°,
/// where the ray never crosses one.
fn horizontal_sweep(angle: f32, player: &Player, grid: &Grid) -> RayHit {
    if angle == 0.0 || angle == 180.0 {
        return RayHit::miss(Axis::Horizontal);
    }

    let cell = grid.cell_size();
    let pos = player.pos();
    let row = (pos.y / cell).floor();
    let tan_a = angle.to_radians().tan();

    let first = if angle < 180.0 {
        // up-screen: sample one unit past the boundary so the integer
        // cell lookup lands in the row the ray is entering
        let y = row * cell - 1.0;
        Vec2::new(pos.x + (pos.y - y) / tan_a, y)
    } else {
        // down-screen: the boundary itself belongs to the next row
        let y = (row + 1.0) * cell;
        Vec2::new(pos.x + (y - pos.y) / -tan_a, y)
    };

    let step_y = if angle < 180.0 { -cell } else { cell };
    let step_x = if angle > 180.0 {
        -(cell / tan_a)
    } else {
        cell / tan_a
    };

    march(first, Vec2::new(step_x, step_y), player, grid, Axis::Horizontal)
}

/// Sweep across vertical grid lines (columns).  Singular at 90° and 270°.
fn vertical_sweep(angle: f32, player: &Player, grid: &Grid) -> RayHit {
    if angle == 90.0 || angle == 270.0 {
        return RayHit::miss(Axis::Vertical);
    }

    let cell = grid.cell_size();
    let pos = player.pos();
    let col = (pos.x / cell).floor();
    let tan_a = angle.to_radians().tan();

    let (first, delta) = if !(90.0..=270.0).contains(&angle) {
        // facing right: boundary on the cell's right edge
        let x = (col + 1.0) * cell;
        let y = pos.y - (x - pos.x) * tan_a;
        (Vec2::new(x, y), Vec2::new(cell, -cell * tan_a))
    } else {
        // facing left: one unit past the left edge, as above
        let x = col * cell - 1.0;
        let y = pos.y + (pos.x - x) * tan_a;
        (Vec2::new(x, y), Vec2::new(-cell, cell * tan_a))
    };

    march(first, delta, player, grid, Axis::Vertical)
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
