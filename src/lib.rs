//! Grid raycasting software renderer.
//!
//! Casts one ray per screen column through a tile grid, draws wall slices
//! scaled by the perpendicular hit distance, unprojects floor and ceiling
//! rows, then overlays billboard sprites with color-key transparency and
//! per-column depth occlusion.  Output is a CPU framebuffer of packed
//! ARGB words.
//!
//! ```
//! use gridcast_rs::demo::{demo_bank, demo_grid, demo_player};
//! use gridcast_rs::renderer::{RenderFlags, Renderer};
//!
//! let grid = demo_grid();
//! let mut r = Renderer::new(800, 480);
//! r.render(
//!     &demo_player(800, 60.0),
//!     &grid,
//!     demo_bank(),
//!     RenderFlags::TEXTURED_WALLS,
//! );
//! assert_eq!(r.frame().len(), 800 * 480);
//! ```

pub mod demo;
pub mod renderer;
pub mod world;
