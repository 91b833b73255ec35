mod grid;
mod player;
mod texture;

pub use grid::{
    Cell, DEFAULT_WALL_COLOR, Grid, GridError, MAX_GRID_SIDE, MAX_SPRITES, Sprite,
};

pub use player::Player;

pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
