mod player;
mod tile_map;

pub use player::{MOVE_SPEED, PlayerState, TURN_STEP};
pub use tile_map::{EMPTY, MapError, TileMap, WALL};
