//! Game persistence: a versioned JSON snapshot of the grid, players and turn
//! counter, written atomically to disk.

mod snapshot;
mod store;

pub use snapshot::{GameSnapshot, SNAPSHOT_VERSION};
pub use store::{load_game, save_game};
