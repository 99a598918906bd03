use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SaveError;
use crate::game::GameState;
use crate::save::GameSnapshot;

/// Write `state` as pretty JSON. The file is written next to `path` first and
/// renamed into place, so a crash never leaves a half-written save.
pub fn save_game(path: &Path, state: &GameState) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&state.snapshot())?;
    let tmp_path = tmp_path(path);
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    info!(path = %path.display(), turn = state.turn_count(), "game saved");
    Ok(())
}

/// Read a save written by [`save_game`] and rebuild the game.
pub fn load_game(path: &Path) -> Result<GameState, SaveError> {
    let json = fs::read_to_string(path).map_err(|e| SaveError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let snapshot: GameSnapshot =
        serde_json::from_str(&json).map_err(|e| SaveError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let state = GameState::from_snapshot(snapshot)?;
    info!(
        path = %path.display(),
        turn = state.turn_count(),
        won = state.is_won(),
        "game loaded"
    );
    Ok(state)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
