use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::game::{Player, PlayerColor, COLUMNS, ROWS};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a game in progress. The win flag is not stored; it is
/// recomputed from `grid` on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    /// Unix seconds at capture time
    #[serde(default)]
    pub saved_at: u64,
    pub players: [Player; 2],
    pub turn_count: u32,
    /// Column-major cells, row 0 at the top
    pub grid: [[PlayerColor; ROWS]; COLUMNS],
}

impl GameSnapshot {
    pub(crate) fn new(
        players: [Player; 2],
        turn_count: u32,
        grid: [[PlayerColor; ROWS]; COLUMNS],
    ) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at,
            players,
            turn_count,
            grid,
        }
    }
}
