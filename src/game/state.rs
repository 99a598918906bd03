use tracing::{debug, info, warn};

use super::{Board, Player, PlayerColor};
use crate::error::{MoveError, SaveError};
use crate::save::{GameSnapshot, SNAPSHOT_VERSION};

/// One game between two players: the grid, whose turn it is, and whether
/// somebody has already connected four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    turn_count: u32,
    won: bool,
}

impl GameState {
    /// Start a game. The first name plays `First`, the second `Second`.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        GameState {
            board: Board::new(),
            players: [
                Player::new(first, PlayerColor::First),
                Player::new(second, PlayerColor::Second),
            ],
            turn_count: 0,
            won: false,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Contents of `(column, row)`, `None` when off the board
    pub fn cell(&self, column: usize, row: usize) -> Option<PlayerColor> {
        self.board.get(column, row)
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// The player whose token the next insert drops
    pub fn current_player(&self) -> &Player {
        &self.players[(self.turn_count % 2) as usize]
    }

    /// Drop the current player's token into `column` and return its row.
    ///
    /// Neither advances the turn nor evaluates the win; callers follow up with
    /// [`GameState::win`] and [`GameState::next_turn`]. A rejected insert
    /// leaves the state untouched.
    pub fn insert(&mut self, column: usize) -> Result<usize, MoveError> {
        let color = self.current_player().color();
        match self.board.drop_piece(column, color) {
            Ok(row) => {
                debug!(column, row, player = %self.current_player(), "token inserted");
                Ok(row)
            }
            Err(err) => {
                warn!(column, %err, "insert rejected");
                Err(err)
            }
        }
    }

    /// Whether four in a row exists anywhere on the grid.
    ///
    /// The first positive answer is latched; the grid is not rescanned until
    /// [`GameState::reset`].
    pub fn win(&mut self) -> bool {
        if !self.won && self.board.has_four_in_a_row() {
            self.won = true;
            info!(
                player = %self.current_player(),
                turn = self.turn_count,
                "four in a row"
            );
        }
        self.won
    }

    /// Whether a win has already been latched, without scanning.
    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn next_turn(&mut self) {
        // 2^32 is even, so wrapping keeps the alternation intact
        self.turn_count = self.turn_count.wrapping_add(1);
        debug!(turn = self.turn_count, player = %self.current_player(), "next turn");
    }

    /// Clear the grid and start over with the same two players.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn_count = 0;
        self.won = false;
        debug!("game reset");
    }

    /// Capture everything needed to resume this game later.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self.players.clone(), self.turn_count, *self.board.cells())
    }

    /// Rebuild a game from a snapshot, recomputing the win flag from the grid.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SaveError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SaveError::UnsupportedVersion(snapshot.version));
        }

        let [first, second] = snapshot.players;
        if first.color() != PlayerColor::First || second.color() != PlayerColor::Second {
            return Err(SaveError::Invalid(format!(
                "players must be colored first/second, got {:?}/{:?}",
                first.color(),
                second.color()
            )));
        }

        let board = Board::from_cells(snapshot.grid);
        if !board.respects_gravity() {
            return Err(SaveError::Invalid(
                "grid has a token floating above an empty cell".into(),
            ));
        }

        // Players alternate starting with First; the mover may not have
        // advanced the turn yet after their last insert.
        let firsts = board.count(PlayerColor::First);
        let seconds = board.count(PlayerColor::Second);
        let placed = (firsts + seconds) as u64;
        let turn = u64::from(snapshot.turn_count);
        if !(firsts == seconds || firsts == seconds + 1) || !(placed == turn || placed == turn + 1) {
            return Err(SaveError::Invalid(format!(
                "{firsts} first and {seconds} second tokens cannot occur at turn {turn}"
            )));
        }

        let mut state = GameState {
            board,
            players: [first, second],
            turn_count: snapshot.turn_count,
            won: false,
        };
        state.won = state.board.has_four_in_a_row();
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLUMNS, ROWS};

    fn game() -> GameState {
        GameState::new("Alice", "Bob")
    }

    #[test]
    fn test_initial_state() {
        let state = game();
        assert_eq!(state.players()[0], Player::new("Alice", PlayerColor::First));
        assert_eq!(state.players()[1], Player::new("Bob", PlayerColor::Second));
        assert_eq!(state.current_player().name(), "Alice");
        assert_eq!(state.turn_count(), 0);
        assert!(!state.is_won());
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_names_are_not_validated() {
        let state = GameState::new("", "");
        assert_eq!(state.players()[0].name(), "");
        assert_ne!(state.players()[0], state.players()[1]);
    }

    #[test]
    fn test_insert_does_not_advance_turn() {
        let mut state = game();
        assert_eq!(state.insert(3).unwrap(), ROWS - 1);
        assert_eq!(state.cell(3, ROWS - 1), Some(PlayerColor::First));
        assert_eq!(state.cell(COLUMNS, 0), None);
        assert_eq!(state.cell(0, ROWS), None);
        assert_eq!(state.turn_count(), 0);
        assert_eq!(state.current_player().name(), "Alice");
    }

    #[test]
    fn test_current_player_alternates() {
        let mut state = game();
        for k in 0..9u32 {
            assert_eq!(state.current_player(), &state.players()[(k % 2) as usize]);
            state.next_turn();
        }
        assert_eq!(state.turn_count(), 9);
    }

    #[test]
    fn test_column_fills_in_alternating_order() {
        for column in 0..COLUMNS {
            let mut state = game();
            for _ in 0..ROWS {
                state.insert(column).unwrap();
                state.next_turn();
            }
            for (i, row) in (0..ROWS).rev().enumerate() {
                let expected = if i % 2 == 0 {
                    PlayerColor::First
                } else {
                    PlayerColor::Second
                };
                assert_eq!(state.cell(column, row), Some(expected));
            }
            assert_eq!(state.insert(column), Err(MoveError::ColumnFull { column }));
            assert!(!state.win());
        }
    }

    #[test]
    fn test_failed_insert_is_noop() {
        let mut state = game();
        let before = state.clone();
        assert_eq!(
            state.insert(COLUMNS),
            Err(MoveError::OutOfRange { column: COLUMNS })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_horizontal_win() {
        let mut state = game();
        for column in 0..4 {
            state.insert(column).unwrap();
            if column == 3 {
                break;
            }
            assert!(!state.win());
            state.next_turn();
            // Bob stacks in column 6, away from the bottom row of columns 0-3
            state.insert(6).unwrap();
            assert!(!state.win());
            state.next_turn();
        }
        assert!(state.win());
        assert_eq!(state.current_player().name(), "Alice");
    }

    #[test]
    fn test_vertical_win() {
        let mut state = game();
        for _ in 0..3 {
            state.insert(0).unwrap();
            state.next_turn();
            state.insert(1).unwrap();
            state.next_turn();
        }
        assert!(!state.win());
        state.insert(0).unwrap();
        assert!(state.win());
    }

    #[test]
    fn test_diagonal_win_through_play() {
        let mut state = game();
        // Alice ends with (3,2) (4,3) (5,4) (6,5)
        let moves = [6, 5, 5, 4, 4, 3, 4, 3, 3, 0];
        for &column in &moves {
            state.insert(column).unwrap();
            assert!(!state.win());
            state.next_turn();
        }
        state.insert(3).unwrap();
        assert!(state.win());
        assert_eq!(state.current_player().name(), "Alice");
    }

    #[test]
    fn test_win_is_monotonic() {
        let mut state = game();
        for _ in 0..4 {
            state.insert(2).unwrap();
        }
        assert!(state.win());
        state.next_turn();
        assert!(state.win());
        assert!(state.is_won());
        state.next_turn();
        assert!(state.win());
    }

    #[test]
    fn test_reset() {
        let mut state = game();
        for _ in 0..4 {
            state.insert(5).unwrap();
        }
        state.next_turn();
        assert!(state.win());

        state.reset();
        assert!(state.board().is_empty());
        assert_eq!(state.turn_count(), 0);
        assert!(!state.win());
        assert_eq!(state.players()[0], Player::new("Alice", PlayerColor::First));
        assert_eq!(state.players()[1], Player::new("Bob", PlayerColor::Second));
    }

    #[test]
    fn test_snapshot_restores_state() {
        let mut state = game();
        for &column in &[3, 3, 4] {
            state.insert(column).unwrap();
            state.next_turn();
        }
        let restored = GameState::from_snapshot(state.snapshot()).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.current_player().name(), "Bob");
    }

    #[test]
    fn test_snapshot_recomputes_win() {
        let mut state = game();
        for _ in 0..3 {
            state.insert(1).unwrap();
            state.next_turn();
            state.insert(2).unwrap();
            state.next_turn();
        }
        state.insert(1).unwrap();
        assert!(state.win());
        let restored = GameState::from_snapshot(state.snapshot()).unwrap();
        assert!(restored.is_won());
    }

    #[test]
    fn test_snapshot_rejects_floating_token() {
        let mut snapshot = game().snapshot();
        snapshot.grid[0][0] = PlayerColor::First;
        assert!(matches!(
            GameState::from_snapshot(snapshot),
            Err(SaveError::Invalid(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_swapped_colors() {
        let mut snapshot = game().snapshot();
        snapshot.players.swap(0, 1);
        assert!(matches!(
            GameState::from_snapshot(snapshot),
            Err(SaveError::Invalid(_))
        ));
    }

    #[test]
    fn test_snapshot_accepts_turn_not_yet_advanced() {
        let mut state = game();
        state.insert(0).unwrap();
        let restored = GameState::from_snapshot(state.snapshot()).unwrap();
        assert_eq!(restored.turn_count(), 0);
        assert_eq!(restored.board().count(PlayerColor::First), 1);
    }

    #[test]
    fn test_snapshot_rejects_impossible_token_counts() {
        // Four Second tokens before First has moved
        let mut snapshot = game().snapshot();
        for row in 2..ROWS {
            snapshot.grid[0][row] = PlayerColor::Second;
        }
        assert!(matches!(
            GameState::from_snapshot(snapshot),
            Err(SaveError::Invalid(_))
        ));

        // First ran two tokens ahead
        let mut snapshot = game().snapshot();
        snapshot.grid[0][ROWS - 1] = PlayerColor::First;
        snapshot.grid[1][ROWS - 1] = PlayerColor::First;
        snapshot.turn_count = 1;
        assert!(matches!(
            GameState::from_snapshot(snapshot),
            Err(SaveError::Invalid(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_turn_count_past_tokens() {
        let mut snapshot = game().snapshot();
        snapshot.turn_count = u32::MAX;
        assert!(matches!(
            GameState::from_snapshot(snapshot),
            Err(SaveError::Invalid(_))
        ));
    }

    #[test]
    fn test_next_turn_wraps_and_keeps_alternating() {
        let mut state = game();
        state.turn_count = u32::MAX;
        assert_eq!(state.current_player().name(), "Bob");
        state.next_turn();
        assert_eq!(state.turn_count(), 0);
        assert_eq!(state.current_player().name(), "Alice");
    }

    #[test]
    fn test_snapshot_rejects_unknown_version() {
        let mut snapshot = game().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            GameState::from_snapshot(snapshot),
            Err(SaveError::UnsupportedVersion(_))
        ));
    }
}
