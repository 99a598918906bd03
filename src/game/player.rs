use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of a board cell. `None` marks an empty cell and is never
/// assigned to a player.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    #[default]
    None,
    First,
    Second,
}

impl PlayerColor {
    /// Whether the cell holds a token
    pub fn is_some(self) -> bool {
        self != PlayerColor::None
    }
}

/// A named participant. Equality and hashing cover both name and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: PlayerColor,
}

impl Player {
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Player {
            name: name.into(),
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Player::new("Ada", PlayerColor::First);
        assert_eq!(a, Player::new("Ada", PlayerColor::First));
        assert_ne!(a, Player::new("Ada", PlayerColor::Second));
        assert_ne!(a, Player::new("Bob", PlayerColor::First));
    }

    #[test]
    fn test_display_is_name() {
        let p = Player::new("Grace", PlayerColor::Second);
        assert_eq!(p.to_string(), "Grace");
    }

    #[test]
    fn test_color_serializes_lowercase() {
        let json = serde_json::to_string(&PlayerColor::First).unwrap();
        assert_eq!(json, "\"first\"");
        assert!(!PlayerColor::None.is_some());
        assert!(PlayerColor::Second.is_some());
    }
}
