use std::fmt;

use serde::{Deserialize, Serialize};

/// A discrete input command understood by the engine.
///
/// Every command has a stable kebab-case name, used by drivers that receive
/// commands as text:
///
/// ```
/// use quadris_engine::Command;
///
/// assert_eq!(Command::from_name("hard-drop"), Some(Command::HardDrop));
/// assert_eq!(Command::MoveLeft.name(), "move-left");
/// assert_eq!(Command::from_name("hold"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
        Command::TogglePause,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Command::MoveLeft => "move-left",
            Command::MoveRight => "move-right",
            Command::SoftDrop => "soft-drop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hard-drop",
            Command::TogglePause => "toggle-pause",
        }
    }

    /// Looks up a command by its kebab-case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
            assert_eq!(command.to_string(), command.name());
        }
    }

    #[test]
    fn test_serde_uses_names() {
        for command in Command::ALL {
            let json = serde_json::to_string(&command).unwrap();
            assert_eq!(json, format!("\"{}\"", command.name()));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Command::from_name(""), None);
        assert_eq!(Command::from_name("MoveLeft"), None);
        assert_eq!(Command::from_name("quit"), None);
    }
}
