//! # Actions
//!
//! Every bound key becomes an `Action`. The router executes them against
//! the host; this module only knows the table.
//!
//! ```text
//! KeySymbol  →  Action::from_key()  →  Action  →  router executes
//! ```
//!
//! The help text is spelled out in `HELP_LINES`; a test keeps it in step
//! with the table.

use super::key::KeySymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveDown,
    MoveUp,
    MoveRight,
    MoveToStart,
    MoveToEnd,
    ZoomOut,
    ZoomIn,
    GoToPosition,
    TogglePlayback,
}

/// Order matches the help text.
pub const ALL_ACTIONS: [Action; 10] = [
    Action::MoveLeft,
    Action::MoveDown,
    Action::MoveUp,
    Action::MoveRight,
    Action::MoveToStart,
    Action::MoveToEnd,
    Action::ZoomOut,
    Action::ZoomIn,
    Action::GoToPosition,
    Action::TogglePlayback,
];

pub const HELP_TITLE: &str = "HJKL Navigation loaded";
pub const HELP_HEADER: &str = "Controls:";

impl Action {
    pub fn from_key(key: &KeySymbol) -> Option<Action> {
        let action = match key {
            KeySymbol::H => Action::MoveLeft,
            KeySymbol::J => Action::MoveDown,
            KeySymbol::K => Action::MoveUp,
            KeySymbol::L => Action::MoveRight,
            KeySymbol::ShiftH => Action::MoveToStart,
            KeySymbol::ShiftL => Action::MoveToEnd,
            KeySymbol::ShiftJ => Action::ZoomOut,
            KeySymbol::ShiftK => Action::ZoomIn,
            KeySymbol::G => Action::GoToPosition,
            KeySymbol::Space => Action::TogglePlayback,
            KeySymbol::Unrecognized(_) => return None,
        };
        Some(action)
    }

    /// The key as it appears in the help text.
    pub fn key_label(&self) -> &'static str {
        match self {
            Action::MoveLeft => "h",
            Action::MoveDown => "j",
            Action::MoveUp => "k",
            Action::MoveRight => "l",
            Action::MoveToStart => "H",
            Action::MoveToEnd => "L",
            Action::ZoomOut => "J",
            Action::ZoomIn => "K",
            Action::GoToPosition => "g",
            Action::TogglePlayback => "space",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveLeft => "Move left",
            Action::MoveDown => "Move down (next track)",
            Action::MoveUp => "Move up (previous track)",
            Action::MoveRight => "Move right",
            Action::MoveToStart => "Move to start",
            Action::MoveToEnd => "Move to end",
            Action::ZoomOut => "Zoom out",
            Action::ZoomIn => "Zoom in",
            Action::GoToPosition => "Go to playback position",
            Action::TogglePlayback => "Toggle playback",
        }
    }

    pub fn help_line(&self) -> String {
        format!("{} - {}", self.key_label(), self.description())
    }
}

/// The usage message posted on load, line by line.
pub const HELP_LINES: [&str; 12] = [
    HELP_TITLE,
    HELP_HEADER,
    "h - Move left",
    "j - Move down (next track)",
    "k - Move up (previous track)",
    "l - Move right",
    "H - Move to start",
    "L - Move to end",
    "J - Zoom out",
    "K - Zoom in",
    "g - Go to playback position",
    "space - Toggle playback",
];

/// The usage message rebuilt from the action table. Matches `HELP_LINES`.
pub fn help_lines() -> Vec<String> {
    let mut lines = vec![HELP_TITLE.to_string(), HELP_HEADER.to_string()];
    lines.extend(ALL_ACTIONS.iter().map(Action::help_line));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_text_is_exact() {
        assert_eq!(HELP_LINES[0], "HJKL Navigation loaded");
        assert_eq!(HELP_LINES[1], "Controls:");
        assert_eq!(HELP_LINES[11], "space - Toggle playback");
    }

    #[test]
    fn test_table_matches_help_text() {
        assert_eq!(help_lines(), HELP_LINES);
    }

    #[test]
    fn test_every_action_has_a_key() {
        for action in ALL_ACTIONS {
            let label = action.key_label();
            let key = if label == "space" {
                KeySymbol::Space
            } else {
                KeySymbol::parse(label)
            };
            assert_eq!(Action::from_key(&key), Some(action));
        }
    }

    #[test]
    fn test_unrecognized_has_no_action() {
        assert_eq!(Action::from_key(&KeySymbol::Unrecognized("q".into())), None);
    }
}
