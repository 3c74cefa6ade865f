use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents all possible user commands that can be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SelectionUp,
    SelectionDown,
    EnterSelected,
    EnterParent,

    /// Open the highlighted folder; the popup closes unless `keep_open`
    OpenSelected { keep_open: bool },
    /// Open the folder whose children are being shown
    OpenCurrent { keep_open: bool },
    Quit,

    // Multi-step commands for scripting
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "selection_up" | "up" | "w" => Ok(Command::SelectionUp),
            "selection_down" | "down" | "s" => Ok(Command::SelectionDown),
            "enter_selected" | "enter" | "right" | "d" => Ok(Command::EnterSelected),
            "enter_parent" | "back" | "left" | "a" => Ok(Command::EnterParent),

            "open" | "open_selected" => Ok(Command::OpenSelected { keep_open: false }),
            "open_keep" | "open_selected_keep" => Ok(Command::OpenSelected { keep_open: true }),
            "open_current" | "e" => Ok(Command::OpenCurrent { keep_open: false }),
            "open_current_keep" => Ok(Command::OpenCurrent { keep_open: true }),
            "quit" | "q" | "escape" => Ok(Command::Quit),

            _ => {
                if s.starts_with("sequence:[") && s.ends_with(']') {
                    let inner = &s["sequence:[".len()..s.len() - 1];
                    return Self::parse_list(inner).map(Command::Sequence);
                }

                Err(format!("Unknown command: {}", s))
            }
        }
    }

    /// Parse a comma-separated list such as `down,down,enter`
    pub fn parse_list(s: &str) -> Result<Vec<Self>, String> {
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }

        s.split(',')
            .map(str::trim)
            .map(|part| {
                Command::from_string(part)
                    .map_err(|e| format!("Invalid command in list '{}': {}", part, e))
            })
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SelectionUp => write!(f, "selection_up"),
            Command::SelectionDown => write!(f, "selection_down"),
            Command::EnterSelected => write!(f, "enter_selected"),
            Command::EnterParent => write!(f, "enter_parent"),
            Command::OpenSelected { keep_open: false } => write!(f, "open_selected"),
            Command::OpenSelected { keep_open: true } => write!(f, "open_selected_keep"),
            Command::OpenCurrent { keep_open: false } => write!(f, "open_current"),
            Command::OpenCurrent { keep_open: true } => write!(f, "open_current_keep"),
            Command::Quit => write!(f, "quit"),
            Command::Sequence(commands) => {
                let parts: Vec<String> = commands.iter().map(|c| c.to_string()).collect();
                write!(f, "sequence:[{}]", parts.join(","))
            }
        }
    }
}
