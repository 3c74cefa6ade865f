use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colors used by the folder popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    // Rows
    pub text: Color,
    pub selected_branch: Color,
    pub selected_leaf: Color,

    // Popup
    pub background: Color,
    pub title: Color,
    pub status_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            selected_branch: Color::Yellow,
            selected_leaf: Color::Rgb(255, 128, 0),

            background: Color::Reset,
            title: Color::DarkGray,
            status_error: Color::Red,
        }
    }
}

impl Theme {
    /// Color of a selected row; rows that can be entered stand out from leaves
    pub fn selected(&self, has_children: bool) -> Color {
        if has_children {
            self.selected_branch
        } else {
            self.selected_leaf
        }
    }
}
