use std::fmt;

use crate::color::Color;
use crate::paint::Mode;
use crate::session::Theme;

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// One cell changed and should be redrawn with `color`
    CellRepainted {
        row: usize,
        col: usize,
        color: Color,
    },
    /// The whole grid was replaced
    GridRebuilt { size: usize },
    /// A mode chose a color and the picker should show it
    PickerChanged { hex: String },
    ModeChanged { mode: Mode },
    ThemeChanged { theme: Theme },
    BordersChanged { visible: bool },
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellRepainted { row, col, color } => write!(f, "Painted ({row}, {col}) {color}"),
            Self::GridRebuilt { size } => write!(f, "Grid size: {size} x {size}"),
            Self::PickerChanged { hex } => write!(f, "Color: {hex}"),
            Self::ModeChanged { mode } => write!(f, "Mode: {mode}"),
            Self::ThemeChanged { theme } => write!(f, "Theme: {theme:?}"),
            Self::BordersChanged { visible } => {
                write!(f, "Borders {}", if *visible { "on" } else { "off" })
            }
        }
    }
}
