use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::color::{Color, random_hex_color};
use crate::error::GridResult;

/// Opacity added per grayscale pass unless configured otherwise
pub const DEFAULT_GRAYSCALE_STEP: f32 = 0.1;

/// The active paint behavior. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Brush,
    Rainbow,
    Grayscale,
    Eraser,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Brush, Mode::Rainbow, Mode::Grayscale, Mode::Eraser];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Brush => "brush",
            Mode::Rainbow => "rainbow",
            Mode::Grayscale => "grayscale",
            Mode::Eraser => "eraser",
        }
    }

    /// Label shown on the toolbar button
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Brush => "🖌 Brush",
            Mode::Rainbow => "🌈 Rainbow",
            Mode::Grayscale => "◐ Grayscale",
            Mode::Eraser => "⌫ Eraser",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| format!("unknown mode: {s}"))
    }
}

/// What a single paint event did to its cell
#[derive(Debug, Clone, PartialEq)]
pub struct PaintEffect {
    /// The cell's color after the event
    pub color: Color,
    /// Set when the mode picked its own color and the picker should show it
    pub picker_update: Option<String>,
}

/// Maps a mode, a target cell and the picked color to a new cell state.
///
/// The engine holds no reference to any cell between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintEngine {
    grayscale_step: f32,
}

impl Default for PaintEngine {
    fn default() -> Self {
        Self::new(DEFAULT_GRAYSCALE_STEP)
    }
}

impl PaintEngine {
    pub fn new(grayscale_step: f32) -> Self {
        Self { grayscale_step }
    }

    pub fn grayscale_step(&self) -> f32 {
        self.grayscale_step
    }

    pub fn apply<R: Rng + ?Sized>(
        &self,
        mode: Mode,
        cell: &mut CellState,
        picked: Color,
        rng: &mut R,
    ) -> GridResult<PaintEffect> {
        let picker_update = match mode {
            Mode::Brush => {
                cell.paint(picked);
                None
            }
            Mode::Rainbow => {
                let hex = random_hex_color(rng);
                cell.paint(Color::from_hex(&hex)?);
                Some(hex)
            }
            Mode::Grayscale => {
                cell.accumulate(picked, self.grayscale_step);
                None
            }
            Mode::Eraser => {
                cell.erase();
                None
            }
        };

        Ok(PaintEffect { color: cell.color(), picker_update })
    }

    /// Like [`Self::apply`] but takes the raw picker value. A malformed value
    /// is rejected before the cell is touched.
    pub fn apply_hex<R: Rng + ?Sized>(
        &self,
        mode: Mode,
        cell: &mut CellState,
        picked: &str,
        rng: &mut R,
    ) -> GridResult<PaintEffect> {
        let picked = Color::from_hex(picked).inspect_err(|_| {
            log::warn!("Rejected paint with picker value {picked:?}");
        })?;
        self.apply(mode, cell, picked, rng)
    }
}
