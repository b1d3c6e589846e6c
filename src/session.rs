use image::RgbaImage;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::GridConfig;
use crate::error::{GridError, GridResult};
use crate::event::{EditorEvent, EventBus};
use crate::grid::{CellPos, GridModel};
use crate::input::{DragSession, DragState, PointerEvent};
use crate::paint::{Mode, PaintEffect, PaintEngine};
use crate::raster::{self, ExportedImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Display preferences that do not affect cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPrefs {
    pub theme: Theme,
    pub show_borders: bool,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            show_borders: true,
        }
    }
}

/// Everything one drawing grid needs: the cells, the active mode, the picker
/// value and the drag in progress.
///
/// All user actions enter here and every visible change leaves through
/// [`Self::events`]. A session is the only writer of its grid; grid
/// replacement (resize, clear, import) builds the new grid before installing
/// it, so a failed action leaves the previous grid in place.
#[derive(Debug)]
pub struct EditorSession {
    config: GridConfig,
    grid: GridModel,
    engine: PaintEngine,
    mode: Mode,
    picker: Color,
    drag: DragSession,
    view: ViewPrefs,
    rng: StdRng,
    events: EventBus,
}

impl EditorSession {
    pub fn new(config: GridConfig) -> GridResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Session with reproducible rainbow colors
    pub fn with_seed(config: GridConfig, seed: u64) -> GridResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GridConfig, rng: StdRng) -> GridResult<Self> {
        config
            .validate()
            .map_err(|err| GridError::InvalidConfig(err.to_string()))?;
        let grid = GridModel::with_limit(config.default_size, config.max_size)?;
        let picker = Color::from_hex(&config.default_color)?;
        info!("Created {}x{} grid", grid.size(), grid.size());

        Ok(Self {
            engine: PaintEngine::new(config.grayscale_step),
            config,
            grid,
            mode: Mode::default(),
            picker,
            drag: DragSession::new(),
            view: ViewPrefs::default(),
            rng,
            events: EventBus::new(),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn picker_color(&self) -> Color {
        self.picker
    }

    /// Current picker value as `#rrggbb`
    pub fn picker_hex(&self) -> String {
        self.picker.to_hex()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn view(&self) -> ViewPrefs {
        self.view
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!("Mode changed: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.events.emit(EditorEvent::ModeChanged { mode });
        }
    }

    /// Set the picker from a `#RRGGBB` string. A malformed value is rejected
    /// and the previous color kept.
    pub fn set_picker(&mut self, hex: &str) -> GridResult<()> {
        self.picker = Color::from_hex(hex).inspect_err(|_| {
            warn!("Ignoring malformed picker value {hex:?}");
        })?;
        Ok(())
    }

    pub fn set_picker_color(&mut self, color: Color) {
        self.picker = Color::rgb(color.r, color.g, color.b);
    }

    /// Feed a pointer event through the drag state, painting if it lands on
    /// a cell while dragging
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GridResult<Option<PaintEffect>> {
        match self.drag.handle(event) {
            Some(pos) => self.paint_at(pos).map(Some),
            None => Ok(None),
        }
    }

    /// Paint one cell with the active mode, regardless of drag state
    pub fn paint_at(&mut self, pos: CellPos) -> GridResult<PaintEffect> {
        let cell = self.grid.get_mut(pos.row, pos.col)?;
        let effect = self.engine.apply(self.mode, cell, self.picker, &mut self.rng)?;
        debug!("{} ({}, {}) -> {}", self.mode, pos.row, pos.col, effect.color);

        if let Some(hex) = &effect.picker_update {
            self.picker = effect.color;
            self.events.emit(EditorEvent::PickerChanged { hex: hex.clone() });
        }
        self.events.emit(EditorEvent::CellRepainted {
            row: pos.row,
            col: pos.col,
            color: effect.color,
        });
        Ok(effect)
    }

    /// Replace the grid with an empty one of side `size`
    pub fn resize(&mut self, size: usize) -> GridResult<()> {
        let grid = GridModel::with_limit(size, self.config.max_size).inspect_err(|err| {
            warn!("Resize rejected: {}", err);
        })?;
        self.install(grid);
        Ok(())
    }

    /// Empty every cell, keeping the size
    pub fn clear(&mut self) {
        self.grid.clear();
        self.rebuilt();
    }

    pub fn export_png(&self) -> GridResult<ExportedImage> {
        raster::export_png(&self.grid, self.config.export_cell_px)
    }

    /// Replace the grid with the decoded image. `None` (nothing selected) is
    /// a no-op and returns `Ok(false)`.
    pub fn import_bytes(&mut self, bytes: Option<&[u8]>) -> GridResult<bool> {
        let Some(bytes) = bytes else {
            debug!("Import skipped: no file selected");
            return Ok(false);
        };
        let raster = raster::decode(bytes)?;
        self.import_raster(&raster)?;
        Ok(true)
    }

    pub fn import_raster(&mut self, raster: &RgbaImage) -> GridResult<()> {
        let grid = raster::import_from_raster(raster, self.config.max_size)?;
        info!(
            "Imported {}x{} image as {}x{} grid",
            raster.width(),
            raster.height(),
            grid.size(),
            grid.size()
        );
        self.install(grid);
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.view.theme = self.view.theme.toggled();
        self.events.emit(EditorEvent::ThemeChanged { theme: self.view.theme });
    }

    pub fn set_show_borders(&mut self, visible: bool) {
        self.view.show_borders = visible;
        self.events.emit(EditorEvent::BordersChanged { visible });
    }

    pub fn toggle_borders(&mut self) {
        self.set_show_borders(!self.view.show_borders);
    }

    /// Swap in a fully built grid
    fn install(&mut self, grid: GridModel) {
        self.grid = grid;
        self.rebuilt();
    }

    /// Any drag ends and the mode returns to brush
    fn rebuilt(&mut self) {
        self.drag.cancel();
        self.set_mode(Mode::Brush);
        info!("Grid rebuilt: {}x{}", self.grid.size(), self.grid.size());
        self.events.emit(EditorEvent::GridRebuilt { size: self.grid.size() });
    }
}
