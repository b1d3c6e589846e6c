use std::cell::RefCell;
use std::rc::Rc;

use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};

use crate::color::Color;
use crate::config::GridConfig;
use crate::error::GridResult;
use crate::event::EditorEvent;
use crate::file_handler::{self, FileHandler};
use crate::grid::CellPos;
use crate::input::PointerEvent;
use crate::paint::Mode;
use crate::session::{EditorSession, Theme};

/// Gap around the cells that belongs to the grid but to no cell
const GRID_MARGIN: f32 = 6.0;

/// egui front-end for an [`EditorSession`]. It draws the grid and turns raw
/// pointer input into [`PointerEvent`]s; all state lives in the session.
pub struct PixelGridApp {
    session: EditorSession,
    file_handler: FileHandler,
    size_input: usize,
    picker_text: String,
    /// Picker values chosen by the session (rainbow mode)
    pending_picker: Rc<RefCell<Option<String>>>,
    status: Rc<RefCell<String>>,
    last_error: Option<String>,
    /// Cell under the pointer last frame, `Some(None)` when over the margin
    hovered: Option<Option<CellPos>>,
}

impl PixelGridApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: GridConfig) -> GridResult<Self> {
        let app = Self::from_session(EditorSession::new(config)?);
        cc.egui_ctx.set_visuals(visuals_for(app.session.view().theme));
        Ok(app)
    }

    pub fn from_session(session: EditorSession) -> Self {
        let pending_picker = Rc::new(RefCell::new(None));
        let status = Rc::new(RefCell::new(format!(
            "Grid size: {0} x {0}",
            session.grid().size()
        )));

        let picker_sink = Rc::clone(&pending_picker);
        let status_sink = Rc::clone(&status);
        session.events().subscribe(move |event: &EditorEvent| match event {
            EditorEvent::CellRepainted { .. } => {}
            EditorEvent::PickerChanged { hex } => *picker_sink.borrow_mut() = Some(hex.clone()),
            other => *status_sink.borrow_mut() = other.to_string(),
        });

        Self {
            size_input: session.grid().size(),
            picker_text: session.picker_hex(),
            session,
            file_handler: FileHandler::new(),
            pending_picker,
            status,
            last_error: None,
            hovered: None,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    fn report<T>(&mut self, result: GridResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                log::warn!("{}", err);
                self.last_error = Some(err.to_string());
                None
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let theme_icon = match self.session.view().theme {
                Theme::Light => "☀",
                Theme::Dark => "🌙",
            };
            if ui.button(theme_icon).on_hover_text("Change theme").clicked() {
                self.session.toggle_theme();
                ui.ctx().set_visuals(visuals_for(self.session.view().theme));
            }
            ui.separator();

            for mode in Mode::ALL {
                if ui.selectable_label(self.session.mode() == mode, mode.label()).clicked() {
                    self.session.set_mode(mode);
                }
            }
            ui.separator();

            let mut color = self.session.picker_color().to_color32();
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                self.session.set_picker_color(Color::rgb(color.r(), color.g(), color.b()));
                self.picker_text = self.session.picker_hex();
            }
            let hex_field = ui.add(egui::TextEdit::singleline(&mut self.picker_text).desired_width(64.0));
            if hex_field.lost_focus() {
                let result = self.session.set_picker(self.picker_text.trim());
                if self.report(result).is_none() {
                    self.picker_text = self.session.picker_hex();
                }
            }
        });

        ui.horizontal_wrapped(|ui| {
            let max = self.session.config().max_size;
            let slider = ui.add(egui::Slider::new(&mut self.size_input, 1..=max).text("Grid size"));
            if slider.changed() {
                let result = self.session.resize(self.size_input);
                self.report(result);
            }

            if ui.button("Clear").clicked() {
                self.session.clear();
            }

            let borders = self.session.view().show_borders;
            if ui.selectable_label(borders, "# Borders").clicked() {
                self.session.toggle_borders();
            }

            if ui.button("Export").clicked() {
                let result = self.session.export_png();
                if let Some(export) = self.report(result) {
                    match file_handler::save_export(&export) {
                        Ok(path) => *self.status.borrow_mut() = format!("Saved {}", path.display()),
                        Err(err) => self.last_error = Some(err.to_string()),
                    }
                }
            }
            ui.label("Drop an image to import");
        });
    }

    fn grid_canvas(&mut self, ui: &mut egui::Ui) {
        let side = ui.available_width().min(ui.available_height()).max(1.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click_and_drag());
        let rect = response.rect;
        let size = self.session.grid().size();
        let inner = rect.shrink(GRID_MARGIN);
        let cell_side = inner.width() / size as f32;

        let cell_at = |pos: Pos2| -> Option<CellPos> {
            if !inner.contains(pos) {
                return None;
            }
            let col = ((pos.x - inner.min.x) / cell_side) as usize;
            let row = ((pos.y - inner.min.y) / cell_side) as usize;
            (row < size && col < size).then(|| CellPos::new(row, col))
        };

        let (hover_pos, pressed, released) = ui.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let over_grid = hover_pos.filter(|pos| rect.contains(*pos)).map(cell_at);

        let mut events = Vec::new();
        match (self.hovered, over_grid) {
            (Some(_), None) => events.push(PointerEvent::Leave),
            (previous, Some(cell)) if previous != Some(cell) => events.push(PointerEvent::Move { cell }),
            _ => {}
        }
        if pressed {
            if let Some(cell) = over_grid {
                events.push(PointerEvent::Down { cell });
            }
        }
        if released {
            events.push(PointerEvent::Up);
        }
        self.hovered = over_grid;

        for event in events {
            let result = self.session.handle_pointer(event);
            self.report(result);
        }

        let background = ui.visuals().extreme_bg_color;
        painter.rect_filled(rect, 4.0, background);
        let show_borders = self.session.view().show_borders;
        let border = Stroke::new(0.5, ui.visuals().widgets.noninteractive.bg_stroke.color);
        for (pos, cell) in self.session.grid().iter() {
            let min = inner.min + Vec2::new(pos.col as f32, pos.row as f32) * cell_side;
            let cell_rect = Rect::from_min_size(min, Vec2::splat(cell_side));
            let color = cell.color().to_color32();
            if color != Color32::TRANSPARENT {
                painter.rect_filled(cell_rect, 0.0, color);
            }
            if show_borders {
                painter.rect_stroke(cell_rect, 0.0, border);
            }
        }
    }
}

fn visuals_for(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    }
}

impl eframe::App for PixelGridApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(hex) = self.pending_picker.borrow_mut().take() {
            self.picker_text = hex;
        }

        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            let bytes = self.file_handler.take_image_bytes();
            let result = self.session.import_bytes(bytes.as_deref());
            if self.report(result) == Some(true) {
                self.size_input = self.session.grid().size();
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.borrow().as_str());
                if let Some(err) = &self.last_error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| self.grid_canvas(ui));
    }
}
