use eframe::egui;
use log;

use crate::raster::ExportedImage;

/// Collects image files dropped onto the window and hands their bytes to the
/// importer
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl Default for FileHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler {
    pub fn new() -> Self {
        Self {
            dropped_files: Vec::new(),
        }
    }

    /// Process any newly dropped files from the UI context
    /// Returns true if any new files were queued
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Bytes of the first dropped image, if any. Only one image can be
    /// imported at a time, the rest of the queue is discarded.
    pub fn take_image_bytes(&mut self) -> Option<Vec<u8>> {
        let files = std::mem::take(&mut self.dropped_files);
        for file in &files {
            let file_name = Self::file_name(file);
            if !Self::is_image_file(file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }
            if let Some(bytes) = Self::read_bytes(file, &file_name) {
                log::info!("Importing image {} ({} bytes)", file_name, bytes.len());
                return Some(bytes);
            }
        }
        None
    }

    fn file_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    /// Check if a file is an image based on MIME type or extension
    fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(path) = &file.path {
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
            } else {
                false
            }
        } else {
            // Web drops may carry neither; let the decoder decide
            file.bytes.is_some()
        }
    }

    fn read_bytes(file: &egui::DroppedFile, file_name: &str) -> Option<Vec<u8>> {
        if let Some(bytes) = &file.bytes {
            return Some(bytes.to_vec());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &file.path {
            return match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    log::error!("Failed to read image file: {}: {}", path.display(), err);
                    None
                }
            };
        }

        log::warn!("Dropped file has no accessible data: {}", file_name);
        None
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to import it",
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// Write an export next to the working directory
#[cfg(not(target_arch = "wasm32"))]
pub fn save_export(export: &ExportedImage) -> std::io::Result<std::path::PathBuf> {
    let path = std::env::current_dir()?.join(&export.file_name);
    std::fs::write(&path, &export.bytes)?;
    log::info!("Saved {}", path.display());
    Ok(path)
}

/// There is no filesystem on the web; the export is kept in memory
#[cfg(target_arch = "wasm32")]
pub fn save_export(export: &ExportedImage) -> std::io::Result<std::path::PathBuf> {
    log::warn!(
        "Saving files is not supported on the web, {} ({} bytes) was not written",
        export.file_name,
        export.bytes.len()
    );
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "saving files is not supported on the web",
    ))
}
