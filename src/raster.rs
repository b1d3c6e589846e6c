//! Conversion between a [`GridModel`] and raster images.
//!
//! Both directions use the same axis mapping: grid row → pixel `y`, grid
//! column → pixel `x`. Export flattens to opaque RGB because PNGs produced
//! here carry no alpha channel; import keeps the source alpha.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
use log::{debug, error, info};

use crate::cell::CellState;
use crate::color::Color;
use crate::error::{GridError, GridResult};
use crate::grid::GridModel;

/// An encoded export ready to be handed to the user
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Suggested download name for a grid of the given side
pub fn export_file_name(size: usize) -> String {
    format!("grid_{size}x{size}.png")
}

/// Largest exported image side, in pixels
pub const MAX_EXPORT_SIDE: u32 = 16_384;

/// One pixel per cell
pub fn export_to_raster(grid: &GridModel) -> RgbImage {
    render(grid, 1, grid.size() as u32)
}

/// Each cell becomes a `cell_px` × `cell_px` block. Fails when the image
/// side would exceed [`MAX_EXPORT_SIDE`].
pub fn export_scaled(grid: &GridModel, cell_px: u32) -> GridResult<RgbImage> {
    let cell_px = cell_px.max(1);
    let side = u32::try_from(grid.size())
        .ok()
        .and_then(|size| size.checked_mul(cell_px))
        .filter(|side| *side <= MAX_EXPORT_SIDE)
        .ok_or_else(|| {
            GridError::EncodeFailed(format!(
                "{0}x{0} grid at {cell_px} px per cell exceeds {MAX_EXPORT_SIDE} px",
                grid.size()
            ))
        })?;
    Ok(render(grid, cell_px, side))
}

fn render(grid: &GridModel, cell_px: u32, side: u32) -> RgbImage {
    let cells = grid.cells();
    let size = grid.size();

    RgbImage::from_fn(side, side, |x, y| {
        let row = (y / cell_px) as usize;
        let col = (x / cell_px) as usize;
        let color = cells[row * size + col].color().flatten();
        Rgb([color.r, color.g, color.b])
    })
}

pub fn encode_png(raster: &RgbImage) -> GridResult<Vec<u8>> {
    let mut bytes = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| {
            error!("Failed to encode PNG: {}", err);
            GridError::EncodeFailed(err.to_string())
        })?;
    Ok(bytes)
}

/// Render, scale and encode `grid` in one go
pub fn export_png(grid: &GridModel, cell_px: u32) -> GridResult<ExportedImage> {
    let raster = export_scaled(grid, cell_px)?;
    let bytes = encode_png(&raster)?;
    info!(
        "Exported {}x{} grid as {}x{} PNG ({} bytes)",
        grid.size(),
        grid.size(),
        raster.width(),
        raster.height(),
        bytes.len()
    );
    Ok(ExportedImage {
        file_name: export_file_name(grid.size()),
        bytes,
    })
}

/// Decode any format the `image` crate recognizes into RGBA
pub fn decode(bytes: &[u8]) -> GridResult<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(|err| {
        error!("Failed to decode image: {}", err);
        GridError::DecodeFailed(err.to_string())
    })?;
    debug!("Successfully decoded image: {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

/// Sample `raster` into a square grid of side `min(max(w, h), max_size)`.
///
/// Cell `(row, col)` takes pixel `(x = col, y = row)` unscaled. Cells that
/// fall outside the image (non-square sources) stay clear.
pub fn import_from_raster(raster: &RgbaImage, max_size: usize) -> GridResult<GridModel> {
    let (width, height) = (raster.width() as usize, raster.height() as usize);
    let size = width.max(height).min(max_size);
    let mut grid = GridModel::with_limit(size, max_size)?;

    for row in 0..size.min(height) {
        for col in 0..size.min(width) {
            let [r, g, b, a] = raster.get_pixel(col as u32, row as u32).0;
            let color = Color::rgba(r, g, b, f32::from(a) / 255.0);
            grid.set(row, col, CellState::with_color(color))?;
        }
    }

    if width != height || width.max(height) > max_size {
        debug!("Imported {width}x{height} image into a {size}x{size} grid");
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_export_maps_rows_to_y() {
        let mut grid = GridModel::new(3).unwrap();
        grid.get_mut(0, 2).unwrap().paint(Color::rgb(255, 0, 0));
        let raster = export_to_raster(&grid);
        assert_eq!(raster.get_pixel(2, 0), &Rgb([255, 0, 0]));
        assert_eq!(raster.get_pixel(0, 2), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_export_scaled_fills_blocks() {
        let mut grid = GridModel::new(2).unwrap();
        grid.get_mut(1, 1).unwrap().paint(Color::BLACK);
        let raster = export_scaled(&grid, 16).unwrap();
        assert_eq!(raster.dimensions(), (32, 32));
        assert_eq!(raster.get_pixel(16, 16), &Rgb([0, 0, 0]));
        assert_eq!(raster.get_pixel(31, 31), &Rgb([0, 0, 0]));
        assert_eq!(raster.get_pixel(15, 31), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_import_non_square_leaves_missing_cells_clear() {
        let raster = RgbaImage::from_pixel(3, 1, Rgba([0, 0, 255, 255]));
        let grid = import_from_raster(&raster, 100).unwrap();
        assert_eq!(grid.size(), 3);
        for col in 0..3 {
            assert_eq!(grid.get(0, col).unwrap().color(), Color::rgb(0, 0, 255));
            assert!(grid.get(1, col).unwrap().is_clear());
            assert!(grid.get(2, col).unwrap().is_clear());
        }
    }

    #[test]
    fn test_import_clamps_to_max_size() {
        let raster = RgbaImage::from_pixel(12, 12, Rgba([9, 9, 9, 255]));
        let grid = import_from_raster(&raster, 10).unwrap();
        assert_eq!(grid.size(), 10);
        assert!(grid.cells().iter().all(|cell| cell.color() == Color::rgb(9, 9, 9)));
    }

    #[test]
    fn test_export_scaled_rejects_oversized_side() {
        let grid = GridModel::new(100).unwrap();
        assert!(matches!(export_scaled(&grid, 50_000_000), Err(GridError::EncodeFailed(_))));
        assert!(matches!(export_scaled(&grid, 164), Err(GridError::EncodeFailed(_))));
        assert!(export_scaled(&GridModel::new(4).unwrap(), 4).is_ok());
    }

    #[test]
    fn test_import_keeps_alpha() {
        let raster = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 0]));
        let grid = import_from_raster(&raster, 100).unwrap();
        assert!(grid.get(0, 0).unwrap().color().is_transparent());
    }

    #[test]
    fn test_import_keeps_partial_alpha() {
        let raster = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 128]));
        let grid = import_from_raster(&raster, 100).unwrap();
        let color = grid.get(1, 1).unwrap().color();
        assert_eq!((color.r, color.g, color.b), (10, 20, 30));
        assert!((color.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(!color.is_transparent());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode(b"not an image"), Err(GridError::DecodeFailed(_))));
    }
}
