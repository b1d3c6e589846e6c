use image::{Rgb, Rgba, RgbaImage};
use pixel_grid_paint::raster::{
    decode, encode_png, export_file_name, export_to_raster, import_from_raster,
};
use pixel_grid_paint::{Color, EditorSession, GridConfig, GridError, GridModel};

#[test]
fn test_transparent_grid_exports_white() {
    let grid = GridModel::new(5).unwrap();
    let raster = export_to_raster(&grid);
    assert_eq!(raster.dimensions(), (5, 5));
    assert!(raster.pixels().all(|pixel| *pixel == Rgb([255, 255, 255])));
}

#[test]
fn test_export_drops_alpha() {
    let mut grid = GridModel::new(2).unwrap();
    grid.get_mut(1, 0).unwrap().accumulate(Color::rgb(10, 20, 30), 0.1);
    let raster = export_to_raster(&grid);
    assert_eq!(raster.get_pixel(0, 1), &Rgb([10, 20, 30]));
}

#[test]
fn test_export_import_single_color() {
    let mut grid = GridModel::new(8).unwrap();
    for row in 0..8 {
        for col in 0..8 {
            grid.get_mut(row, col).unwrap().paint(Color::rgb(200, 50, 25));
        }
    }

    let bytes = encode_png(&export_to_raster(&grid)).unwrap();
    let imported = import_from_raster(&decode(&bytes).unwrap(), 100).unwrap();

    let matching = imported
        .cells()
        .iter()
        .filter(|cell| cell.color() == Color::rgb(200, 50, 25))
        .count();
    assert!(matching * 2 > imported.cells().len());
}

#[test]
fn test_session_export_file_name() {
    let session = EditorSession::with_seed(GridConfig::default(), 3).unwrap();
    let export = session.export_png().unwrap();
    assert_eq!(export.file_name, "grid_16x16.png");
    assert_eq!(export_file_name(32), "grid_32x32.png");

    let decoded = decode(&export.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (16, 16));
}

#[test]
fn test_session_export_uses_cell_scale() {
    let config = GridConfig {
        default_size: 4,
        export_cell_px: 16,
        ..GridConfig::default()
    };
    let session = EditorSession::with_seed(config, 3).unwrap();
    let decoded = decode(&session.export_png().unwrap().bytes).unwrap();
    assert_eq!(decoded.dimensions(), (64, 64));
}

#[test]
fn test_import_without_file_is_noop() {
    let mut session = EditorSession::with_seed(GridConfig::default(), 3).unwrap();
    assert_eq!(session.import_bytes(None), Ok(false));
    assert_eq!(session.grid().size(), 16);
}

#[test]
fn test_failed_decode_leaves_grid_unchanged() {
    let mut session = EditorSession::with_seed(GridConfig::default(), 3).unwrap();
    session.resize(3).unwrap();
    let before = session.grid().clone();

    let result = session.import_bytes(Some(&b"\x89PNG but not really"[..]));
    assert!(matches!(result, Err(GridError::DecodeFailed(_))));
    assert_eq!(session.grid(), &before);
}

#[test]
fn test_session_import_replaces_grid() {
    let mut session = EditorSession::with_seed(GridConfig::default(), 3).unwrap();
    let raster = RgbaImage::from_fn(6, 4, |x, _| Rgba([x as u8 * 40, 0, 0, 255]));

    session.import_raster(&raster).unwrap();
    let grid = session.grid();
    assert_eq!(grid.size(), 6);
    assert_eq!(grid.get(3, 5).unwrap().color(), Color::rgb(200, 0, 0));
    assert!(grid.get(4, 0).unwrap().is_clear());
    assert!(grid.get(5, 5).unwrap().is_clear());
}
