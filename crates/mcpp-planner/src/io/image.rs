//! Grayscale image grid ingestion and cubic resize (§6), grounded on
//! `original_source/src/core/utils.py::load_map_from_image_file` and
//! `resize_map` (`cv2.resize(..., interpolation=cv2.INTER_CUBIC)`). The
//! nearest Rust-ecosystem cubic filter is `image::imageops::FilterType::
//! CatmullRom` (standard cubic convolution), used in place of OpenCV's
//! bicubic kernel.

use image::imageops::{resize, FilterType};
use image::{GrayImage, Luma};
use mcpp_core::{CellKind, Grid};

use crate::error::PlannerResult;

/// Pixels with value `0` (black) are OCCUPIED; everything else is FREE.
pub fn load_grid(path: impl AsRef<std::path::Path>) -> PlannerResult<Grid> {
    let img = image::open(path)?.to_luma8();
    grid_from_luma(&img)
}

/// Resize to `(target_width, target_height)` via cubic interpolation, then
/// re-threshold `== 0 -> OCCUPIED` exactly as the source does.
pub fn resize_to(grid: &Grid, target_width: u32, target_height: u32) -> PlannerResult<Grid> {
    let resized = resize(&luma_from_grid(grid), target_width, target_height, FilterType::CatmullRom);
    grid_from_luma(&resized)
}

fn luma_from_grid(grid: &Grid) -> GrayImage {
    GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |c, r| {
        Luma([if grid.is_free(r as usize, c as usize) { 255 } else { 0 }])
    })
}

fn grid_from_luma(img: &GrayImage) -> PlannerResult<Grid> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let cells: Vec<CellKind> = img
        .pixels()
        .map(|p| if p.0[0] == 0 { CellKind::Occupied } else { CellKind::Free })
        .collect();
    Ok(Grid::new(height, width, cells)?)
}
