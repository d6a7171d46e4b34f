//! Grid ingestion (§6): text grids always, image grids behind the `image`
//! feature.

pub mod text;

#[cfg(feature = "image")]
pub mod image;
