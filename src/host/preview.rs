//! Turning a user-chosen image file into something the UI can show
//!
//! The file is read fully into memory, decoded with the `image` crate and
//! downscaled so the preview never exceeds [`PREVIEW_SIZE`] on either side.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::PhotoError;

/// Longest preview edge in pixels
pub const PREVIEW_SIZE: u32 = 640;

/// File extensions offered in the file picker
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// A decoded, display-ready image
#[derive(Debug, Clone)]
pub struct ImagePreview {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

/// Read and decode `path` into a preview
pub async fn load_preview(path: PathBuf) -> Result<ImagePreview, PhotoError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| PhotoError::Read {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    // Decoding and resizing are CPU-bound
    task::spawn_blocking(move || decode_preview(&path, &bytes))
        .await
        .map_err(|e| PhotoError::Task(e.to_string()))?
}

/// Blocking decode + downscale
fn decode_preview(path: &Path, bytes: &[u8]) -> Result<ImagePreview, PhotoError> {
    let img = image::load_from_memory(bytes).map_err(|e| PhotoError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let img = if img.width() > PREVIEW_SIZE || img.height() > PREVIEW_SIZE {
        img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::info!("📷 Prepared {}x{} preview of {}", width, height, path.display());

    Ok(ImagePreview {
        path: path.to_path_buf(),
        width,
        height,
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
    })
}
