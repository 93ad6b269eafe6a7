//! PNG snapshots of the explorer window.

use std::path::{Path, PathBuf};

use eframe::egui;
use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Environment variable that, when set, receives the next snapshot without a dialog.
pub const SCREENSHOT_PATH_ENV: &str = "FOURIERPLOT_SAVE_SCREENSHOT_TO";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot image is empty")]
    Empty,
    #[error("failed to write snapshot: {0}")]
    Image(#[from] image::ImageError),
}

/// Convert an egui screenshot into an RGBA image buffer.
pub fn color_image_to_rgba(img: &egui::ColorImage) -> RgbaImage {
    let egui::ColorImage {
        size: [w, h],
        pixels,
        ..
    } = img;
    let mut out = RgbaImage::new(*w as u32, *h as u32);
    for y in 0..*h {
        for x in 0..*w {
            let p = pixels[y * *w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out
}

pub fn save_snapshot(img: &egui::ColorImage, path: &Path) -> Result<(), SnapshotError> {
    if img.size[0] == 0 || img.size[1] == 0 {
        return Err(SnapshotError::Empty);
    }
    color_image_to_rgba(img).save(path)?;
    Ok(())
}

/// Default file name offered in the save dialog.
pub fn default_snapshot_name() -> String {
    format!(
        "fourier_{}.png",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

fn snapshot_target() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SCREENSHOT_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    rfd::FileDialog::new()
        .set_file_name(default_snapshot_name())
        .add_filter("PNG", &["png"])
        .save_file()
}

/// Save any screenshot delivered to `ctx` this frame.
pub(crate) fn handle_screenshot_events(ctx: &egui::Context) {
    let Some(image) = ctx.input(|i| {
        i.events.iter().rev().find_map(|e| {
            if let egui::Event::Screenshot { image, .. } = e {
                Some(image.clone())
            } else {
                None
            }
        })
    }) else {
        return;
    };
    let Some(path) = snapshot_target() else {
        return;
    };
    match save_snapshot(&image, &path) {
        Ok(()) => log::info!("saved snapshot to {}", path.display()),
        Err(e) => log::error!("failed to save snapshot to {}: {e}", path.display()),
    }
}
