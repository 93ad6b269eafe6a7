//! Entry point for running the explorer as a native window.

use eframe::egui;

use crate::config::FourierPlotConfig;

use super::fourier_app::FourierApp;

/// Open the explorer in a native window and block until it is closed.
///
/// Window options come from `cfg.native_options` when given; otherwise a
/// 1280×800 window with the bundled icon is used.
pub fn run_fourierplot(mut cfg: FourierPlotConfig) -> eframe::Result<()> {
    let app = FourierApp::from_config(&mut cfg);

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1280.0, 800.0));
    }

    log::info!("starting '{}'", title);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Side length of the window icon in pixels.
pub const ICON_SIZE: u32 = 128;

const ICON_SVG: &[u8] = include_bytes!("../../icon.svg");

fn load_app_icon_svg() -> Option<egui::IconData> {
    let icon = icon_from_svg(ICON_SVG, ICON_SIZE);
    if icon.is_none() {
        log::warn!("bundled icon.svg could not be rendered; using the default icon");
    }
    icon
}

/// Rasterize an SVG document into a square `side`×`side` icon, scaled to fit
/// and centered. `None` for unparseable or empty documents.
pub fn icon_from_svg(svg: &[u8], side: u32) -> Option<egui::IconData> {
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).ok()?;
    let size = tree.size();
    if side == 0 || !(size.width() > 0.0 && size.height() > 0.0) {
        return None;
    }
    let scale = side as f32 / size.width().max(size.height());
    let dx = 0.5 * (side as f32 - size.width() * scale);
    let dy = 0.5 * (side as f32 - size.height() * scale);
    let mut pixmap = tiny_skia::Pixmap::new(side, side)?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy),
        &mut pixmap.as_mut(),
    );
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: side,
        height: side,
    })
}
