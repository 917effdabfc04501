use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, ColorImage, FontId, TextStyle, TextureHandle, TextureOptions};
use serde::Deserialize;

use crate::error::AssetError;

pub const STYLESHEET: &str = "styles.json";
pub const LOGO: &str = "images/logo.png";
pub const BANNER: &str = "images/diabetes_image.png";

// ---------------------------------------------------------------------------
// Stylesheet
// ---------------------------------------------------------------------------

/// Theme read from `static/styles.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stylesheet {
    pub dark_mode: bool,
    pub accent: [u8; 3],
    pub high_risk: [u8; 3],
    pub low_risk: [u8; 3],
    pub heading_size: f32,
    pub body_size: f32,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            dark_mode: false,
            accent: [0x1f, 0x77, 0xb4],
            high_risk: [0xc0, 0x39, 0x2b],
            low_risk: [0x27, 0xae, 0x60],
            heading_size: 24.0,
            body_size: 15.0,
        }
    }
}

impl Stylesheet {
    pub fn accent(&self) -> Color32 {
        rgb(self.accent)
    }

    pub fn high_risk(&self) -> Color32 {
        rgb(self.high_risk)
    }

    pub fn low_risk(&self) -> Color32 {
        rgb(self.low_risk)
    }

    /// Install the theme on an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.selection.bg_fill = self.accent();
        visuals.hyperlink_color = self.accent();
        ctx.set_visuals(visuals);

        ctx.style_mut(|style| {
            style
                .text_styles
                .insert(TextStyle::Heading, FontId::proportional(self.heading_size));
            style
                .text_styles
                .insert(TextStyle::Body, FontId::proportional(self.body_size));
            style
                .text_styles
                .insert(TextStyle::Button, FontId::proportional(self.body_size));
        });
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Stylesheet and decoded images, before upload to the GPU.
pub struct StaticAssets {
    pub stylesheet: Stylesheet,
    pub logo: ColorImage,
    pub banner: ColorImage,
}

impl std::fmt::Debug for StaticAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAssets")
            .field("stylesheet", &self.stylesheet)
            .field("logo", &self.logo.size)
            .field("banner", &self.banner.size)
            .finish()
    }
}

/// Read every static asset under `dir`; any missing or invalid file is an
/// error.
pub fn load_static_assets(dir: &Path) -> Result<StaticAssets, AssetError> {
    let stylesheet = load_stylesheet(&dir.join(STYLESHEET))?;
    let logo = load_image(&dir.join(LOGO))?;
    let banner = load_image(&dir.join(BANNER))?;
    log::info!("Loaded static assets from {}", dir.display());
    Ok(StaticAssets {
        stylesheet,
        logo,
        banner,
    })
}

pub fn load_stylesheet(path: &Path) -> Result<Stylesheet, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    serde_json::from_str(&text).map_err(|source| AssetError::Stylesheet {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_image(path: &Path) -> Result<ColorImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn io_error(path: &Path, source: std::io::Error) -> AssetError {
    AssetError::Io {
        path: PathBuf::from(path),
        source,
    }
}

/// Textures uploaded once at startup.
pub struct Textures {
    pub logo: TextureHandle,
    pub banner: TextureHandle,
}

impl Textures {
    pub fn upload(ctx: &egui::Context, assets: &StaticAssets) -> Self {
        Self {
            logo: ctx.load_texture("logo", assets.logo.clone(), TextureOptions::LINEAR),
            banner: ctx.load_texture("banner", assets.banner.clone(), TextureOptions::LINEAR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([200, 30, 30, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn partial_stylesheet_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STYLESHEET);
        std::fs::write(&path, r#"{ "dark_mode": true, "accent": [1, 2, 3] }"#).unwrap();
        let sheet = load_stylesheet(&path).unwrap();
        assert!(sheet.dark_mode);
        assert_eq!(sheet.accent(), Color32::from_rgb(1, 2, 3));
        assert_eq!(sheet.body_size, Stylesheet::default().body_size);
    }

    #[test]
    fn loads_complete_asset_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STYLESHEET), "{}").unwrap();
        write_png(&dir.path().join(LOGO));
        write_png(&dir.path().join(BANNER));
        let assets = load_static_assets(dir.path()).unwrap();
        assert_eq!(assets.logo.size, [4, 3]);
        assert_eq!(assets.stylesheet, Stylesheet::default());
    }

    #[test]
    fn missing_image_is_a_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STYLESHEET), "{}").unwrap();
        write_png(&dir.path().join(LOGO));
        let err = load_static_assets(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Io { ref path, .. } if path.ends_with(BANNER)));
    }

    #[test]
    fn undecodable_image_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOGO);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_image(&path), Err(AssetError::Image { .. })));
    }

    #[test]
    fn invalid_stylesheet_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STYLESHEET);
        std::fs::write(&path, "body { color: red }").unwrap();
        assert!(matches!(load_stylesheet(&path), Err(AssetError::Stylesheet { .. })));
    }
}
