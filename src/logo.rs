//! Logo assets and compositing them into the reserved center.

use crate::canvas::{Canvas, Raster, Shadow};
use crate::config::{CanvasSpec, DotColor, RenderConfig};
use crate::error::{Error, Result};
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// A user supplied logo, checked to look like an image but not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoAsset {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl LogoAsset {
    /// Accepts `bytes` if their signature matches a known raster format.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedAsset`] when the format cannot be recognised.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| Error::UnsupportedAsset(e.to_string()))?;
        Ok(Self { bytes, format })
    }

    /// Like [`LogoAsset::from_bytes`], but first rejects uploads whose
    /// declared MIME type is not `image/*`.
    pub fn with_mime_type(bytes: Vec<u8>, mime_type: &str) -> Result<Self> {
        if !mime_type.trim().to_ascii_lowercase().starts_with("image/") {
            return Err(Error::UnsupportedAsset(format!(
                "expected an image/* upload, got '{mime_type}'"
            )));
        }
        Self::from_bytes(bytes)
    }

    /// Reads a logo from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the logo to straight-alpha RGBA.
    pub fn decode(&self) -> Result<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.bytes, self.format)
            .map_err(Error::Decode)?
            .to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::UnsupportedAsset("logo has no pixels".to_string()));
        }
        Ok(image)
    }
}

/// Where the scaled logo lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LogoPlacement {
    /// Scales the longer natural side to `max_size`, keeping the aspect
    /// ratio, and centers the result on a `canvas_size` square.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrlogo::LogoPlacement;
    ///
    /// let p = LogoPlacement::fit(400, 100, 1200, 336.0);
    /// assert_eq!((p.width, p.height), (336.0, 84.0));
    /// assert_eq!((p.x, p.y), (432.0, 558.0));
    /// ```
    pub fn fit(natural_width: u32, natural_height: u32, canvas_size: u32, max_size: f32) -> Self {
        let longest = natural_width.max(natural_height).max(1) as f32;
        let scale = max_size / longest;
        let width = natural_width as f32 * scale;
        let height = natural_height as f32 * scale;
        let size = canvas_size as f32;
        Self {
            x: (size - width) / 2.0,
            y: (size - height) / 2.0,
            width,
            height,
        }
    }
}

const WHITE: DotColor = DotColor::rgb(255, 255, 255);

/// Overlays `logo` onto the center of `raster`.
///
/// Unless the background is transparent, an opaque white disc of radius
/// `max/3 + 1` goes down first. The logo is then drawn with a soft drop
/// shadow, clipped to a circle of radius `max/2`. Both effects are scoped to
/// the logo draw and gone again when this returns.
///
/// # Errors
///
/// Fails with [`Error::Decode`] if the logo cannot be decoded; the input
/// raster is consumed and no partial result is returned.
pub fn composite(
    raster: Raster,
    logo: &LogoAsset,
    config: &RenderConfig,
    canvas: &CanvasSpec,
) -> Result<Raster> {
    let image = logo.decode()?;
    let surface_size = raster.width();
    let (mut surface, modules_drawn) = Canvas::from_raster(raster);

    let max_size = canvas.max_logo_size();
    let placement = LogoPlacement::fit(image.width(), image.height(), surface_size, max_size);
    let center = surface_size as f32 / 2.0;
    log::debug!(
        "Placing {}x{} logo at ({:.1}, {:.1}) as {:.1}x{:.1}",
        image.width(),
        image.height(),
        placement.x,
        placement.y,
        placement.width,
        placement.height
    );

    if !config.transparent_background {
        surface.fill_circle(center, center, max_size / 3.0 + 1.0, WHITE);
    }

    {
        let mut scoped = surface.save();
        scoped.set_shadow(Shadow::LOGO);
        scoped.clip_circle(center, center, max_size / 2.0)?;
        scoped.draw_image(
            &image,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        )?;
    }

    Ok(surface.into_raster(modules_drawn))
}
