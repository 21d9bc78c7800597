//! End-to-end generation: text in, styled raster out.

use crate::canvas::Raster;
use crate::config::{CanvasSpec, RenderConfig};
use crate::display::DisplaySlot;
use crate::error::{Error, Result};
use crate::logo::{composite, LogoAsset};
use crate::matrix::{MatrixSource, QrCodeEcc, QrEncoder};
use crate::render::render;

/// Produces rasters from text with an injected [`MatrixSource`].
///
/// Generation is a pure function of `(text, config, logo)`: the same inputs
/// always give the same raster.
#[derive(Debug, Clone, Default)]
pub struct Generator<S = QrEncoder> {
    source: S,
    canvas: CanvasSpec,
}

impl Generator<QrEncoder> {
    /// Generator using the bundled encoder and the default 1200px canvas.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: MatrixSource> Generator<S> {
    pub fn with_source(source: S, canvas: CanvasSpec) -> Self {
        Self { source, canvas }
    }

    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Encodes `text` at high error correction, draws the pattern and, when
    /// given, composites the logo.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] for empty or whitespace-only text; nothing is encoded.
    /// - [`Error::Decode`] if the logo cannot be decoded. The pattern is
    ///   discarded rather than returned without its logo.
    /// - Encoder and surface errors otherwise.
    pub fn generate(
        &self,
        text: &str,
        config: &RenderConfig,
        logo: Option<&LogoAsset>,
    ) -> Result<Raster> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        self.canvas.validate()?;

        let matrix = self.source.encode(text, QrCodeEcc::High)?;
        log::info!(
            "Generating {}px {} QR ({}x{} modules, logo: {})",
            self.canvas.size,
            config.pattern,
            matrix.size(),
            matrix.size(),
            logo.map_or("none", LogoAsset::mime_type)
        );
        log::trace!("Module matrix:\n{matrix}");

        let raster = render(&matrix, config, &self.canvas)?;
        match logo {
            Some(logo) => composite(raster, logo, config, &self.canvas),
            None => Ok(raster),
        }
    }

    /// Generates and publishes the result into `slot`, ordered by start
    /// time. Returns `Ok(false)` if a newer result was already on display.
    ///
    /// A failed generation leaves the slot untouched.
    pub fn generate_into(
        &self,
        slot: &DisplaySlot,
        text: &str,
        config: &RenderConfig,
        logo: Option<&LogoAsset>,
    ) -> Result<bool> {
        let ticket = slot.begin();
        let raster = self.generate(text, config, logo)?;
        Ok(slot.publish(ticket, raster))
    }
}

/// Generates with the bundled encoder on the default canvas.
///
/// # Example
///
/// ```rust
/// use qrlogo::{generate, PatternStyle, RenderConfig};
///
/// let config = RenderConfig {
///     pattern: PatternStyle::Dots,
///     ..RenderConfig::default()
/// };
/// let raster = generate("https://example.com", &config, None).unwrap();
/// assert_eq!((raster.width(), raster.height()), (1200, 1200));
/// ```
pub fn generate(text: &str, config: &RenderConfig, logo: Option<&LogoAsset>) -> Result<Raster> {
    Generator::new().generate(text, config, logo)
}
