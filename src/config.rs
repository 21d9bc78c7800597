//! Render settings and the optional TOML config file.
//!
//! A [`RenderConfig`] is built once per generation call and never mutated.
//! [`CanvasSpec`] fixes the output resolution, quiet zone and logo size.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Shape drawn for each dark module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStyle {
    /// Plain square, the classic look.
    #[default]
    Square,
    /// Square with rounded corners.
    Rounded,
    /// Large disc.
    Circle,
    /// Square rotated 45 degrees.
    Diamond,
    /// Small disc.
    Dots,
    /// Regular hexagon.
    Hexagon,
    /// Five pointed star.
    Star,
    /// Two crossed bars.
    Cross,
    /// Two crossed bars with rounded ends.
    Plus,
    /// Neighbouring modules merge into organic blobs.
    Fluid,
}

impl PatternStyle {
    /// Every style, in menu order.
    pub const ALL: [PatternStyle; 10] = [
        PatternStyle::Square,
        PatternStyle::Rounded,
        PatternStyle::Circle,
        PatternStyle::Diamond,
        PatternStyle::Dots,
        PatternStyle::Hexagon,
        PatternStyle::Star,
        PatternStyle::Cross,
        PatternStyle::Plus,
        PatternStyle::Fluid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternStyle::Square => "square",
            PatternStyle::Rounded => "rounded",
            PatternStyle::Circle => "circle",
            PatternStyle::Diamond => "diamond",
            PatternStyle::Dots => "dots",
            PatternStyle::Hexagon => "hexagon",
            PatternStyle::Star => "star",
            PatternStyle::Cross => "cross",
            PatternStyle::Plus => "plus",
            PatternStyle::Fluid => "fluid",
        }
    }
}

impl fmt::Display for PatternStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        PatternStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| Error::UnknownPattern(s.to_string()))
    }
}

/// Foreground color given as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct DotColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DotColor {
    pub const BLACK: DotColor = DotColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for DotColor {
    fn default() -> Self {
        DotColor::BLACK
    }
}

impl FromStr for DotColor {
    type Err = Error;

    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(DotColor::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for DotColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for DotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Per-generation styling choices.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub pattern: PatternStyle,
    pub dot_color: DotColor,
    /// Leave the background fully transparent instead of white. Also skips
    /// the white disc behind the logo.
    pub transparent_background: bool,
    /// Keep the central exclusion zone empty even when no logo is supplied.
    pub reserve_center_for_logo: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pattern: PatternStyle::default(),
            dot_color: DotColor::default(),
            transparent_background: false,
            reserve_center_for_logo: true,
        }
    }
}

/// Output raster dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
    /// Side of the square output in pixels.
    pub size: u32,
    /// Quiet zone on every side, in pixels.
    pub margin: u32,
    /// Logo bounding box as a fraction of `size`.
    pub logo_ratio: f32,
}

impl CanvasSpec {
    pub const DEFAULT_SIZE: u32 = 1200;
    pub const DEFAULT_MARGIN: u32 = 96;
    pub const DEFAULT_LOGO_RATIO: f32 = 0.28;

    /// Checks that a grid and a logo can fit.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidCanvas("size must be positive".to_string()));
        }
        if u64::from(self.margin) * 2 >= u64::from(self.size) {
            return Err(Error::InvalidCanvas(format!(
                "margin {} leaves no drawable area in a {}px canvas",
                self.margin, self.size
            )));
        }
        if !(self.logo_ratio > 0.0 && self.logo_ratio <= 1.0) {
            return Err(Error::InvalidCanvas(format!(
                "logo ratio {} must be in (0, 1]",
                self.logo_ratio
            )));
        }
        Ok(())
    }

    /// Side of the drawable region inside the quiet zone.
    pub fn drawable(&self) -> f32 {
        self.size.saturating_sub(2 * self.margin) as f32
    }

    /// Longest side of the placed logo, `logo_ratio · size`.
    pub fn max_logo_size(&self) -> f32 {
        self.size as f32 * self.logo_ratio
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            margin: Self::DEFAULT_MARGIN,
            logo_ratio: Self::DEFAULT_LOGO_RATIO,
        }
    }
}

/// Configuration file structure.
///
/// ```toml
/// [render]
/// pattern = "hexagon"
/// dot_color = "#1e3a8a"
/// transparent_background = true
///
/// [canvas]
/// size = 800
/// margin = 64
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub canvas: CanvasSpec,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.canvas.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_from_str() {
        for style in PatternStyle::ALL {
            assert_eq!(style.name().parse::<PatternStyle>().unwrap(), style);
        }
        assert_eq!(" Fluid ".parse::<PatternStyle>().unwrap(), PatternStyle::Fluid);
        assert!(matches!(
            "triangle".parse::<PatternStyle>(),
            Err(Error::UnknownPattern(_))
        ));
    }

    #[test]
    fn test_dot_color_parse() {
        assert_eq!("#000000".parse::<DotColor>().unwrap(), DotColor::BLACK);
        assert_eq!("1E3a8A".parse::<DotColor>().unwrap(), DotColor::rgb(0x1e, 0x3a, 0x8a));
        for bad in ["", "#fff", "#12345g", "#1234567", "red"] {
            assert!(matches!(bad.parse::<DotColor>(), Err(Error::InvalidColor(_))), "{bad}");
        }
        assert_eq!(DotColor::rgb(255, 16, 1).to_string(), "#ff1001");
    }

    #[test]
    fn test_canvas_validate() {
        assert!(CanvasSpec::default().validate().is_ok());
        let zero = CanvasSpec { size: 0, ..CanvasSpec::default() };
        assert!(matches!(zero.validate(), Err(Error::InvalidCanvas(_))));
        let no_room = CanvasSpec { size: 100, margin: 50, ..CanvasSpec::default() };
        assert!(no_room.validate().is_err());
        let huge_logo = CanvasSpec { logo_ratio: 1.5, ..CanvasSpec::default() };
        assert!(huge_logo.validate().is_err());
    }

    #[test]
    fn test_canvas_defaults_match_reference_output() {
        let canvas = CanvasSpec::default();
        assert_eq!(canvas.drawable(), 1008.0);
        assert!((canvas.max_logo_size() - 336.0).abs() < 1e-3);
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r##"
            [render]
            pattern = "hexagon"
            dot_color = "#1e3a8a"
            transparent_background = true

            [canvas]
            size = 800
            "##,
        )
        .unwrap();
        assert_eq!(config.render.pattern, PatternStyle::Hexagon);
        assert_eq!(config.render.dot_color, DotColor::rgb(0x1e, 0x3a, 0x8a));
        assert!(config.render.transparent_background);
        assert!(config.render.reserve_center_for_logo);
        assert_eq!(config.canvas.size, 800);
        assert_eq!(config.canvas.margin, CanvasSpec::DEFAULT_MARGIN);
    }

    #[test]
    fn test_config_rejects_bad_color() {
        let parsed: std::result::Result<Config, _> = toml::from_str("[render]\ndot_color = \"blue\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/qrlogo/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render\npattern = ").unwrap();
        match Config::load(&path) {
            Err(Error::ConfigParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
