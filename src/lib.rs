//! # qrlogo
//!
//! A Rust library for rendering styled QR codes with a logo in the middle.
//!
//! `qrlogo` takes the module grid of a QR symbol (encoded at the highest error correction
//! level) and rasterizes it onto a fixed-size canvas, drawing every dark module as one of ten
//! shapes. A circular region at the center is kept free of modules, and an optional logo is
//! composited into it, scaled without distortion, masked to a circle, and lifted by a soft
//! shadow.
//!
//! ## Features
//!
//! - Ten module styles: square, rounded, circle, diamond, dots, hexagon, star, cross, plus, and fluid.
//! - Custom dot color and an optional transparent background.
//! - Logo compositing with aspect-ratio preserving placement and a white backing disc.
//! - PNG bytes, data URLs, and files on disk as output.
//! - Pluggable matrix encoder for testing with synthetic grids.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrlogo = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Generate a rounded QR code with a logo and save it:
//!
//! ```no_run
//! use qrlogo::{generate, output, DotColor, LogoAsset, PatternStyle, RenderConfig};
//!
//! fn main() -> Result<(), qrlogo::Error> {
//!     let config = RenderConfig {
//!         pattern: PatternStyle::Rounded,
//!         dot_color: "#1e3a8a".parse::<DotColor>()?,
//!         ..RenderConfig::default()
//!     };
//!     let logo = LogoAsset::open("logo.png")?;
//!     let raster = generate("https://example.com", &config, Some(&logo))?;
//!     output::save(&raster, Some("output"), None, config.transparent_background)?;
//!     Ok(())
//! }
//! ```
//!
//! Render a synthetic grid without the encoder:
//!
//! ```rust
//! use qrlogo::{render, CanvasSpec, Matrix, RenderConfig};
//!
//! let matrix = Matrix::from_fn(21, |row, col| (row + col) % 2 == 0).unwrap();
//! let raster = render(&matrix, &RenderConfig::default(), &CanvasSpec::default()).unwrap();
//! assert_eq!(raster.pixel(600, 600), Some([255, 255, 255, 255]));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: Module grids and the encoder seam.
//! - [`exclusion`]: The central logo exclusion zone.
//! - [`render`]: Pattern rendering.
//! - [`logo`]: Logo assets and compositing.
//! - [`output`]: PNG encoding and saving.

#![forbid(unsafe_code)]

pub mod canvas;
pub mod config;
pub mod display;
pub mod error;
pub mod exclusion;
pub mod generate;
pub mod logo;
pub mod matrix;
pub mod output;
pub mod render;
pub mod shapes;

pub use canvas::{Canvas, Raster, Shadow};
pub use config::{CanvasSpec, Config, DotColor, PatternStyle, RenderConfig};
pub use display::{DisplaySlot, Ticket};
pub use error::{Error, Result};
pub use generate::{generate, Generator};
pub use logo::{composite, LogoAsset, LogoPlacement};
pub use matrix::{Matrix, MatrixSource, QrCodeEcc, QrEncoder};
pub use render::render;
