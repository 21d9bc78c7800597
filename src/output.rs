use crate::canvas::Raster;
use crate::error::{Error, Result};

use base64::Engine as Base64Engine;
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/*---- Output ----*/

/// Download name for a raster with an opaque background.
pub const OPAQUE_FILENAME: &str = "qr-code-with-logo.png";

/// Download name for a raster with a transparent background.
pub const TRANSPARENT_FILENAME: &str = "qr-code-transparent.png";

/// Picks the download filename for the given background mode.
pub fn download_filename(transparent_background: bool) -> &'static str {
	if transparent_background {
		TRANSPARENT_FILENAME
	} else {
		OPAQUE_FILENAME
	}
}

/// Encodes the raster as PNG bytes, keeping the alpha channel.
pub fn to_png_bytes(raster: &Raster) -> Result<Vec<u8>> {
	let mut bytes = Vec::new();
	raster
		.to_image()
		.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
		.map_err(Error::Png)?;
	Ok(bytes)
}

/// Encodes the raster as a `data:image/png;base64,` URL for inline display.
pub fn to_data_url(raster: &Raster) -> Result<String> {
	let png = to_png_bytes(raster)?;
	let encoded = Base64Engine::encode(&base64::engine::general_purpose::STANDARD, png);
	Ok(format!("data:image/png;base64,{}", encoded))
}

/// Saves the raster as a PNG file.
///
/// # Arguments
///
/// * `raster` - The finished raster.
/// * `directory_path` - Optional. The directory the image will be saved in. If not provided, the default directory is "generated".
/// * `filename` - Optional. The file name. If not provided, [`download_filename`] picks one from `transparent_background`.
/// * `transparent_background` - Whether the raster was rendered without a background.
///
/// # Returns
///
/// The path of the written file.
///
/// # Example
///
/// ```no_run
/// use qrlogo::{generate, output::save, RenderConfig};
///
/// let config = RenderConfig::default();
/// let raster = generate("Hello, World!", &config, None).unwrap();
/// let path = save(&raster, Some("images"), None, config.transparent_background).unwrap();
/// assert!(path.ends_with("qr-code-with-logo.png"));
/// ```
pub fn save(
	raster: &Raster,
	directory_path: Option<&str>,
	filename: Option<&str>,
	transparent_background: bool,
) -> Result<PathBuf> {
	let directory_path = directory_path.unwrap_or("generated");
	let filename = filename.unwrap_or_else(|| download_filename(transparent_background));
	let file_path = Path::new(directory_path).join(filename);

	// Check if the directory exists, create it if it doesn't
	if !Path::new(directory_path).exists() {
		fs::create_dir_all(directory_path)?;
	}

	fs::write(&file_path, to_png_bytes(raster)?)?;
	log::info!("Saved {}x{} QR to {}", raster.width(), raster.height(), file_path.display());
	Ok(file_path)
}

// Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::canvas::Canvas;

	fn sample(transparent: bool) -> Raster {
		let mut canvas = Canvas::new(16).unwrap();
		if !transparent {
			canvas.fill_white();
		}
		canvas.into_raster(0)
	}

	#[test]
	fn test_download_filename() {
		assert_eq!(download_filename(false), "qr-code-with-logo.png");
		assert_eq!(download_filename(true), "qr-code-transparent.png");
	}

	#[test]
	fn test_png_round_trip_keeps_alpha() {
		let bytes = to_png_bytes(&sample(true)).unwrap();
		let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
		assert_eq!(decoded.dimensions(), (16, 16));
		assert_eq!(decoded.get_pixel(3, 3).0, [0, 0, 0, 0]);
	}

	#[test]
	fn test_data_url_prefix() {
		let url = to_data_url(&sample(false)).unwrap();
		assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
	}

	#[test]
	fn test_save_creates_directory() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("out/nested");
		let nested = nested.to_str().unwrap();
		let path = save(&sample(true), Some(nested), None, true).unwrap();
		assert!(path.ends_with("qr-code-transparent.png"));
		assert!(path.exists());
	}
}
