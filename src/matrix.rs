//! Module matrices and the encoder seam that produces them.
//!
//! The renderer never encodes text itself. It asks a [`MatrixSource`] for an
//! immutable square grid of dark/light modules, which keeps the drawing code
//! independent of any particular QR library and lets tests feed synthetic grids.

use crate::error::{Error, Result};
use std::fmt;

/// Error correction level requested from the encoder.
///
/// Higher levels tolerate more obscured modules, which is what makes a
/// central logo viable. Generation always asks for [`QrCodeEcc::High`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrCodeEcc {
    /// Tolerates about 7% erroneous codewords.
    Low,
    /// Tolerates about 15% erroneous codewords.
    Medium,
    /// Tolerates about 25% erroneous codewords.
    Quartile,
    /// Tolerates about 30% erroneous codewords.
    High,
}

impl From<QrCodeEcc> for qrcode::EcLevel {
    fn from(ecc: QrCodeEcc) -> Self {
        match ecc {
            QrCodeEcc::Low => qrcode::EcLevel::L,
            QrCodeEcc::Medium => qrcode::EcLevel::M,
            QrCodeEcc::Quartile => qrcode::EcLevel::Q,
            QrCodeEcc::High => qrcode::EcLevel::H,
        }
    }
}

/// An immutable N×N grid of modules, `true` meaning dark.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    size: usize,
    modules: Vec<bool>,
}

impl Matrix {
    /// Builds a matrix by evaluating `f(row, col)` for every cell.
    ///
    /// Returns `None` when `size` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrlogo::Matrix;
    ///
    /// let checker = Matrix::from_fn(4, |row, col| (row + col) % 2 == 0).unwrap();
    /// assert!(checker.get(0, 0));
    /// assert!(!checker.get(0, 1));
    /// ```
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Option<Self> {
        if size == 0 {
            return None;
        }
        let mut modules = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                modules.push(f(row, col));
            }
        }
        Some(Self { size, modules })
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the module at `(row, col)` is dark.
    ///
    /// Coordinates outside the grid are light.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }
}

/// Prints the grid as block characters with a four module quiet zone.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = 4i64;
        let size = self.size as i64;
        for row in -border..size + border {
            for col in -border..size + border {
                let dark = row >= 0 && col >= 0 && self.get(row as usize, col as usize);
                let c = if dark { '█' } else { ' ' };
                write!(f, "{0}{0}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Anything that can turn text into a module matrix.
pub trait MatrixSource {
    /// Encodes `text` at the given error correction level.
    fn encode(&self, text: &str, ecc: QrCodeEcc) -> Result<Matrix>;
}

impl<S: MatrixSource + ?Sized> MatrixSource for &S {
    fn encode(&self, text: &str, ecc: QrCodeEcc) -> Result<Matrix> {
        (**self).encode(text, ecc)
    }
}

/// Default [`MatrixSource`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl MatrixSource for QrEncoder {
    fn encode(&self, text: &str, ecc: QrCodeEcc) -> Result<Matrix> {
        let code = qrcode::QrCode::with_error_correction_level(text.as_bytes(), ecc.into())
            .map_err(|e| Error::Encode(e.to_string()))?;
        let width = code.width();
        Matrix::from_fn(width, |row, col| code[(col, row)] == qrcode::Color::Dark)
            .ok_or_else(|| Error::Encode("encoder returned an empty grid".to_string()))
    }
}
