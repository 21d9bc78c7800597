//! Central logo exclusion zone.

/// Exclusion radius as a fraction of the grid size.
pub const EXCLUSION_RATIO: f64 = 0.2;

/// A circle at the grid center, in module units, where no foreground
/// module is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    center: f64,
    radius: f64,
}

impl ExclusionZone {
    /// Zone for an `n`×`n` grid: centered at `(n/2, n/2)` with radius `0.2·n`.
    pub fn for_grid(n: usize) -> Self {
        let n = n as f64;
        Self {
            center: n / 2.0,
            radius: n * EXCLUSION_RATIO,
        }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether the cell whose index is `(row, col)` falls strictly inside the zone.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let dx = col as f64 - self.center;
        let dy = row as f64 - self.center;
        (dx * dx + dy * dy).sqrt() < self.radius
    }
}

/// Returns true iff `(row, col)` lies inside the exclusion zone of an `n`×`n` grid.
///
/// # Example
///
/// ```rust
/// use qrlogo::exclusion::is_excluded;
///
/// assert!(is_excluded(10, 10, 21));
/// assert!(!is_excluded(0, 0, 21));
/// ```
pub fn is_excluded(row: usize, col: usize, n: usize) -> bool {
    ExclusionZone::for_grid(n).contains(row, col)
}
