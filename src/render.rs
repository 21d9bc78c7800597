//! Pattern renderer: turns a module matrix into a styled raster.

use crate::canvas::{Canvas, Raster};
use crate::config::{CanvasSpec, PatternStyle, RenderConfig};
use crate::error::Result;
use crate::exclusion::ExclusionZone;
use crate::matrix::Matrix;
use crate::shapes;

/// Dark modules that will actually be drawn: dark in the matrix and, when a
/// zone is given, outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveModules {
    size: usize,
    cells: Vec<bool>,
    count: usize,
}

impl ActiveModules {
    pub fn collect(matrix: &Matrix, zone: Option<&ExclusionZone>) -> Self {
        let size = matrix.size();
        let mut cells = Vec::with_capacity(size * size);
        let mut count = 0;
        for row in 0..size {
            for col in 0..size {
                let active = matrix.get(row, col) && !zone.is_some_and(|z| z.contains(row, col));
                count += usize::from(active);
                cells.push(active);
            }
        }
        Self { size, cells, count }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Active cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &active)| active)
            .map(move |(i, _)| (i / size, i % size))
    }
}

/// Maps grid cells to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    margin: f32,
    module_size: f32,
}

impl Geometry {
    pub fn new(canvas: &CanvasSpec, modules: usize) -> Self {
        Self {
            margin: canvas.margin as f32,
            module_size: canvas.drawable() / modules.max(1) as f32,
        }
    }

    /// `(size - 2·margin) / N`.
    pub fn module_size(&self) -> f32 {
        self.module_size
    }

    /// Top-left corner of a cell.
    pub fn origin(&self, row: usize, col: usize) -> (f32, f32) {
        (
            self.margin + col as f32 * self.module_size,
            self.margin + row as f32 * self.module_size,
        )
    }

    pub fn center(&self, row: usize, col: usize) -> (f32, f32) {
        let (x, y) = self.origin(row, col);
        let half = self.module_size / 2.0;
        (x + half, y + half)
    }
}

/// Draws every active module of `matrix` in the configured style.
///
/// The background is opaque white unless `transparent_background` is set.
/// With `reserve_center_for_logo` the central exclusion zone stays empty
/// whether or not a logo follows.
///
/// # Errors
///
/// Returns [`Error::InvalidCanvas`](crate::Error::InvalidCanvas) for an
/// unusable [`CanvasSpec`] and [`Error::Surface`](crate::Error::Surface) when
/// the pixmap cannot be allocated.
pub fn render(matrix: &Matrix, config: &RenderConfig, canvas: &CanvasSpec) -> Result<Raster> {
    canvas.validate()?;
    let mut surface = Canvas::new(canvas.size)?;
    if !config.transparent_background {
        surface.fill_white();
    }

    let n = matrix.size();
    let zone = config
        .reserve_center_for_logo
        .then(|| ExclusionZone::for_grid(n));
    let active = ActiveModules::collect(matrix, zone.as_ref());
    let geometry = Geometry::new(canvas, n);
    let m = geometry.module_size();

    match config.pattern {
        PatternStyle::Fluid => {
            if let Some(path) = shapes::fluid_path(&active, &geometry) {
                surface.fill_path(&path, config.dot_color);
            }
        }
        style => {
            for (row, col) in active.iter() {
                let (x, y) = geometry.origin(row, col);
                if let Some(path) = shapes::module_path(style, x, y, m) {
                    surface.fill_path(&path, config.dot_color);
                }
            }
        }
    }

    log::debug!(
        "Rendered {} of {} dark modules as {} ({}x{} grid, module {:.2}px)",
        active.len(),
        matrix.dark_count(),
        config.pattern,
        n,
        n,
        m
    );
    Ok(surface.into_raster(active.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DotColor;
    use crate::exclusion::is_excluded;

    fn full(n: usize) -> Matrix {
        Matrix::from_fn(n, |_, _| true).unwrap()
    }

    fn small_canvas() -> CanvasSpec {
        CanvasSpec {
            size: 240,
            margin: 20,
            ..CanvasSpec::default()
        }
    }

    #[test]
    fn test_drawn_count_matches_exclusion_predicate() {
        for n in [5, 21, 29, 33] {
            let matrix = Matrix::from_fn(n, |row, col| (row * 7 + col * 3) % 5 != 0).unwrap();
            let expected = (0..n)
                .flat_map(|row| (0..n).map(move |col| (row, col)))
                .filter(|&(row, col)| matrix.get(row, col) && !is_excluded(row, col, n))
                .count();
            for style in PatternStyle::ALL {
                let config = RenderConfig {
                    pattern: style,
                    ..RenderConfig::default()
                };
                let raster = render(&matrix, &config, &small_canvas()).unwrap();
                assert_eq!(raster.modules_drawn(), expected, "n={n} style={style}");
            }
        }
    }

    #[test]
    fn test_unreserved_center_draws_every_dark_module() {
        let matrix = full(21);
        let config = RenderConfig {
            reserve_center_for_logo: false,
            ..RenderConfig::default()
        };
        let raster = render(&matrix, &config, &small_canvas()).unwrap();
        assert_eq!(raster.modules_drawn(), 21 * 21);
        assert_eq!(raster.pixel(120, 120), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_reserved_center_stays_background() {
        let raster = render(&full(21), &RenderConfig::default(), &small_canvas()).unwrap();
        assert_eq!(raster.pixel(120, 120), Some([255, 255, 255, 255]));
        // Corner module is drawn; quiet zone is not.
        assert_eq!(raster.pixel(25, 25), Some([0, 0, 0, 255]));
        assert_eq!(raster.pixel(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_transparent_background_keeps_module_placement() {
        let matrix = Matrix::from_fn(25, |row, col| (row + col) % 3 == 0).unwrap();
        for style in PatternStyle::ALL {
            let opaque = RenderConfig {
                pattern: style,
                ..RenderConfig::default()
            };
            let clear = RenderConfig {
                transparent_background: true,
                ..opaque
            };
            let a = render(&matrix, &opaque, &small_canvas()).unwrap();
            let b = render(&matrix, &clear, &small_canvas()).unwrap();
            assert_eq!(a.modules_drawn(), b.modules_drawn());
            assert_eq!(b.pixel(5, 5), Some([0, 0, 0, 0]));
            // Wherever the transparent render is fully covered, both agree.
            for (pa, pb) in a.to_image().pixels().zip(b.to_image().pixels()) {
                if pb[3] == 255 {
                    assert_eq!(pa, pb, "style={style}");
                }
            }
        }
    }

    #[test]
    fn test_dot_color_is_applied() {
        let config = RenderConfig {
            dot_color: DotColor::rgb(0x12, 0x34, 0x56),
            ..RenderConfig::default()
        };
        let raster = render(&full(21), &config, &small_canvas()).unwrap();
        assert_eq!(raster.pixel(25, 25), Some([0x12, 0x34, 0x56, 255]));
    }

    #[test]
    fn test_fluid_bridges_horizontal_neighbours() {
        // Two dark cells side by side in the top-left corner, far from the zone.
        let pair = Matrix::from_fn(10, |row, col| row == 0 && col < 2).unwrap();
        let single = Matrix::from_fn(10, |row, col| row == 0 && col == 0).unwrap();
        let canvas = CanvasSpec::default();
        let geometry = Geometry::new(&canvas, 10);
        let m = geometry.module_size();
        let (gap_x, gap_y) = (canvas.margin as f32 + m, canvas.margin as f32 + m / 2.0);

        let fluid = RenderConfig {
            pattern: PatternStyle::Fluid,
            ..RenderConfig::default()
        };
        let merged = render(&pair, &fluid, &canvas).unwrap();
        assert_eq!(merged.modules_drawn(), 2);
        assert_eq!(merged.pixel(gap_x as u32, gap_y as u32), Some([0, 0, 0, 255]));

        let alone = render(&single, &fluid, &canvas).unwrap();
        assert_eq!(alone.pixel(gap_x as u32, gap_y as u32), Some([255, 255, 255, 255]));

        let dots = RenderConfig {
            pattern: PatternStyle::Dots,
            ..RenderConfig::default()
        };
        let separate = render(&pair, &dots, &canvas).unwrap();
        assert_eq!(separate.pixel(gap_x as u32, gap_y as u32), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_fluid_bridges_vertical_neighbours() {
        let pair = Matrix::from_fn(10, |row, col| col == 0 && row < 2).unwrap();
        let canvas = CanvasSpec::default();
        let m = Geometry::new(&canvas, 10).module_size();
        let (gap_x, gap_y) = (canvas.margin as f32 + m / 2.0, canvas.margin as f32 + m);
        let fluid = RenderConfig {
            pattern: PatternStyle::Fluid,
            ..RenderConfig::default()
        };
        let merged = render(&pair, &fluid, &canvas).unwrap();
        assert_eq!(merged.pixel(gap_x as u32, gap_y as u32), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let matrix = Matrix::from_fn(29, |row, col| (row ^ col) & 1 == 1).unwrap();
        for style in PatternStyle::ALL {
            let config = RenderConfig {
                pattern: style,
                ..RenderConfig::default()
            };
            let a = render(&matrix, &config, &small_canvas()).unwrap();
            let b = render(&matrix, &config, &small_canvas()).unwrap();
            assert_eq!(a, b, "style={style}");
        }
    }

    #[test]
    fn test_invalid_canvas_is_rejected() {
        let canvas = CanvasSpec {
            size: 0,
            ..CanvasSpec::default()
        };
        assert!(render(&full(21), &RenderConfig::default(), &canvas).is_err());
    }

    #[test]
    fn test_active_modules_iterates_row_major() {
        let matrix = Matrix::from_fn(3, |row, col| row == col).unwrap();
        let active = ActiveModules::collect(&matrix, None);
        assert_eq!(active.iter().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(active.len(), 3);
        assert!(!active.contains(0, 3));
    }
}
