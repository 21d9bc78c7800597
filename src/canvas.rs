//! Drawing surface with scoped clip and shadow state.
//!
//! [`Canvas`] wraps a `tiny_skia` pixmap and keeps a small state stack, in the
//! spirit of a 2D canvas context. Transient effects live in [`DrawState`] and
//! are only reachable through [`Canvas::save`], whose guard puts the previous
//! state back when it is dropped, on every exit path.

use crate::config::DotColor;
use crate::error::{Error, Result};
use image::{imageops, Rgba, RgbaImage};
use std::ops::{Deref, DerefMut};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, IntSize, Mask, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Transform,
};

/// A finished, fixed-resolution pixel buffer.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: Pixmap,
    modules_drawn: usize,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Number of module shapes the pattern pass drew.
    pub fn modules_drawn(&self) -> usize {
        self.modules_drawn
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Copies the raster into an `image` buffer with straight alpha.
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width(), self.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.modules_drawn == other.modules_drawn
            && self.data() == other.data()
    }
}

impl Eq for Raster {}

/// Soft drop shadow applied to image draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Opacity of the black shadow color.
    pub opacity: f32,
    /// Blur radius in the canvas sense; the gaussian sigma is half of it.
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shadow {
    /// Faint shadow below the logo: 10% black, blur 8, two pixels down.
    pub const LOGO: Shadow = Shadow {
        opacity: 0.1,
        blur: 8.0,
        offset_x: 0.0,
        offset_y: 2.0,
    };

    fn sigma(&self) -> f32 {
        self.blur / 2.0
    }

    /// Builds the shadow of everything drawn in `layer` inside `bounds`
    /// (x, y, width, height). Returns the shadow and its top-left position.
    fn cast(&self, layer: &Pixmap, bounds: (f32, f32, f32, f32)) -> Option<(Pixmap, i32, i32)> {
        let sigma = self.sigma();
        let pad = (sigma * 3.0).ceil() as i64 + 1;
        let (bx, by, bw, bh) = bounds;
        let x0 = (bx.floor() as i64 - pad).max(0);
        let y0 = (by.floor() as i64 - pad).max(0);
        let x1 = ((bx + bw).ceil() as i64 + pad).min(i64::from(layer.width()));
        let y1 = ((by + bh).ceil() as i64 + pad).min(i64::from(layer.height()));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);

        let alpha = RgbaImage::from_fn(w, h, |x, y| {
            let a = layer
                .pixel(x0 as u32 + x, y0 as u32 + y)
                .map_or(0, |p| p.alpha());
            Rgba([0, 0, 0, (f32::from(a) * self.opacity).round() as u8])
        });
        let blurred = if sigma > 0.0 {
            imageops::blur(&alpha, sigma)
        } else {
            alpha
        };

        // Black stays black under premultiplication, so the bytes can go in as-is.
        let size = IntSize::from_wh(w, h)?;
        let shadow = Pixmap::from_vec(blurred.into_raw(), size)?;
        let dx = x0 as i32 + self.offset_x.round() as i32;
        let dy = y0 as i32 + self.offset_y.round() as i32;
        Some((shadow, dx, dy))
    }
}

/// Transient drawing effects.
#[derive(Clone, Default)]
pub struct DrawState {
    clip: Option<Mask>,
    shadow: Option<Shadow>,
}

impl std::fmt::Debug for DrawState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawState")
            .field("clipped", &self.clip.is_some())
            .field("shadow", &self.shadow)
            .finish()
    }
}

/// A square drawing surface.
#[derive(Debug)]
pub struct Canvas {
    pixmap: Pixmap,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Canvas {
    /// Allocates a fully transparent `size`×`size` surface.
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size).ok_or(Error::Surface {
            width: size,
            height: size,
        })?;
        Ok(Self {
            pixmap,
            state: DrawState::default(),
            saved: Vec::new(),
        })
    }

    /// Reopens a finished raster for further drawing.
    pub fn from_raster(raster: Raster) -> (Self, usize) {
        let canvas = Self {
            pixmap: raster.pixmap,
            state: DrawState::default(),
            saved: Vec::new(),
        };
        (canvas, raster.modules_drawn)
    }

    pub fn into_raster(self, modules_drawn: usize) -> Raster {
        Raster {
            pixmap: self.pixmap,
            modules_drawn,
        }
    }

    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn clip(&self) -> Option<&Mask> {
        self.state.clip.as_ref()
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        self.state.shadow.as_ref()
    }

    /// Number of saved states not yet restored.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Pushes the current state. Dropping the guard restores it.
    pub fn save(&mut self) -> StateGuard<'_> {
        self.saved.push(self.state.clone());
        StateGuard { canvas: self }
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    pub fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = Some(shadow);
    }

    /// Intersects the clip region with a circle.
    pub fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        let size = self.size();
        let mut mask = Mask::new(size, size).ok_or(Error::Surface {
            width: size,
            height: size,
        })?;
        // A degenerate circle leaves the mask empty, hiding everything.
        if let Some(circle) = PathBuilder::from_circle(cx, cy, radius) {
            mask.fill_path(&circle, FillRule::Winding, true, Transform::identity());
        }
        if let Some(current) = &self.state.clip {
            for (m, c) in mask.data_mut().iter_mut().zip(current.data()) {
                *m = ((u16::from(*m) * u16::from(*c)) / 255) as u8;
            }
        }
        self.state.clip = Some(mask);
        Ok(())
    }

    /// Replaces every pixel with opaque white.
    pub fn fill_white(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    /// Fills `path` with an opaque color using non-zero winding, so
    /// overlapping subpaths merge.
    pub fn fill_path(&mut self, path: &Path, color: DotColor) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        paint.anti_alias = true;
        let clip = self.state.clip.as_ref();
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), clip);
    }

    /// Fills a circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: DotColor) {
        if let Some(circle) = PathBuilder::from_circle(cx, cy, radius) {
            self.fill_path(&circle, color);
        }
    }

    /// Draws `image` scaled into the rectangle `(x, y, width, height)` with
    /// bicubic resampling, honouring the current shadow and clip.
    pub fn draw_image(
        &mut self,
        image: &RgbaImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        let (iw, ih) = image.dimensions();
        let source = pixmap_from_image(image)?;
        let size = self.size();
        let mut layer = Pixmap::new(size, size).ok_or(Error::Surface {
            width: size,
            height: size,
        })?;
        let transform =
            Transform::from_row(width / iw as f32, 0.0, 0.0, height / ih as f32, x, y);
        let smooth = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        layer.draw_pixmap(0, 0, source.as_ref(), &smooth, transform, None);

        let clip = self.state.clip.as_ref();
        if let Some(shadow) = self.state.shadow {
            if let Some((cast, dx, dy)) = shadow.cast(&layer, (x, y, width, height)) {
                self.pixmap.draw_pixmap(
                    dx,
                    dy,
                    cast.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    clip,
                );
            }
        }
        self.pixmap.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            clip,
        );
        Ok(())
    }
}

/// Restores the canvas state it was created from when dropped.
pub struct StateGuard<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for StateGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

fn pixmap_from_image(image: &RgbaImage) -> Result<Pixmap> {
    let (w, h) = image.dimensions();
    let mut pixmap = Pixmap::new(w, h).ok_or(Error::Surface {
        width: w,
        height: h,
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}
