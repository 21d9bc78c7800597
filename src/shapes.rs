//! Path geometry for each pattern style.
//!
//! All shapes are expressed in canvas pixels from a module's top-left origin
//! `(x, y)` and its side `m`. Subpaths are wound clockwise so that several of
//! them filled together with non-zero winding form a union.

use crate::config::PatternStyle;
use crate::render::{ActiveModules, Geometry};
use std::f32::consts::PI;
use tiny_skia::{Path, PathBuilder, Rect};

/// Cubic control point offset that approximates a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Builds the shape for one module. Returns `None` for [`PatternStyle::Fluid`],
/// which is drawn as a whole, and for degenerate sizes.
pub fn module_path(style: PatternStyle, x: f32, y: f32, m: f32) -> Option<Path> {
    let cx = x + m / 2.0;
    let cy = y + m / 2.0;
    match style {
        PatternStyle::Square => Rect::from_xywh(x, y, m, m).map(PathBuilder::from_rect),
        PatternStyle::Rounded => {
            let mut pb = PathBuilder::new();
            push_round_rect(&mut pb, x, y, m, m, m * 0.3);
            pb.finish()
        }
        PatternStyle::Circle => PathBuilder::from_circle(cx, cy, m / 2.2),
        PatternStyle::Dots => PathBuilder::from_circle(cx, cy, m / 3.0),
        PatternStyle::Diamond => polygon(&[(cx, y), (x + m, cy), (cx, y + m), (x, cy)]),
        PatternStyle::Hexagon => {
            let r = m / 2.5;
            let points: Vec<(f32, f32)> = (0..6)
                .map(|i| {
                    let angle = i as f32 * PI / 3.0;
                    (cx + r * angle.cos(), cy + r * angle.sin())
                })
                .collect();
            polygon(&points)
        }
        PatternStyle::Star => {
            let outer = m / 2.5;
            let points: Vec<(f32, f32)> = (0..10)
                .map(|i| {
                    let angle = i as f32 * PI / 5.0 - PI / 2.0;
                    let r = if i % 2 == 0 { outer } else { outer / 2.0 };
                    (cx + r * angle.cos(), cy + r * angle.sin())
                })
                .collect();
            polygon(&points)
        }
        PatternStyle::Cross => {
            let len = m * 0.8;
            let thick = m * 0.3;
            let mut pb = PathBuilder::new();
            pb.push_rect(Rect::from_xywh(cx - len / 2.0, cy - thick / 2.0, len, thick)?);
            pb.push_rect(Rect::from_xywh(cx - thick / 2.0, cy - len / 2.0, thick, len)?);
            pb.finish()
        }
        PatternStyle::Plus => {
            let len = m * 0.7;
            let thick = m * 0.25;
            let r = thick / 2.0;
            let mut pb = PathBuilder::new();
            push_round_rect(&mut pb, cx - len / 2.0, cy - thick / 2.0, len, thick, r);
            push_round_rect(&mut pb, cx - thick / 2.0, cy - len / 2.0, thick, len, r);
            pb.finish()
        }
        PatternStyle::Fluid => None,
    }
}

/// Builds the single merged path for the fluid style: a rounded body per
/// active module, plus bridges towards active right and down neighbours.
pub fn fluid_path(active: &ActiveModules, geometry: &Geometry) -> Option<Path> {
    let m = geometry.module_size();
    let mut pb = PathBuilder::new();
    for (row, col) in active.iter() {
        let (x, y) = geometry.center(row, col);
        push_round_rect(&mut pb, x - m * 0.4, y - m * 0.4, m * 0.8, m * 0.8, m * 0.2);
        if active.contains(row, col + 1) {
            push_round_rect(&mut pb, x + m * 0.2, y - m * 0.15, m * 0.6, m * 0.3, m * 0.1);
        }
        if active.contains(row + 1, col) {
            push_round_rect(&mut pb, x - m * 0.15, y + m * 0.2, m * 0.3, m * 0.6, m * 0.1);
        }
    }
    pb.finish()
}

/// Appends a clockwise rounded rectangle. The radius is clamped to half the
/// shorter side.
pub fn push_round_rect(pb: &mut PathBuilder, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
}

fn polygon(points: &[(f32, f32)]) -> Option<Path> {
    let (&(fx, fy), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(fx, fy);
    for &(px, py) in rest {
        pb.line_to(px, py);
    }
    pb.close();
    pb.finish()
}
