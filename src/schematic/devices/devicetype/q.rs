//! device definition for bipolar transistors

use super::Graphics;
use crate::transforms::CSVec;
use lyon::math::point;

pub const TAG: &str = "Transistor";

pub fn graphics(w: f32, h: f32) -> Graphics {
    let (cx, cy) = (w / 2., h / 2.);
    let r = w.min(h) / 4.;
    Graphics::new()
        .polylines(
            2.0,
            vec![
                // collector, emitter, base
                vec![point(cx, 0.), point(cx, h / 4.)],
                vec![point(cx, h), point(cx, 3. * h / 4.)],
                vec![point(0., cy), point(w / 4., cy)],
                // chevron
                vec![point(cx, cy - r), point(cx - r, cy), point(cx, cy + r)],
            ],
        )
        .circle(2.0, point(cx, cy), r)
}

/// the glyph sits half a grid step below the hit-test box
pub fn draw_offset(grid_size: f64) -> CSVec {
    CSVec::new(0., grid_size / 2.)
}
