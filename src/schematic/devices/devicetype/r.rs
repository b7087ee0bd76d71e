//! device definition for resistors

use super::Graphics;
use lyon::math::point;

pub const TAG: &str = "Resistor";

/// length of the leads sticking out of either side of the box
const LEAD: f32 = 10.0;
/// number of zig-zag segments across the body
const SEGMENTS: usize = 8;

pub fn graphics(w: f32, h: f32) -> Graphics {
    let seg = w / SEGMENTS as f32;
    let mut zigzag = vec![point(0., h / 2.)];
    for i in 1..SEGMENTS {
        let y = if i % 2 == 1 { 0. } else { h };
        zigzag.push(point(seg * i as f32, y));
    }
    zigzag.push(point(w, h / 2.));

    Graphics::new().polylines(2.0, vec![zigzag]).polylines(
        4.0,
        vec![
            vec![point(-LEAD, h / 2.), point(0., h / 2.)],
            vec![point(w, h / 2.), point(w + LEAD, h / 2.)],
        ],
    )
}
