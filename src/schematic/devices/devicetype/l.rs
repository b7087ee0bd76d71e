//! device definition for coils (inductors)

use std::f32::consts::PI;

use super::Graphics;
use lyon::math::point;

pub const TAG: &str = "Coil";

const LOOPS: usize = 3;
const LEAD: f32 = 5.0;
/// line segments per semicircular loop
const ARC_STEPS: usize = 8;

pub fn graphics(w: f32, h: f32) -> Graphics {
    let r = h / 4.;
    let cy = h / 2.;
    let x_offset = (w - 2. * LOOPS as f32 * r) / 2. - r / 2.;

    // loops bulge upwards, over the lead line
    let mut loops = vec![];
    let mut x = x_offset;
    for _ in 0..LOOPS {
        let cx = x + r;
        for k in 0..=ARC_STEPS {
            if k == 0 && !loops.is_empty() {
                continue;
            }
            let theta = PI + PI * k as f32 / ARC_STEPS as f32;
            loops.push(point(cx + r * theta.cos(), cy + r * theta.sin()));
        }
        x += 2. * r;
    }

    Graphics::new().polylines(2.0, vec![loops]).polylines(
        4.0,
        vec![
            vec![point(-LEAD, cy), point(x_offset, cy)],
            vec![point(x, cy), point(w + LEAD, cy)],
        ],
    )
}
