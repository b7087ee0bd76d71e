//! device definition for capacitors

use super::Graphics;
use lyon::math::point;

pub const TAG: &str = "Capacitor";

pub fn graphics(w: f32, h: f32) -> Graphics {
    let gap = w / 4.;
    let (left, right) = (w / 2. - gap, w / 2. + gap);
    Graphics::new()
        .polylines(
            3.0,
            vec![
                vec![point(left, 0.), point(left, h)],
                vec![point(right, 0.), point(right, h)],
            ],
        )
        .polylines(
            2.0,
            vec![
                vec![point(0., h / 2.), point(left, h / 2.)],
                vec![point(right, h / 2.), point(w, h / 2.)],
            ],
        )
}
