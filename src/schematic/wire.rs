//! wires: plain line segments between two canvas points, no electrical meaning

use serde_json::{json, Value};

use crate::{
    render::{Drawable, RenderTarget, Stroke},
    schematic::interactable::Interactive,
    transforms::{CSBox, CSPoint, CSVec, Point},
};

/// type tag written to documents, kept for format uniformity with devices
pub const TAG: &str = "Wire";

/// default hit-test distance to a wire
pub const DEFAULT_TOLERANCE: f64 = 5.0;

const STROKE_WIDTH: f32 = 2.0;
const PREVIEW_WIDTH: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    pt0: CSPoint,
    pt1: CSPoint,
}

impl Wire {
    pub fn new(pt0: CSPoint, pt1: CSPoint) -> Self {
        Wire { pt0, pt1 }
    }
    pub fn pts(&self) -> (CSPoint, CSPoint) {
        (self.pt0, self.pt1)
    }
    /// moves the second endpoint, used while the wire is being drawn
    pub fn set_end(&mut self, pt1: CSPoint) {
        self.pt1 = pt1;
    }

    /// distance from `csp` to the finite segment
    pub fn distance_to(&self, csp: CSPoint) -> f64 {
        let d = self.pt1 - self.pt0;
        let len_sq = d.square_length();
        if len_sq == 0.0 {
            return (csp - self.pt0).length();
        }
        let t = ((csp - self.pt0).dot(d) / len_sq).clamp(0.0, 1.0);
        let closest = self.pt0 + d * t;
        (csp - closest).length()
    }

    pub fn contains_point(&self, csp: CSPoint, tolerance: f64) -> bool {
        self.distance_to(csp) <= tolerance
    }

    pub fn is_finite(&self) -> bool {
        [self.pt0, self.pt1]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    pub fn serialize(&self) -> Value {
        json!({
            "type": TAG,
            "x1": self.pt0.x,
            "y1": self.pt0.y,
            "x2": self.pt1.x,
            "y2": self.pt1.y,
        })
    }

    fn path(&self) -> lyon::path::Path {
        let mut builder = lyon::path::Path::builder();
        builder.begin(Point::from(self.pt0).into());
        builder.line_to(Point::from(self.pt1).into());
        builder.end(false);
        builder.build()
    }
}

impl Interactive for Wire {
    fn contains_csp(&self, csp: CSPoint) -> bool {
        self.contains_point(csp, DEFAULT_TOLERANCE)
    }
    fn translate(&mut self, csv: CSVec) {
        self.pt0 += csv;
        self.pt1 += csv;
    }
    fn bounds(&self) -> CSBox {
        CSBox::from_points([self.pt0, self.pt1])
    }
}

impl Drawable for Wire {
    fn draw_persistent(&self, _grid_size: f64, target: &mut dyn RenderTarget) {
        target.stroke(&self.path(), &Stroke::solid(STROKE_WIDTH));
    }
    fn draw_preview(&self, _grid_size: f64, target: &mut dyn RenderTarget) {
        target.stroke(&self.path(), &Stroke::highlight(PREVIEW_WIDTH));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5., 4., true)]
    #[case(5., 5., true)]
    #[case(5., 6., false)]
    #[case(-3., 0., true)]
    #[case(-6., 0., false)]
    #[case(13., 4., true)]
    #[case(14., 4., false)]
    fn segment_distance(#[case] x: f64, #[case] y: f64, #[case] hit: bool) {
        let w = Wire::new(CSPoint::new(0., 0.), CSPoint::new(10., 0.));
        assert_eq!(w.contains_point(CSPoint::new(x, y), DEFAULT_TOLERANCE), hit);
    }

    #[test]
    fn clamps_to_segment_not_line() {
        // on the infinite line, far past the end
        let w = Wire::new(CSPoint::new(0., 0.), CSPoint::new(10., 0.));
        assert!(!w.contains_csp(CSPoint::new(100., 0.)));
        assert_eq!(w.distance_to(CSPoint::new(-3., 0.)), 3.);
    }

    #[test]
    fn zero_length_wire() {
        let w = Wire::new(CSPoint::new(20., 20.), CSPoint::new(20., 20.));
        assert!(w.contains_point(CSPoint::new(23., 24.), 5.));
        assert!(!w.contains_point(CSPoint::new(24., 24.), 5.));
    }

    #[test]
    fn only_second_endpoint_moves() {
        let mut w = Wire::new(CSPoint::new(0., 0.), CSPoint::new(0., 0.));
        w.set_end(CSPoint::new(40., 20.));
        assert_eq!(w.pts(), (CSPoint::new(0., 0.), CSPoint::new(40., 20.)));
    }

    #[test]
    fn serialize_fields() {
        let v = Wire::new(CSPoint::new(1., 2.), CSPoint::new(3., 4.)).serialize();
        assert_eq!(v["type"], "Wire");
        assert_eq!(v["x1"], 1.0);
        assert_eq!(v["y2"], 4.0);
        assert_eq!(v.as_object().unwrap().len(), 5);
    }
}
