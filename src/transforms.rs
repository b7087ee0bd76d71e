//! types and constants facillitating geometry and transforms

use euclid::{Point2D, Transform2D};
use lyon::math::Point as LyonPoint;
use serde::{Deserialize, Serialize};

/// PhantomData tag used to denote the canvas on which the diagram is drawn (f64, y pointing down)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct CanvasSpace;

/// PhantomData tag used to denote the unrotated frame of a single device, origin at the device center
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct LocalSpace;

/// CanvasSpace Point
pub type CSPoint = euclid::Point2D<f64, CanvasSpace>;
/// LocalSpace Point
pub type LSPoint = euclid::Point2D<f64, LocalSpace>;

/// CanvasSpace Vector
pub type CSVec = euclid::Vector2D<f64, CanvasSpace>;
/// LocalSpace Vector
pub type LSVec = euclid::Vector2D<f64, LocalSpace>;

/// CanvasSpace Size
pub type CSSize = euclid::Size2D<f64, CanvasSpace>;

/// CanvasSpace Box
pub type CSBox = euclid::Box2D<f64, CanvasSpace>;
/// LocalSpace Box
pub type LSBox = euclid::Box2D<f64, LocalSpace>;

/// canvas to canvas space transform
pub type CSTransform = euclid::Transform2D<f64, CanvasSpace, CanvasSpace>;
/// canvas to local space transform
pub type CLTransform = euclid::Transform2D<f64, CanvasSpace, LocalSpace>;
/// local to canvas space transform
pub type LCTransform = euclid::Transform2D<f64, LocalSpace, CanvasSpace>;

/// a rotation in degrees, always normalized into `[0, 360)`.
/// kept as whole quarter turns plus a residual in `[0, 90)`, so quarter turn steps never accumulate rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Rotation {
    quarters: u8,
    residual: f64,
}

impl Rotation {
    /// quarter turn, the only step the editor ever applies
    pub const QUARTER: f64 = 90.0;

    pub fn new(degrees: f64) -> Self {
        let mut r = degrees.rem_euclid(360.0);
        // rem_euclid of a tiny negative value rounds up to exactly 360
        if r >= 360.0 {
            r = 0.0;
        }
        // NaN casts to 0 and stays in the residual
        let mut quarters = (r / Self::QUARTER).floor().clamp(0.0, 3.0) as u8;
        // the division may round up across a quarter boundary
        if r < quarters as f64 * Self::QUARTER {
            quarters -= 1;
        }
        // exact: r and the quarter boundary are within a factor of two of each other
        let residual = r - quarters as f64 * Self::QUARTER;
        Rotation { quarters, residual }
    }
    pub fn degrees(&self) -> f64 {
        self.quarters as f64 * Self::QUARTER + self.residual
    }
    pub fn is_finite(&self) -> bool {
        self.residual.is_finite()
    }
    pub fn rotated_by(&self, delta: f64) -> Self {
        let turns = delta / Self::QUARTER;
        if turns.is_finite() && turns.fract() == 0.0 {
            Rotation {
                quarters: (self.quarters as f64 + turns).rem_euclid(4.0) as u8,
                residual: self.residual,
            }
        } else {
            Rotation::new(self.degrees() + delta)
        }
    }
    /// returns (sin, cos). exact for multiples of 90 degrees.
    pub fn sin_cos(&self) -> (f64, f64) {
        let (s, c) = if self.residual == 0.0 {
            (0.0, 1.0)
        } else {
            self.residual.to_radians().sin_cos()
        };
        match self.quarters {
            0 => (s, c),
            1 => (c, -s),
            2 => (-s, -c),
            _ => (-c, s),
        }
    }
    /// forward rotation about the origin: x' = x cos - y sin, y' = x sin + y cos
    pub fn transform<U>(&self) -> Transform2D<f64, U, U> {
        let (s, c) = self.sin_cos();
        Transform2D::new(c, s, -s, c, 0.0, 0.0)
    }
    /// rotation by the negative angle, undoing [`Rotation::transform`]
    pub fn inverse_transform<U>(&self) -> Transform2D<f64, U, U> {
        let (s, c) = self.sin_cos();
        Transform2D::new(c, -s, s, c, 0.0, 0.0)
    }
}

/// snaps a single coordinate to the nearest multiple of `grid`. a non-positive grid disables snapping.
pub fn snap(v: f64, grid: f64) -> f64 {
    if grid > 0.0 {
        grid * (v / grid).round()
    } else {
        v
    }
}

/// snaps both coordinates of a canvas point
pub fn snap_point(csp: CSPoint, grid: f64) -> CSPoint {
    CSPoint::new(snap(csp.x, grid), snap(csp.y, grid))
}

/// converts a canvas transform into the f32 transform lyon paths are built with
pub fn cst_to_lyon(cst: &CSTransform) -> lyon::math::Transform {
    cst.cast::<f32>().with_source().with_destination()
}

/// Newtype for working with lyon::math::Point and euclid::Point2D s
#[derive(Debug, Copy, Clone)]
pub struct Point(CSPoint);

impl From<LyonPoint> for Point {
    fn from(src: LyonPoint) -> Self {
        Point(Point2D::new(src.x as f64, src.y as f64))
    }
}

impl From<Point> for LyonPoint {
    fn from(src: Point) -> Self {
        LyonPoint::new(src.0.x as f32, src.0.y as f32)
    }
}

impl From<Point> for CSPoint {
    fn from(src: Point) -> Self {
        src.0
    }
}

impl From<CSPoint> for Point {
    fn from(src: CSPoint) -> Self {
        Self(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_normalizes() {
        assert_eq!(Rotation::new(0.0).degrees(), 0.0);
        assert_eq!(Rotation::new(360.0).degrees(), 0.0);
        assert_eq!(Rotation::new(450.0).degrees(), 90.0);
        assert_eq!(Rotation::new(-90.0).degrees(), 270.0);
        assert_eq!(Rotation::new(-1e-20).degrees(), 0.0);
        assert_eq!(Rotation::new(33.3).degrees(), 33.3);
        assert_eq!(Rotation::new(359.9).degrees(), 359.9);
        assert_eq!(Rotation::new(180.0 - 1e-13).degrees(), 180.0 - 1e-13);
    }

    #[test]
    fn quarter_steps_are_lossless() {
        for start in [0.1, 33.3, 0.001, 100.1, 359.9] {
            let r = Rotation::new(start);
            let mut q = r;
            for _ in 0..4 {
                q = q.rotated_by(Rotation::QUARTER);
                assert!(q.degrees() < 360.0);
            }
            assert_eq!(q, r);
            assert_eq!(r.rotated_by(-Rotation::QUARTER).rotated_by(Rotation::QUARTER), r);
            assert_eq!(r.rotated_by(720.0), r);
        }
        // non quarter deltas still normalize
        assert_eq!(Rotation::new(350.0).rotated_by(20.0).degrees(), 10.0);
    }

    #[test]
    fn sin_cos_by_quadrant() {
        let (s, c) = Rotation::new(180.0).sin_cos();
        assert_eq!((s, c), (0.0, -1.0));
        let (s, c) = Rotation::new(270.0).sin_cos();
        assert_eq!((s, c), (-1.0, 0.0));
        let (s, c) = Rotation::new(120.0).sin_cos();
        assert!((s - 120f64.to_radians().sin()).abs() < 1e-12);
        assert!((c - 120f64.to_radians().cos()).abs() < 1e-12);
    }

    #[test]
    fn non_finite_rotation() {
        assert!(!Rotation::new(f64::NAN).is_finite());
        assert!(!Rotation::new(0.0).rotated_by(f64::INFINITY).is_finite());
        assert!(Rotation::new(12.0).is_finite());
    }

    #[test]
    fn quarter_turns_are_exact() {
        let t: CSTransform = Rotation::new(90.0).transform();
        let p = t.transform_point(CSPoint::new(1.0, 0.0));
        assert_eq!(p, CSPoint::new(0.0, 1.0));

        let inv: CSTransform = Rotation::new(90.0).inverse_transform();
        assert_eq!(inv.transform_point(p), CSPoint::new(1.0, 0.0));
    }

    #[test]
    fn snapping() {
        assert_eq!(snap(29.0, 20.0), 20.0);
        assert_eq!(snap(31.0, 20.0), 40.0);
        assert_eq!(snap(-9.0, 20.0), 0.0);
        assert_eq!(snap(13.3, 0.0), 13.3);
    }
}
