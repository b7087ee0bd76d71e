//! the closed set of device classes and their glyphs

pub mod c;
pub mod l;
pub mod q;
pub mod r;

use std::fmt;
use std::str::FromStr;

use lyon::math::{Point, Transform};
use lyon::path::{Path, Winding};

use crate::config::Config;
use crate::error::Error;
use crate::transforms::{CSSize, CSVec};

/// a single stroked path of a glyph
#[derive(Debug, Clone)]
pub struct Stroked {
    pub width: f32,
    pub path: Path,
}

/// glyph of a device, in the device's box frame `[0, w] x [0, h]`
#[derive(Debug, Clone, Default)]
pub struct Graphics {
    pub strokes: Vec<Stroked>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }
    /// adds one stroke made up of open polylines
    pub fn polylines(mut self, width: f32, pts: Vec<Vec<Point>>) -> Self {
        let mut builder = Path::builder();
        for line in pts.iter().filter(|l| l.len() > 1) {
            builder.begin(line[0]);
            for p in &line[1..] {
                builder.line_to(*p);
            }
            builder.end(false);
        }
        self.strokes.push(Stroked {
            width,
            path: builder.build(),
        });
        self
    }
    pub fn circle(mut self, width: f32, center: Point, radius: f32) -> Self {
        let mut builder = Path::builder();
        builder.add_circle(center, radius, Winding::Positive);
        self.strokes.push(Stroked {
            width,
            path: builder.build(),
        });
        self
    }
    pub fn transformed(&self, t: &Transform) -> Self {
        Graphics {
            strokes: self
                .strokes
                .iter()
                .map(|s| Stroked {
                    width: s.width,
                    path: s.path.clone().transformed(t),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Resistor,
    Capacitor,
    Coil,
    Transistor,
}

impl DeviceClass {
    pub const ALL: [DeviceClass; 4] = [
        DeviceClass::Resistor,
        DeviceClass::Capacitor,
        DeviceClass::Coil,
        DeviceClass::Transistor,
    ];

    /// type tag, used for display and as the document `type` field
    pub fn tag(&self) -> &'static str {
        match self {
            DeviceClass::Resistor => r::TAG,
            DeviceClass::Capacitor => c::TAG,
            DeviceClass::Coil => l::TAG,
            DeviceClass::Transistor => q::TAG,
        }
    }

    pub fn default_size(&self, config: &Config) -> CSSize {
        match self {
            DeviceClass::Transistor => CSSize::new(config.transistor_size, config.transistor_size),
            _ => CSSize::new(config.device_width, config.device_height),
        }
    }

    /// glyph for a device of the given size
    pub fn graphics(&self, size: CSSize) -> Graphics {
        let (w, h) = (size.width as f32, size.height as f32);
        match self {
            DeviceClass::Resistor => r::graphics(w, h),
            DeviceClass::Capacitor => c::graphics(w, h),
            DeviceClass::Coil => l::graphics(w, h),
            DeviceClass::Transistor => q::graphics(w, h),
        }
    }

    /// shift of the drawn glyph relative to the hit-test box.
    /// only the transistor has one; its hit box is deliberately left where it is.
    pub fn draw_offset(&self, grid_size: f64) -> CSVec {
        match self {
            DeviceClass::Transistor => q::draw_offset(grid_size),
            _ => CSVec::zero(),
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DeviceClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceClass::ALL
            .into_iter()
            .find(|c| c.tag() == s)
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for class in DeviceClass::ALL {
            assert_eq!(class.tag().parse::<DeviceClass>().unwrap(), class);
        }
    }

    #[test]
    fn unknown_tag() {
        match "Diode".parse::<DeviceClass>() {
            Err(Error::UnknownVariant(s)) => assert_eq!(s, "Diode"),
            other => panic!("unexpected {other:?}"),
        }
        // tags are case sensitive
        assert!("resistor".parse::<DeviceClass>().is_err());
    }

    #[test]
    fn default_sizes() {
        let cfg = Config::default();
        assert_eq!(
            DeviceClass::Resistor.default_size(&cfg),
            CSSize::new(40.0, 20.0)
        );
        assert_eq!(
            DeviceClass::Transistor.default_size(&cfg),
            CSSize::new(40.0, 40.0)
        );
    }

    #[test]
    fn every_class_has_a_glyph() {
        for class in DeviceClass::ALL {
            let g = class.graphics(CSSize::new(40.0, 20.0));
            assert!(!g.strokes.is_empty(), "{class} has no strokes");
            assert!(g.strokes.iter().all(|s| s.path.iter().next().is_some()));
        }
    }
}
