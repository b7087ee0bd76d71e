//! rendering contract shared by everything that can be painted, plus an svg target

use std::fmt::Write;

use lyon::path::{Path, PathEvent};

use crate::codec;
use crate::config::Config;
use crate::error::Result;
use crate::schematic::Diagram;

/// margin added around the diagram's bounding box in svg output
const SVG_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_rgba(0., 0., 0., 1.);
    pub const RED: Color = Color::from_rgba(1., 0., 0., 1.);

    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }
    pub const fn with_alpha(self, a: f32) -> Self {
        Color { a, ..self }
    }
    /// `#rrggbb`, alpha is emitted separately
    fn hex(&self) -> String {
        let c = |v: f32| (v.clamp(0., 1.) * 255.).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

/// translucency of hover highlights
const HIGHLIGHT_ALPHA: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub fn solid(width: f32) -> Self {
        Stroke {
            width,
            color: Color::BLACK,
        }
    }
    pub fn highlight(width: f32) -> Self {
        Stroke {
            width,
            color: Color::RED.with_alpha(HIGHLIGHT_ALPHA),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub fn highlight() -> Self {
        Fill {
            color: Color::RED.with_alpha(HIGHLIGHT_ALPHA),
        }
    }
}

/// something paths can be painted onto. paths are in canvas coordinates.
pub trait RenderTarget {
    fn stroke(&mut self, path: &Path, stroke: &Stroke);
    fn fill(&mut self, path: &Path, fill: &Fill);
}

pub trait Drawable {
    fn draw_persistent(&self, grid_size: f64, target: &mut dyn RenderTarget);
    fn draw_preview(&self, grid_size: f64, target: &mut dyn RenderTarget);
}

/// collects painted paths as svg `<path>` elements
#[derive(Debug, Default)]
pub struct SvgTarget {
    elements: Vec<String>,
}

impl SvgTarget {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// wraps the collected elements in an `<svg>` document with the given view box
    pub fn finish(self, min_x: f64, min_y: f64, width: f64, height: f64) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{min_x} {min_y} {width} {height}" width="{width}" height="{height}">"#
        );
        for e in &self.elements {
            let _ = writeln!(s, "  {e}");
        }
        s.push_str("</svg>\n");
        s
    }
}

/// svg path data for a lyon path
pub fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for ev in path.iter() {
        let _ = match ev {
            PathEvent::Begin { at } => write!(d, "M{} {} ", at.x, at.y),
            PathEvent::Line { to, .. } => write!(d, "L{} {} ", to.x, to.y),
            PathEvent::Quadratic { ctrl, to, .. } => {
                write!(d, "Q{} {} {} {} ", ctrl.x, ctrl.y, to.x, to.y)
            }
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => write!(
                d,
                "C{} {} {} {} {} {} ",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            ),
            PathEvent::End { close: true, .. } => write!(d, "Z "),
            PathEvent::End { close: false, .. } => Ok(()),
        };
    }
    d.truncate(d.trim_end().len());
    d
}

impl RenderTarget for SvgTarget {
    fn stroke(&mut self, path: &Path, stroke: &Stroke) {
        self.elements.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
            path_data(path),
            stroke.color.hex(),
            stroke.color.a,
            stroke.width
        ));
    }
    fn fill(&mut self, path: &Path, fill: &Fill) {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
            path_data(path),
            fill.color.hex(),
            fill.color.a
        ));
    }
}

/// renders the whole diagram: wires first, then devices, each in z-order
pub fn render_svg(diagram: &Diagram, config: &Config) -> String {
    let mut target = SvgTarget::new();
    diagram.draw(config.grid_size, &mut target);
    let (min_x, min_y, w, h) = match diagram.bounding_box() {
        Some(bb) => (
            bb.min.x - SVG_MARGIN,
            bb.min.y - SVG_MARGIN,
            bb.width() + 2. * SVG_MARGIN,
            // room for the transistor glyph offset
            bb.height() + 2. * SVG_MARGIN + config.grid_size / 2.,
        ),
        None => (0., 0., 2. * SVG_MARGIN, 2. * SVG_MARGIN),
    };
    target.finish(min_x, min_y, w, h)
}

/// renders the diagram and writes it atomically to `path`
pub fn save_svg(diagram: &Diagram, config: &Config, path: &std::path::Path) -> Result<()> {
    codec::write_atomic(path, render_svg(diagram, config).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schematic::{Device, DeviceClass, Wire};
    use crate::transforms::{CSPoint, CSSize};

    #[test]
    fn path_data_format() {
        let mut b = Path::builder();
        b.begin(lyon::math::point(0., 0.));
        b.line_to(lyon::math::point(10., 5.));
        b.end(false);
        b.begin(lyon::math::point(1., 1.));
        b.line_to(lyon::math::point(2., 2.));
        b.end(true);
        assert_eq!(path_data(&b.build()), "M0 0 L10 5 M1 1 L2 2 Z");
    }

    #[test]
    fn wires_are_painted_before_devices() {
        let mut dg = Diagram::new();
        dg.add_device(Device::new(
            DeviceClass::Capacitor,
            CSPoint::new(0., 0.),
            CSSize::new(40., 20.),
        ));
        dg.add_wire(Wire::new(CSPoint::new(-100., 0.), CSPoint::new(-50., 0.)));

        let mut t = SvgTarget::new();
        dg.draw(20., &mut t);
        assert!(t.len() > 1);
        assert!(t.elements()[0].starts_with(r#"<path d="M-100 0 L-50 0""#));
    }

    #[test]
    fn preview_is_translucent_red() {
        let mut t = SvgTarget::new();
        let w = Wire::new(CSPoint::new(0., 0.), CSPoint::new(10., 0.));
        w.draw_preview(20., &mut t);
        let d = Device::new(DeviceClass::Resistor, CSPoint::new(0., 0.), CSSize::new(40., 20.));
        d.draw_preview(20., &mut t);
        assert_eq!(t.len(), 2);
        assert!(t.elements()[0].contains(r##"stroke="#ff0000" stroke-opacity="0.3""##));
        assert!(t.elements()[1].contains(r##"fill="#ff0000" fill-opacity="0.3""##));
    }

    #[test]
    fn empty_diagram_svg() {
        let svg = render_svg(&Diagram::new(), &Config::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<path"));
    }
}
