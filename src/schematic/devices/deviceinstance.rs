use serde_json::{json, Value};

use super::devicetype::{DeviceClass, Graphics};
use crate::{
    render::{Drawable, Fill, RenderTarget, Stroke},
    schematic::interactable::Interactive,
    transforms::{
        cst_to_lyon, CLTransform, CSBox, CSPoint, CSSize, CSTransform, CSVec, LCTransform, LSBox,
        LSPoint, LocalSpace, Rotation,
    },
};

/// a placed device: a class tag plus its box geometry.
/// `origin` is the top-left corner of the unrotated box; rotation is about the box center.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    class: DeviceClass,
    origin: CSPoint,
    size: CSSize,
    rotation: Rotation,
}

impl Device {
    pub fn new(class: DeviceClass, origin: CSPoint, size: CSSize) -> Self {
        Device {
            class,
            origin,
            size,
            rotation: Rotation::default(),
        }
    }
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Rotation::new(degrees);
        self
    }
    pub fn class(&self) -> DeviceClass {
        self.class
    }
    pub fn origin(&self) -> CSPoint {
        self.origin
    }
    pub fn set_origin(&mut self, origin: CSPoint) {
        self.origin = origin;
    }
    pub fn size(&self) -> CSSize {
        self.size
    }
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = Rotation::new(degrees);
    }
    pub fn rotate_by(&mut self, delta_degrees: f64) {
        self.rotation = self.rotation.rotated_by(delta_degrees);
    }
    pub fn center(&self) -> CSPoint {
        self.origin + self.size.to_vector() / 2.0
    }
    pub fn set_center(&mut self, center: CSPoint) {
        self.origin = center - self.size.to_vector() / 2.0;
    }

    /// the nominal box in the local frame, `[-w/2, w/2] x [-h/2, h/2]`
    pub fn local_box(&self) -> LSBox {
        let half = self.size.to_vector().cast_unit::<LocalSpace>() / 2.0;
        LSBox::new(LSPoint::origin() - half, LSPoint::origin() + half)
    }
    /// inverse transform: move the center to the origin, then undo the rotation
    pub fn canvas_to_local(&self) -> CLTransform {
        let c = self.center();
        CLTransform::translation(-c.x, -c.y).then(&self.rotation.inverse_transform())
    }
    pub fn local_to_canvas(&self) -> LCTransform {
        let c = self.center();
        self.rotation
            .transform::<LocalSpace>()
            .then(&LCTransform::translation(c.x, c.y))
    }

    /// inclusive hit-test against the rotated nominal box
    pub fn contains_point(&self, csp: CSPoint) -> bool {
        let lsp = self.canvas_to_local().transform_point(csp);
        let b = self.local_box();
        lsp.x >= b.min.x && lsp.x <= b.max.x && lsp.y >= b.min.y && lsp.y <= b.max.y
    }

    /// false if any coordinate, dimension or the rotation is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.origin.x.is_finite()
            && self.origin.y.is_finite()
            && self.size.width.is_finite()
            && self.size.height.is_finite()
            && self.rotation.is_finite()
    }

    pub fn serialize(&self) -> Value {
        json!({
            "type": self.class.tag(),
            "x": self.origin.x,
            "y": self.origin.y,
            "width": self.size.width,
            "height": self.size.height,
            "rotation": self.rotation.degrees(),
        })
    }

    /// maps the glyph frame `[0, w] x [0, h]` onto the canvas, shifted by `offset`
    fn glyph_transform(&self, offset: CSVec) -> CSTransform {
        let c = self.center() + offset;
        CSTransform::translation(-self.size.width / 2.0, -self.size.height / 2.0)
            .then(&self.rotation.transform())
            .then_translate(c.to_vector())
    }

    /// the device glyph in canvas coordinates
    pub fn graphics(&self, grid_size: f64) -> Graphics {
        let t = self.glyph_transform(self.class.draw_offset(grid_size));
        self.class.graphics(self.size).transformed(&cst_to_lyon(&t))
    }
}

impl Interactive for Device {
    fn contains_csp(&self, csp: CSPoint) -> bool {
        self.contains_point(csp)
    }
    fn translate(&mut self, csv: CSVec) {
        self.origin += csv;
    }
    fn bounds(&self) -> CSBox {
        self.local_to_canvas().outer_transformed_box(&self.local_box())
    }
}

impl Drawable for Device {
    fn draw_persistent(&self, grid_size: f64, target: &mut dyn RenderTarget) {
        for s in self.graphics(grid_size).strokes {
            target.stroke(&s.path, &Stroke::solid(s.width));
        }
    }
    fn draw_preview(&self, grid_size: f64, target: &mut dyn RenderTarget) {
        let t = self.glyph_transform(self.class.draw_offset(grid_size));
        let rect = lyon::math::Box2D::new(
            lyon::math::point(0., 0.),
            lyon::math::point(self.size.width as f32, self.size.height as f32),
        );
        let mut builder = lyon::path::Path::builder();
        builder.add_rectangle(&rect, lyon::path::Winding::Positive);
        let path = builder.build().transformed(&cst_to_lyon(&t));
        target.fill(&path, &Fill::highlight());
    }
}
