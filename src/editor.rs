//! headless canvas controller: owns one diagram and turns input events into edits

pub mod script;
pub mod tools;

use std::path::Path;

pub use tools::{Input, Key, Tool};

use crate::codec;
use crate::config::Config;
use crate::render::{Drawable, RenderTarget};
use crate::schematic::{DeviceClass, DeviceHandle, Device, Diagram, Wire, WireHandle};
use crate::transforms::{snap, snap_point, CSPoint, CSVec, Rotation};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    device: DeviceHandle,
    /// cursor position relative to the device center at grab time
    offset: CSVec,
}

#[derive(Debug, Default)]
pub struct Editor {
    diagram: Diagram,
    config: Config,
    tool: Tool,
    hovered_device: Option<DeviceHandle>,
    hovered_wire: Option<WireHandle>,
    drag: Option<Drag>,
    temp_wire: Option<Wire>,
    cursor: CSPoint,
}

impl Editor {
    pub fn new(config: Config) -> Self {
        Editor {
            config,
            ..Default::default()
        }
    }
    pub fn with_diagram(config: Config, diagram: Diagram) -> Self {
        Editor {
            diagram,
            config,
            ..Default::default()
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn tool(&self) -> Tool {
        self.tool
    }
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::info!("{tool}");
        }
        self.tool = tool;
    }
    pub fn mode_label(&self) -> String {
        self.tool.to_string()
    }
    pub fn cursor(&self) -> CSPoint {
        self.cursor
    }
    /// the wire being drawn, if any
    pub fn temp_wire(&self) -> Option<&Wire> {
        self.temp_wire.as_ref()
    }

    /// hovered device, if it is still part of the diagram
    pub fn hovered_device(&self) -> Option<DeviceHandle> {
        self.hovered_device
            .filter(|&h| self.diagram.device(h).is_some())
    }
    /// hovered wire, if it is still part of the diagram
    pub fn hovered_wire(&self) -> Option<WireHandle> {
        self.hovered_wire.filter(|&h| self.diagram.wire(h).is_some())
    }
    /// device being dragged, if it is still part of the diagram
    pub fn dragged_device(&self) -> Option<DeviceHandle> {
        self.drag
            .map(|d| d.device)
            .filter(|&h| self.diagram.device(h).is_some())
    }

    /// processes a single event to completion. pointer events at non-finite positions are dropped.
    pub fn handle(&mut self, input: Input) {
        if let Input::Press(p) | Input::Motion(p) | Input::Release(p) = input {
            if !(p.x.is_finite() && p.y.is_finite()) {
                log::warn!("ignoring {input:?}");
                return;
            }
        }
        match input {
            Input::Press(csp) => self.press(csp),
            Input::Motion(csp) => self.motion(csp),
            Input::Release(csp) => self.release(csp),
            Input::Key(key) => self.key(key),
        }
    }

    fn press(&mut self, csp: CSPoint) {
        let grid = self.config.grid_size;
        match self.tool {
            Tool::Place(class) => {
                // centered on the snapped point using the two terminal footprint
                let origin = CSPoint::new(
                    snap(csp.x, grid) - self.config.device_width / 2.0,
                    snap(csp.y, grid) - self.config.device_height / 2.0,
                );
                let d = Device::new(class, origin, class.default_size(&self.config));
                let h = self.diagram.add_device(d);
                log::debug!("placed {class} at ({}, {}) as {h:?}", origin.x, origin.y);
            }
            Tool::Wire => {
                let p = snap_point(csp, grid);
                self.temp_wire = Some(Wire::new(p, p));
            }
            Tool::Move => {
                self.drag = self.diagram.device_at(csp).and_then(|h| {
                    let d = self.diagram.device(h)?;
                    log::debug!("grabbed {} {h:?}", d.class());
                    Some(Drag {
                        device: h,
                        offset: csp - d.center(),
                    })
                });
            }
        }
    }

    fn motion(&mut self, csp: CSPoint) {
        let grid = self.config.grid_size;
        self.cursor = csp;

        self.hovered_device = self.diagram.device_at(csp);
        self.hovered_wire = if self.temp_wire.is_none() {
            self.diagram.wire_at(csp, self.config.wire_tolerance)
        } else {
            None
        };

        if let Some(w) = self.temp_wire.as_mut() {
            w.set_end(snap_point(csp, grid));
        }

        if self.tool == Tool::Move {
            if let Some(drag) = self.drag {
                match self.diagram.device_mut(drag.device) {
                    Some(d) => {
                        let center = snap_point(csp - drag.offset, grid);
                        d.set_center(center);
                        if d.class() == DeviceClass::Transistor {
                            d.set_origin(d.origin() + CSVec::new(0., grid / 2.0));
                        }
                    }
                    None => self.drag = None,
                }
            }
        }
    }

    fn release(&mut self, csp: CSPoint) {
        if let Some(mut w) = self.temp_wire.take() {
            w.set_end(snap_point(csp, self.config.grid_size));
            let h = self.diagram.add_wire(w);
            log::debug!("committed wire {h:?}");
        }
        if self.tool == Tool::Move {
            self.drag = None;
        }
    }

    fn key(&mut self, key: Key) {
        match key {
            Key::W => self.set_tool(Tool::Wire),
            Key::R => match self.hovered_device() {
                Some(h) => {
                    if let Some(d) = self.diagram.device_mut(h) {
                        d.rotate_by(Rotation::QUARTER);
                        log::debug!("rotated {h:?} to {}", d.rotation().degrees());
                    }
                }
                None => self.set_tool(Tool::Place(DeviceClass::Resistor)),
            },
            Key::C => self.set_tool(Tool::Place(DeviceClass::Capacitor)),
            Key::T => self.set_tool(Tool::Place(DeviceClass::Transistor)),
            Key::L => self.set_tool(Tool::Place(DeviceClass::Coil)),
            Key::M => self.set_tool(Tool::Move),
            Key::Delete => self.delete_hovered(),
        }
    }

    /// deletes the hovered device, or failing that the hovered wire
    fn delete_hovered(&mut self) {
        if let Some(h) = self.hovered_device() {
            self.diagram.remove_device(h);
            self.hovered_device = None;
            log::info!("component deleted");
        } else if let Some(h) = self.hovered_wire() {
            self.diagram.remove_wire(h);
            self.hovered_wire = None;
            log::info!("wire deleted");
        }
    }

    fn clear_transient(&mut self) {
        self.hovered_device = None;
        self.hovered_wire = None;
        self.drag = None;
        self.temp_wire = None;
    }

    /// writes the diagram to `path`. on failure the file is left as it was.
    pub fn save_to_file(&self, path: &Path) -> bool {
        match codec::save(&self.diagram, path) {
            Ok(()) => {
                log::info!("saved {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("failed to save {}: {e}", path.display());
                false
            }
        }
    }

    /// replaces the diagram with the contents of `path`.
    /// the current diagram is only touched once the whole document has been read.
    pub fn load_from_file(&mut self, path: &Path) -> bool {
        match codec::load(path) {
            Ok(diagram) => {
                self.diagram.replace_with(diagram);
                self.clear_transient();
                log::info!("loaded {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("failed to load {}: {e}", path.display());
                false
            }
        }
    }

    /// hover previews, then wires, devices and the wire in progress
    pub fn render(&self, target: &mut dyn RenderTarget) {
        let grid = self.config.grid_size;
        if let Some(d) = self.hovered_device().and_then(|h| self.diagram.device(h)) {
            d.draw_preview(grid, target);
        }
        if let Some(w) = self.hovered_wire().and_then(|h| self.diagram.wire(h)) {
            w.draw_preview(grid, target);
        }
        self.diagram.draw(grid, target);
        if let Some(w) = &self.temp_wire {
            w.draw_persistent(grid, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SvgTarget;
    use crate::transforms::CSSize;

    fn pt(x: f64, y: f64) -> CSPoint {
        CSPoint::new(x, y)
    }

    fn click(ed: &mut Editor, x: f64, y: f64) {
        ed.handle(Input::Press(pt(x, y)));
        ed.handle(Input::Release(pt(x, y)));
    }

    #[test]
    fn places_centered_on_snapped_point() {
        let mut ed = Editor::new(Config::default());
        click(&mut ed, 103., 58.);
        let (_, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(d.class(), DeviceClass::Resistor);
        assert_eq!(d.origin(), pt(80., 50.));
        assert_eq!(d.size(), CSSize::new(40., 20.));
    }

    #[test]
    fn transistor_uses_square_size_but_two_terminal_centering() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Key(Key::T));
        click(&mut ed, 100., 60.);
        let (_, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(d.class(), DeviceClass::Transistor);
        assert_eq!(d.origin(), pt(80., 50.));
        assert_eq!(d.size(), CSSize::new(40., 40.));
    }

    #[test]
    fn draws_a_wire() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Key(Key::W));
        assert_eq!(ed.mode_label(), "Wire Mode");
        ed.handle(Input::Press(pt(9., 11.)));
        ed.handle(Input::Motion(pt(50., 11.)));
        assert_eq!(ed.temp_wire().unwrap().pts(), (pt(0., 20.), pt(60., 20.)));
        assert_eq!(ed.diagram().wire_count(), 0);
        ed.handle(Input::Release(pt(78., 22.)));
        assert!(ed.temp_wire().is_none());
        let (_, w) = ed.diagram().wires().next().unwrap();
        assert_eq!(w.pts(), (pt(0., 20.), pt(80., 20.)));
    }

    #[test]
    fn no_wire_hover_while_drawing() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Key(Key::W));
        click(&mut ed, 0., 0.);
        ed.handle(Input::Motion(pt(0., 0.)));
        assert!(ed.hovered_wire().is_some());
        ed.handle(Input::Press(pt(0., 0.)));
        ed.handle(Input::Motion(pt(0., 0.)));
        assert!(ed.hovered_wire().is_none());
    }

    #[test]
    fn r_rotates_hovered_or_selects_resistor() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Key(Key::C));
        click(&mut ed, 20., 20.);
        ed.handle(Input::Motion(pt(20., 20.)));
        ed.handle(Input::Key(Key::R));
        let (_, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(d.rotation().degrees(), 90.);
        assert_eq!(ed.mode_label(), "Capacitor Mode");

        ed.handle(Input::Motion(pt(500., 500.)));
        ed.handle(Input::Key(Key::R));
        assert_eq!(ed.mode_label(), "Resistor Mode");

        ed.handle(Input::Motion(pt(20., 20.)));
        for _ in 0..3 {
            ed.handle(Input::Key(Key::R));
        }
        let (_, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(d.rotation().degrees(), 0.);
    }

    #[test]
    fn delete_prefers_device_and_is_by_identity() {
        let mut ed = Editor::new(Config::default());
        click(&mut ed, 20., 20.);
        click(&mut ed, 20., 20.);
        ed.handle(Input::Key(Key::W));
        ed.handle(Input::Press(pt(0., 20.)));
        ed.handle(Input::Release(pt(100., 20.)));

        ed.handle(Input::Motion(pt(20., 20.)));
        let top = ed.hovered_device().unwrap();
        assert_eq!(ed.diagram().devices().last().unwrap().0, top);
        ed.handle(Input::Key(Key::Delete));
        assert_eq!(ed.diagram().device_count(), 1);
        assert!(ed.diagram().device(top).is_none());
        assert_eq!(ed.diagram().wire_count(), 1);
        assert!(ed.hovered_device().is_none());

        // hover is not recomputed until the next motion, so the wire under the cursor goes next
        ed.handle(Input::Key(Key::Delete));
        assert_eq!(ed.diagram().device_count(), 1);
        assert_eq!(ed.diagram().wire_count(), 0);

        ed.handle(Input::Motion(pt(20., 20.)));
        assert!(ed.hovered_device().is_some());
        ed.handle(Input::Key(Key::Delete));
        assert!(ed.diagram().is_empty());
    }

    #[test]
    fn drag_snaps_center() {
        let mut ed = Editor::new(Config::default());
        click(&mut ed, 20., 20.);
        ed.handle(Input::Key(Key::M));
        // device spans (0,10)-(40,30), grab 5 right of center
        ed.handle(Input::Press(pt(25., 20.)));
        ed.handle(Input::Motion(pt(68., 43.)));
        let (h, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(ed.dragged_device(), Some(h));
        assert_eq!(d.center(), pt(60., 40.));
        ed.handle(Input::Release(pt(68., 43.)));
        assert_eq!(ed.dragged_device(), None);

        ed.handle(Input::Motion(pt(200., 200.)));
        let (_, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(d.center(), pt(60., 40.));
    }

    #[test]
    fn dragged_transistor_is_shifted_down() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Key(Key::T));
        click(&mut ed, 100., 100.);
        ed.handle(Input::Key(Key::M));
        let (_, d) = ed.diagram().devices().next().unwrap();
        let c = d.center();
        ed.handle(Input::Press(c));
        ed.handle(Input::Motion(pt(200., 200.)));
        let (_, d) = ed.diagram().devices().next().unwrap();
        assert_eq!(d.center(), pt(200., 210.));
    }

    #[test]
    fn non_finite_pointer_input_is_dropped() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Press(pt(f64::NAN, 10.)));
        ed.handle(Input::Key(Key::W));
        ed.handle(Input::Press(pt(0., 0.)));
        ed.handle(Input::Motion(pt(f64::INFINITY, 0.)));
        ed.handle(Input::Release(pt(40., f64::NEG_INFINITY)));
        assert!(ed.diagram().is_empty());
        assert_eq!(ed.temp_wire().unwrap().pts(), (pt(0., 0.), pt(0., 0.)));
        ed.handle(Input::Release(pt(40., 0.)));
        let (_, w) = ed.diagram().wires().next().unwrap();
        assert!(w.is_finite());
        assert_eq!(ed.cursor(), CSPoint::origin());
    }

    #[test]
    fn press_on_empty_canvas_grabs_nothing() {
        let mut ed = Editor::new(Config::default());
        ed.handle(Input::Key(Key::M));
        ed.handle(Input::Press(pt(0., 0.)));
        assert_eq!(ed.dragged_device(), None);
        assert!(ed.diagram().is_empty());
    }

    #[test]
    fn render_order() {
        let mut ed = Editor::new(Config::default());
        click(&mut ed, 20., 20.);
        ed.handle(Input::Motion(pt(20., 20.)));
        let mut t = SvgTarget::new();
        ed.render(&mut t);
        assert!(t.elements()[0].contains("fill-opacity=\"0.3\""));
        assert!(t.len() > 1);
    }
}
