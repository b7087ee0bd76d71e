//! the diagram: ordered devices and ordered wires, owned exclusively.
//! transient references into it (hover, drag) are generation checked [`Handle`]s.

pub mod arena;
pub mod devices;
pub mod interactable;
pub mod wire;

pub use arena::{Arena, Handle};
pub use devices::{Device, DeviceClass};
pub use interactable::Interactive;
pub use wire::Wire;

use crate::render::{Drawable, RenderTarget};
use crate::transforms::{CSBox, CSPoint};

pub type DeviceHandle = Handle<Device>;
pub type WireHandle = Handle<Wire>;

/// an element of either kind, as returned by combined hit-tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Device(DeviceHandle),
    Wire(WireHandle),
}

#[derive(Debug, Clone, Default)]
pub struct Diagram {
    devices: Arena<Device>,
    wires: Arena<Wire>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_device(&mut self, d: Device) -> DeviceHandle {
        self.devices.insert(d)
    }
    pub fn add_wire(&mut self, w: Wire) -> WireHandle {
        self.wires.insert(w)
    }
    /// removes exactly the device named by the handle, never a structurally equal one
    pub fn remove_device(&mut self, h: DeviceHandle) -> Option<Device> {
        self.devices.remove(h)
    }
    pub fn remove_wire(&mut self, h: WireHandle) -> Option<Wire> {
        self.wires.remove(h)
    }

    pub fn device(&self, h: DeviceHandle) -> Option<&Device> {
        self.devices.get(h)
    }
    pub fn device_mut(&mut self, h: DeviceHandle) -> Option<&mut Device> {
        self.devices.get_mut(h)
    }
    pub fn wire(&self, h: WireHandle) -> Option<&Wire> {
        self.wires.get(h)
    }
    pub fn wire_mut(&mut self, h: WireHandle) -> Option<&mut Wire> {
        self.wires.get_mut(h)
    }

    /// devices bottom to top
    pub fn devices(&self) -> impl DoubleEndedIterator<Item = (DeviceHandle, &Device)> + '_ {
        self.devices.iter()
    }
    /// wires bottom to top
    pub fn wires(&self) -> impl DoubleEndedIterator<Item = (WireHandle, &Wire)> + '_ {
        self.wires.iter()
    }
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.wires.is_empty()
    }

    /// topmost device containing the point
    pub fn device_at(&self, csp: CSPoint) -> Option<DeviceHandle> {
        self.devices.find_top(|d| d.contains_point(csp))
    }
    /// topmost wire within `tolerance` of the point
    pub fn wire_at(&self, csp: CSPoint, tolerance: f64) -> Option<WireHandle> {
        self.wires.find_top(|w| w.contains_point(csp, tolerance))
    }
    /// devices take precedence over wires
    pub fn element_at(&self, csp: CSPoint, tolerance: f64) -> Option<Element> {
        self.device_at(csp)
            .map(Element::Device)
            .or_else(|| self.wire_at(csp, tolerance).map(Element::Wire))
    }

    /// box enclosing every element, None for an empty diagram
    pub fn bounding_box(&self) -> Option<CSBox> {
        let dbs = self.devices.iter().map(|(_, d)| d.bounds());
        let wbs = self.wires.iter().map(|(_, w)| w.bounds());
        dbs.chain(wbs).reduce(|a, b| a.union(&b))
    }

    /// drops all elements, invalidating every handle, and takes over `other`'s elements in order
    pub fn replace_with(&mut self, other: Diagram) {
        self.devices.clear();
        self.wires.clear();
        let Diagram { devices, wires } = other;
        for d in devices.into_items() {
            self.devices.insert(d);
        }
        for w in wires.into_items() {
            self.wires.insert(w);
        }
    }

    /// paints wires first, then devices, each bottom to top
    pub fn draw(&self, grid_size: f64, target: &mut dyn RenderTarget) {
        for (_, w) in self.wires.iter() {
            w.draw_persistent(grid_size, target);
        }
        for (_, d) in self.devices.iter() {
            d.draw_persistent(grid_size, target);
        }
    }
}

/// structural equality: same elements in the same order. handles are not compared.
impl PartialEq for Diagram {
    fn eq(&self, other: &Self) -> bool {
        self.devices().map(|(_, d)| d).eq(other.devices().map(|(_, d)| d))
            && self.wires().map(|(_, w)| w).eq(other.wires().map(|(_, w)| w))
    }
}
