//! JSON document codec for diagrams
//!
//! ```text
//! { "components": [ {"type", "x", "y", "width", "height", "rotation"}, ... ],
//!   "wires":      [ {"type": "Wire", "x1", "y1", "x2", "y2"}, ... ] }
//! ```

use std::io::Write;
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::schematic::{wire, Device, DeviceClass, Diagram, Wire};
use crate::transforms::{CSPoint, CSSize};

#[derive(Debug, Deserialize)]
struct DeviceRecord {
    #[serde(rename = "type")]
    kind: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation: f64,
}

impl DeviceRecord {
    fn into_device(self) -> Result<Device> {
        let class: DeviceClass = self.kind.parse()?;
        Ok(Device::new(
            class,
            CSPoint::new(self.x, self.y),
            CSSize::new(self.width, self.height),
        )
        .with_rotation(self.rotation))
    }
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl WireRecord {
    fn into_wire(self) -> Result<Wire> {
        match self.kind.as_deref() {
            None | Some(wire::TAG) => Ok(Wire::new(
                CSPoint::new(self.x1, self.y1),
                CSPoint::new(self.x2, self.y2),
            )),
            Some(other) => Err(Error::UnknownVariant(other.to_string())),
        }
    }
}

/// top level shape. missing arrays read as empty.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    components: Vec<Value>,
    #[serde(default)]
    wires: Vec<Value>,
}

fn element<T: serde::de::DeserializeOwned>(v: &Value, what: &str, i: usize) -> Result<T> {
    T::deserialize(v).map_err(|e| Error::MalformedDocument(format!("{what} {i}: {e}")))
}

/// document for the diagram, elements in z-order
pub fn serialize(diagram: &Diagram) -> Value {
    let components: Vec<Value> = diagram.devices().map(|(_, d)| d.serialize()).collect();
    let wires: Vec<Value> = diagram.wires().map(|(_, w)| w.serialize()).collect();
    json!({
        "components": components,
        "wires": wires,
    })
}

/// builds a new diagram from a document. fails as a whole on the first bad element.
pub fn deserialize(value: &Value) -> Result<Diagram> {
    if !value.is_object() {
        return Err(Error::MalformedDocument(
            "top level must be an object".to_string(),
        ));
    }
    let doc = Document::deserialize(value)?;

    let mut diagram = Diagram::new();
    for (i, v) in doc.components.iter().enumerate() {
        let rec: DeviceRecord = element(v, "component", i)?;
        diagram.add_device(rec.into_device()?);
    }
    for (i, v) in doc.wires.iter().enumerate() {
        let rec: WireRecord = element(v, "wire", i)?;
        diagram.add_wire(rec.into_wire()?);
    }
    Ok(diagram)
}

/// JSON has no NaN or infinity; such values would be written as `null` and never load back
fn check_finite(diagram: &Diagram) -> Result<()> {
    if let Some(i) = diagram.devices().position(|(_, d)| !d.is_finite()) {
        return Err(Error::MalformedDocument(format!(
            "component {i}: non-finite value"
        )));
    }
    if let Some(i) = diagram.wires().position(|(_, w)| !w.is_finite()) {
        return Err(Error::MalformedDocument(format!("wire {i}: non-finite value")));
    }
    Ok(())
}

/// pretty printed with a four space indent. fails on non-finite values.
pub fn to_string_pretty(diagram: &Diagram) -> Result<String> {
    check_finite(diagram)?;
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serialize(diagram).serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| Error::MalformedDocument(e.to_string()))
}

pub fn from_str(s: &str) -> Result<Diagram> {
    let value: Value = serde_json::from_str(s)?;
    deserialize(&value)
}

pub fn load(path: &Path) -> Result<Diagram> {
    let s = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    from_str(&s)
}

/// replaces the file through a temporary file and rename. the destination is never left truncated.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(contents)?;
            f.flush()
        })
        .map_err(|err| match err {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::io(path, e),
        })
}

/// serializes fully before the file is touched, then writes it atomically
pub fn save(diagram: &Diagram, path: &Path) -> Result<()> {
    let contents = to_string_pretty(diagram)?;
    write_atomic(path, contents.as_bytes())
}
