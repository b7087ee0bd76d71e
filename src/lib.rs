//! a small schematic sketcher: resistors, capacitors, coils, transistors and wires
//! on a snapping canvas, saved as JSON documents.

pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod render;
pub mod schematic;
pub mod transforms;

pub use config::Config;
pub use editor::Editor;
pub use error::{Error, Result};
pub use schematic::Diagram;
