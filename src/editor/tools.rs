//! editor tools and the inputs that drive them

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::schematic::DeviceClass;
use crate::transforms::CSPoint;

/// the active tool, selected by key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// a press places a new device of the class
    Place(DeviceClass),
    /// press, drag, release draws a wire
    Wire,
    /// press grabs the topmost device, motion drags it
    Move,
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Place(DeviceClass::Resistor)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Place(class) => write!(f, "{class} Mode"),
            Tool::Wire => f.write_str("Wire Mode"),
            Tool::Move => f.write_str("Move Mode"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    R,
    C,
    T,
    L,
    M,
    Delete,
}

impl FromStr for Key {
    type Err = Error;

    /// case insensitive; `backspace` is an alias for `delete`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" => Ok(Key::W),
            "r" => Ok(Key::R),
            "c" => Ok(Key::C),
            "t" => Ok(Key::T),
            "l" => Ok(Key::L),
            "m" => Ok(Key::M),
            "delete" | "backspace" => Ok(Key::Delete),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

/// one event from the host. points are in canvas coordinates, presses are primary button only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Press(CSPoint),
    Motion(CSPoint),
    Release(CSPoint),
    Key(Key),
}
