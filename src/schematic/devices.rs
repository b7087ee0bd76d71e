//! devices: resistors, capacitors, coils and transistors

mod deviceinstance;
pub mod devicetype;

pub use self::deviceinstance::Device;
pub use self::devicetype::DeviceClass;
