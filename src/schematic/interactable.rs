use crate::transforms::{CSBox, CSPoint, CSVec};

/// common interactive logic for schematic elements: hit-testing and moving
pub trait Interactive {
    /// returns true if the canvas point lands on the element
    fn contains_csp(&self, csp: CSPoint) -> bool;
    /// moves the element by a canvas vector
    fn translate(&mut self, csv: CSVec);
    /// axis aligned box enclosing the element's hit-test area
    fn bounds(&self) -> CSBox;
}
