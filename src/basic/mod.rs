pub use cell::{Cell, GridDim};
pub use dir::{Axis, Dir};
pub use point::Point;

pub mod board;
mod cell;
mod dir;
mod point;

/// Identity carried by a collectible item, one of the ten decimal digits
pub type Digit = u8;
