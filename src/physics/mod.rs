pub mod atmosphere;
pub mod attitude;
pub mod dynamics;
pub mod geomagnetic;
pub mod gravity;
pub mod sun;
