pub mod curve;
pub mod linear;
pub mod look;
