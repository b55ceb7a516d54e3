pub mod color;
pub mod fill;
pub mod math;
pub mod stroke;
pub mod surface;

#[cfg(feature = "gradient")]
pub mod gradient;
