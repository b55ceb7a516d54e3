pub mod mesh;
pub mod path;
mod tessellation;

pub use tessellation::{dashed, Tessellator, DEFAULT_TOLERANCE};

pub use lyon;
pub use sectorvg_core as core;
