//! Animated sector overlays for 2D map renderers.
//!
//! A [`SectorLayer`] is a pie slice around a geographic center that can swing
//! its direction back and forth ([`SectorLayer::pendulum`]) or rotate without
//! end ([`SectorLayer::spin`]). A [`CanvasRenderer`] paints it onto any
//! [`DrawingSurface`](crate::surface::DrawingSurface).

mod animator;
mod layer;
mod renderer;
mod sector;

pub mod error;
pub mod geo;
pub mod options;
pub mod timer;

pub use animator::{Oscillator, SectorAnimator, DEFAULT_INTERVAL};
pub use layer::{
    animated_sector, sector, LayerId, LayerKind, SectorLayer, SectorStyle, VectorLayer,
};
pub use renderer::{CanvasRenderer, DrawFn, FillPatternFn};
pub use sector::{register_sector_renderer, update_sector, SectorGeometry};

pub use sectorvg_core::*;

#[cfg(feature = "tessellation")]
pub use sectorvg_tessellation as tessellation;
