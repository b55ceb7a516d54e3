// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/graphics/src/geometry/path.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

mod arc;
mod builder;
mod commands;

#[doc(no_inline)]
pub use arc::ArcPath;
pub use builder::PathBuilder;
pub use commands::{CommandBuffer, PathCommand};

pub use lyon::path as lyon_path;

/// An immutable set of points that may or may not be connected.
#[derive(Debug, Clone)]
pub struct Path {
    pub raw: lyon::path::Path,
}

impl Path {
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }
}
