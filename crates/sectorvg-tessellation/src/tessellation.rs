// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/wgpu/src/geometry.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use lyon::tessellation;

use sectorvg_core::color::PackedSrgb;
use sectorvg_core::fill::{FillRule, FillStyle};
use sectorvg_core::math::{transform_scale_factor, Angle, Point, Transform, Vector};
use sectorvg_core::stroke::LineDash;
use sectorvg_core::surface::DrawingSurface;

use crate::mesh::{Indexed, SolidMesh, SolidVertex2D};
use crate::path::{ArcPath, CommandBuffer, Path, PathBuilder};

/// The maximum distance between a curve and its flattened approximation.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone)]
struct DrawState {
    transform: Transform,
    fill_style: FillStyle,
    stroke_style: FillStyle,
    global_alpha: f32,
    line_width: f32,
    line_dash: LineDash,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            global_alpha: 1.0,
            line_width: 1.0,
            line_dash: LineDash::default(),
        }
    }
}

/// A [`DrawingSurface`] that turns filled and stroked paths into triangle
/// meshes with per-vertex colors.
///
/// Every call to [`DrawingSurface::fill`] or [`DrawingSurface::stroke`]
/// produces one [`SolidMesh`] in surface coordinates.
#[allow(missing_debug_implementations)]
pub struct Tessellator {
    state: DrawState,
    saved: Vec<DrawState>,
    path: CommandBuffer,
    meshes: Vec<SolidMesh>,
    tolerance: f32,
    fill_tessellator: tessellation::FillTessellator,
    stroke_tessellator: tessellation::StrokeTessellator,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self {
            state: DrawState::default(),
            saved: Vec::new(),
            path: CommandBuffer::new(),
            meshes: Vec::new(),
            tolerance: DEFAULT_TOLERANCE,
            fill_tessellator: tessellation::FillTessellator::new(),
            stroke_tessellator: tessellation::StrokeTessellator::new(),
        }
    }
}

impl Tessellator {
    /// Creates a new empty [`Tessellator`].
    ///
    /// The default coordinate system of a [`Tessellator`] has its origin at the
    /// top-left corner of the surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum distance between curves and their flattened
    /// approximation.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The current transform.
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    pub fn line_dash(&self) -> &[f32] {
        &self.state.line_dash.segments
    }

    /// The number of states pushed by [`DrawingSurface::save`] that have not
    /// been restored yet.
    pub fn saved_states(&self) -> usize {
        self.saved.len()
    }

    /// The meshes produced so far.
    pub fn meshes(&self) -> &[SolidMesh] {
        &self.meshes
    }

    pub fn into_meshes(self) -> Vec<SolidMesh> {
        self.meshes
    }

    /// Removes and returns the meshes produced so far, keeping the drawing
    /// state intact.
    pub fn take_meshes(&mut self) -> Vec<SolidMesh> {
        std::mem::take(&mut self.meshes)
    }

    /// Fills the current path using the given fill rule.
    pub fn fill_with_rule(&mut self, rule: FillRule) {
        if self.path.is_empty() {
            return;
        }

        let path = self.path.to_path();
        let mut buffers: tessellation::VertexBuffers<SolidVertex2D, u32> =
            tessellation::VertexBuffers::new();

        let options = tessellation::FillOptions::default()
            .with_tolerance(self.tolerance)
            .with_fill_rule(into_fill_rule(rule));

        let result = self.fill_tessellator.tessellate_path(
            &path.raw,
            &options,
            &mut tessellation::BuffersBuilder::new(
                &mut buffers,
                VertexPaint::new(&self.state.fill_style, &self.state),
            ),
        );

        match result {
            Ok(()) => self.push_mesh(buffers),
            Err(e) => log::warn!("failed to tessellate fill: {:?}", e),
        }
    }

    fn push_mesh(&mut self, buffers: tessellation::VertexBuffers<SolidVertex2D, u32>) {
        if buffers.indices.is_empty() {
            return;
        }

        self.meshes.push(SolidMesh {
            buffers: Indexed {
                vertices: buffers.vertices,
                indices: buffers.indices,
            },
        });
    }
}

impl DrawingSurface for Tessellator {
    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vector) {
        self.state.transform = self.state.transform.pre_translate(offset);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform.pre_scale(x, y);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point, &self.state.transform);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point, &self.state.transform);
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        anticlockwise: bool,
    ) {
        if radius.is_nan() || radius < 0.0 {
            log::warn!("ignoring arc with invalid radius {}", radius);
            return;
        }

        self.path.arc(
            &ArcPath {
                center,
                radius,
                start_angle,
                end_angle,
                anticlockwise,
            },
            &self.state.transform,
        );
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.state.fill_style = style;
    }

    fn set_stroke_style(&mut self, style: FillStyle) {
        self.state.stroke_style = style;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // Out of range values are ignored, like on a canvas.
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        match LineDash::new(segments) {
            Some(dash) => self.state.line_dash = dash,
            None => log::warn!("ignoring invalid line dash {:?}", segments),
        }
    }

    fn fill(&mut self) {
        self.fill_with_rule(FillRule::default());
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }

        let scale = transform_scale_factor(&self.state.transform);
        let width = self.state.line_width * scale;
        if width <= 0.0 {
            return;
        }

        let path = self.path.to_path();
        let path = if self.state.line_dash.is_solid() {
            path
        } else {
            dashed(&path, &self.state.line_dash.scaled(scale))
        };

        let mut buffers: tessellation::VertexBuffers<SolidVertex2D, u32> =
            tessellation::VertexBuffers::new();

        let options = tessellation::StrokeOptions::default()
            .with_tolerance(self.tolerance)
            .with_line_width(width);

        let result = self.stroke_tessellator.tessellate_path(
            &path.raw,
            &options,
            &mut tessellation::BuffersBuilder::new(
                &mut buffers,
                VertexPaint::new(&self.state.stroke_style, &self.state),
            ),
        );

        match result {
            Ok(()) => self.push_mesh(buffers),
            Err(e) => log::warn!("failed to tessellate stroke: {:?}", e),
        }
    }
}

/// Computes the color of each vertex from a fill style.
///
/// Gradients are defined in the coordinate space that was current when the
/// path was painted, so vertex positions are mapped back into that space
/// before sampling.
struct VertexPaint {
    style: FillStyle,
    #[cfg_attr(not(feature = "gradient"), allow(dead_code))]
    to_user_space: Transform,
    alpha: f32,
}

impl VertexPaint {
    fn new(style: &FillStyle, state: &DrawState) -> Self {
        Self {
            style: style.clone(),
            to_user_space: state.transform.inverse().unwrap_or_else(Transform::identity),
            alpha: state.global_alpha,
        }
    }

    fn color_at(&self, position: lyon::math::Point) -> PackedSrgb {
        match &self.style {
            FillStyle::Solid(color) => color.mul_alpha(self.alpha),
            #[cfg(feature = "gradient")]
            FillStyle::Gradient(gradient) => {
                let point = self
                    .to_user_space
                    .transform_point(Point::new(position.x, position.y));
                gradient.color_at(point).mul_alpha(self.alpha)
            }
        }
    }
}

impl tessellation::FillVertexConstructor<SolidVertex2D> for VertexPaint {
    fn new_vertex(&mut self, vertex: tessellation::FillVertex<'_>) -> SolidVertex2D {
        let position = vertex.position();

        SolidVertex2D {
            position: [position.x, position.y],
            color: self.color_at(position),
        }
    }
}

impl tessellation::StrokeVertexConstructor<SolidVertex2D> for VertexPaint {
    fn new_vertex(&mut self, vertex: tessellation::StrokeVertex<'_, '_>) -> SolidVertex2D {
        let position = vertex.position();

        SolidVertex2D {
            position: [position.x, position.y],
            color: self.color_at(position),
        }
    }
}

fn into_fill_rule(rule: FillRule) -> lyon::tessellation::FillRule {
    match rule {
        FillRule::NonZero => lyon::tessellation::FillRule::NonZero,
        FillRule::EvenOdd => lyon::tessellation::FillRule::EvenOdd,
    }
}

/// Splits `path` into the dashes described by `line_dash`.
pub fn dashed(path: &Path, line_dash: &LineDash) -> Path {
    use lyon::algorithms::walk::{walk_along_path, RepeatedPattern, WalkerEvent};
    use lyon::path::iterator::PathIterator;

    let mut dashed_path = PathBuilder::new();

    let segments_odd = (line_dash.segments.len() % 2 == 1)
        .then(|| [&line_dash.segments[..], &line_dash.segments[..]].concat());

    let mut draw_line = false;

    walk_along_path(
        path.raw.iter().flattened(0.01),
        0.0,
        lyon::tessellation::StrokeOptions::DEFAULT_TOLERANCE,
        &mut RepeatedPattern {
            callback: |event: WalkerEvent<'_>| {
                let point = Point::new(event.position.x, event.position.y);

                dashed_path = if draw_line {
                    std::mem::take(&mut dashed_path).line_to(point)
                } else {
                    std::mem::take(&mut dashed_path).move_to(point)
                };

                draw_line = !draw_line;

                true
            },
            index: line_dash.offset,
            intervals: segments_odd.as_deref().unwrap_or(&line_dash.segments[..]),
        },
    );

    dashed_path.build()
}
