use rustc_hash::{FxHashMap, FxHashSet};

use crate::geo::Projector;
use crate::layer::{LayerId, LayerKind, VectorLayer};
use crate::math::Rect;
use crate::surface::DrawingSurface;

/// Draws one kind of layer onto a surface.
///
/// Returns `false` if the layer was deferred (no frame is active or the layer
/// is outside the frame bounds) and must be drawn again later.
pub type DrawFn =
    fn(&mut CanvasRenderer, &dyn VectorLayer, &mut dyn DrawingSurface, &dyn Projector) -> bool;

/// Paints an extra pattern over a layer's fill, after the fill itself.
pub type FillPatternFn = Box<dyn FnMut(&mut dyn DrawingSurface, &dyn VectorLayer)>;

/// The host-side renderer that dispatches layers to their draw functions.
///
/// Drawing only happens between [`CanvasRenderer::begin_frame`] and
/// [`CanvasRenderer::end_frame`].
pub struct CanvasRenderer {
    draw_fns: FxHashMap<LayerKind, DrawFn>,
    drawn_layers: FxHashSet<LayerId>,
    drawing: bool,
    bounds: Option<Rect>,
    fill_pattern: Option<FillPatternFn>,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("kinds", &self.draw_fns.keys().collect::<Vec<_>>())
            .field("drawn_layers", &self.drawn_layers.len())
            .field("drawing", &self.drawing)
            .field("bounds", &self.bounds)
            .field("fill_pattern", &self.fill_pattern.is_some())
            .finish()
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasRenderer {
    /// Creates a renderer with the sector draw function registered.
    pub fn new() -> Self {
        let mut renderer = Self::empty();
        crate::sector::register_sector_renderer(&mut renderer);
        renderer
    }

    /// Creates a renderer that knows no layer kinds.
    pub fn empty() -> Self {
        Self {
            draw_fns: FxHashMap::default(),
            drawn_layers: FxHashSet::default(),
            drawing: false,
            bounds: None,
            fill_pattern: None,
        }
    }

    /// Installs `draw_fn` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: LayerKind, draw_fn: DrawFn) {
        if self.draw_fns.insert(kind, draw_fn).is_some() {
            log::debug!("replaced draw function for {:?}", kind);
        }
    }

    pub fn is_registered(&self, kind: LayerKind) -> bool {
        self.draw_fns.contains_key(&kind)
    }

    /// Starts a frame. Layers entirely outside `bounds` are skipped. With no
    /// bounds nothing is culled.
    pub fn begin_frame(&mut self, bounds: Option<Rect>) {
        self.drawing = true;
        self.bounds = bounds;
    }

    pub fn end_frame(&mut self) {
        self.drawing = false;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether `layer` lies outside the current frame bounds.
    pub fn is_culled(&self, layer: &dyn VectorLayer, projector: &dyn Projector) -> bool {
        self.bounds
            .is_some_and(|bounds| layer.is_empty(&bounds, projector))
    }

    /// Draws `layer` with the draw function registered for its kind.
    ///
    /// Returns `false` if the layer was deferred or its kind is unknown.
    pub fn update_layer(
        &mut self,
        layer: &dyn VectorLayer,
        surface: &mut dyn DrawingSurface,
        projector: &dyn Projector,
    ) -> bool {
        let Some(draw_fn) = self.draw_fns.get(&layer.kind()).copied() else {
            log::debug!(
                "no draw function for {:?}, skipping {:?}",
                layer.kind(),
                layer.id()
            );
            return false;
        };

        draw_fn(self, layer, surface, projector)
    }

    /// Draws every layer that requested a redraw and returns how many were
    /// drawn.
    ///
    /// Deferred layers keep their redraw request for a later frame.
    pub fn update_dirty<'a>(
        &mut self,
        layers: impl IntoIterator<Item = &'a dyn VectorLayer>,
        surface: &mut dyn DrawingSurface,
        projector: &dyn Projector,
    ) -> usize {
        let mut count = 0;
        for layer in layers {
            if !layer.needs_redraw() {
                continue;
            }
            if self.update_layer(layer, surface, projector) {
                layer.mark_drawn();
                count += 1;
            }
        }
        count
    }

    /// Records that `id` has been painted.
    pub fn register_drawn(&mut self, id: LayerId) {
        self.drawn_layers.insert(id);
    }

    pub fn is_drawn(&self, id: LayerId) -> bool {
        self.drawn_layers.contains(&id)
    }

    /// Forgets a layer that was removed from the map.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        self.drawn_layers.remove(&id)
    }

    pub fn drawn_layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.drawn_layers.iter().copied()
    }

    pub fn set_fill_pattern(
        &mut self,
        hook: impl FnMut(&mut dyn DrawingSurface, &dyn VectorLayer) + 'static,
    ) {
        self.fill_pattern = Some(Box::new(hook));
    }

    pub fn clear_fill_pattern(&mut self) {
        self.fill_pattern = None;
    }

    /// Runs the fill-pattern hook, if one is installed.
    pub(crate) fn apply_fill_pattern(
        &mut self,
        surface: &mut dyn DrawingSurface,
        layer: &dyn VectorLayer,
    ) {
        if let Some(hook) = self.fill_pattern.as_mut() {
            hook(surface, layer);
        }
    }
}
