use easel_graphics::{Canvas, Insets, Rect, Size};

use crate::event::TouchEvent;
use crate::layout_params::LayoutParams;
use crate::scene::Scene;
use crate::view::{ViewId, Visibility};

/// Behavior attached to a view: measure and layout rules, content drawing
/// and input handling.
///
/// The scene detaches the policy from its node for the duration of each
/// callback, so a policy never aliases the view it is driving. Tree access
/// during measure and layout goes through the context types, which expose
/// exactly the operations that are sound mid-pass.
pub trait ViewPolicy: Send {
    /// Reports the view's size for the given measure specs.
    ///
    /// Every implementation must finish with a call to
    /// [`MeasureContext::set_measured_size`]; a measure pass that reports
    /// nothing is fatal. The default adopts the specs unchanged.
    fn on_measure(&mut self, ctx: &mut MeasureContext<'_>, width_spec: i32, height_spec: i32) {
        ctx.set_measured_size(width_spec, height_spec);
    }

    /// Positions children after the view's bounds were set.
    ///
    /// `size_changed` is false when only the origin moved; the hook still
    /// runs every pass because children may depend on state other than
    /// the parent size.
    fn on_layout(&mut self, ctx: &mut LayoutContext<'_>, size_changed: bool, bounds: Rect) {
        let _ = (ctx, size_changed, bounds);
    }

    /// Draws the view's own content, after the background and before the
    /// children. The canvas origin is the view's top-left corner.
    fn on_render(&mut self, canvas: &mut dyn Canvas, size: Size) {
        let _ = (canvas, size);
    }

    /// Handles an event no child consumed. Returning true claims the
    /// gesture for this view.
    fn on_touch(&mut self, event: &TouchEvent, size: Size) -> bool {
        let _ = (event, size);
        false
    }

    fn on_visibility_changed(&mut self, visibility: Visibility) {
        let _ = visibility;
    }

    /// Called when the view becomes part of a rooted tree.
    fn on_attached(&mut self) {}

    /// Called when the view leaves a rooted tree.
    fn on_detached(&mut self) {}
}

/// The policy of a plain view: measures to exactly the specs it is given
/// and draws nothing beyond the background.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPolicy;

impl ViewPolicy for DefaultPolicy {}

/// Tree access granted to [`ViewPolicy::on_measure`].
pub struct MeasureContext<'a> {
    pub(crate) scene: &'a mut Scene,
    pub(crate) id: ViewId,
}

impl MeasureContext<'_> {
    pub fn child_count(&self) -> usize {
        self.scene.child_count(self.id)
    }

    /// Panics if `index` is out of range.
    pub fn child_at(&self, index: usize) -> ViewId {
        self.scene.child_at(self.id, index)
    }

    pub fn visibility(&self, child: ViewId) -> Visibility {
        self.scene.visibility(child)
    }

    pub fn layout_params(&self, child: ViewId) -> Option<LayoutParams> {
        self.scene.layout_params(child)
    }

    /// This view's own padding.
    pub fn padding(&self) -> Insets {
        self.scene.padding(self.id)
    }

    /// The size `child` reported in its most recent measure pass.
    pub fn measured_size(&self, child: ViewId) -> Size {
        self.scene.measured_size(child)
    }

    pub fn measure_child(&mut self, child: ViewId, width_spec: i32, height_spec: i32) {
        self.scene.measure(child, width_spec, height_spec);
    }

    /// Measures every visible child.
    ///
    /// A child's layout params pick its specs; `MATCH_PARENT` and absent
    /// params fall back to the specs this view received.
    pub fn measure_children(&mut self, width_spec: i32, height_spec: i32) {
        for index in 0..self.child_count() {
            let child = self.child_at(index);
            if self.visibility(child) != Visibility::Visible {
                continue;
            }
            let (child_width, child_height) = match self.layout_params(child) {
                Some(params) => (
                    LayoutParams::resolve(params.width, width_spec),
                    LayoutParams::resolve(params.height, height_spec),
                ),
                None => (width_spec, height_spec),
            };
            self.measure_child(child, child_width, child_height);
        }
    }

    /// Records the measure result. Calling this is mandatory before the
    /// callback returns.
    pub fn set_measured_size(&mut self, width: i32, height: i32) {
        self.scene.record_measured_size(self.id, width, height);
    }
}

/// Tree access granted to [`ViewPolicy::on_layout`].
pub struct LayoutContext<'a> {
    pub(crate) scene: &'a mut Scene,
    pub(crate) id: ViewId,
}

impl LayoutContext<'_> {
    pub fn child_count(&self) -> usize {
        self.scene.child_count(self.id)
    }

    /// Panics if `index` is out of range.
    pub fn child_at(&self, index: usize) -> ViewId {
        self.scene.child_at(self.id, index)
    }

    pub fn visibility(&self, child: ViewId) -> Visibility {
        self.scene.visibility(child)
    }

    pub fn measured_size(&self, child: ViewId) -> Size {
        self.scene.measured_size(child)
    }

    pub fn padding(&self) -> Insets {
        self.scene.padding(self.id)
    }

    /// Assigns `child` its bounds in this view's coordinate space and
    /// runs its layout pass.
    pub fn layout_child(&mut self, child: ViewId, left: i32, top: i32, right: i32, bottom: i32) {
        self.scene.layout(child, left, top, right, bottom);
    }
}
