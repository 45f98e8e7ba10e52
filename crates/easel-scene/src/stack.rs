use easel_graphics::Rect;

use crate::policy::{LayoutContext, MeasureContext, ViewPolicy};
use crate::view::Visibility;

/// Container that stacks children on top of each other.
///
/// Measures to the largest visible child and gives every visible child
/// its own measured size at the container's origin, so overlap order is
/// purely the child order.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackPolicy;

impl ViewPolicy for StackPolicy {
    fn on_measure(&mut self, ctx: &mut MeasureContext<'_>, width_spec: i32, height_spec: i32) {
        ctx.measure_children(width_spec, height_spec);
        let mut width = 0;
        let mut height = 0;
        for index in 0..ctx.child_count() {
            let child = ctx.child_at(index);
            if ctx.visibility(child) != Visibility::Visible {
                continue;
            }
            let size = ctx.measured_size(child);
            width = width.max(size.width);
            height = height.max(size.height);
        }
        ctx.set_measured_size(width, height);
    }

    fn on_layout(&mut self, ctx: &mut LayoutContext<'_>, _size_changed: bool, _bounds: Rect) {
        for index in 0..ctx.child_count() {
            let child = ctx.child_at(index);
            if ctx.visibility(child) != Visibility::Visible {
                continue;
            }
            let size = ctx.measured_size(child);
            ctx.layout_child(child, 0, 0, size.width, size.height);
        }
    }
}
