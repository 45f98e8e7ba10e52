use std::sync::Arc;

use easel_animation::CanvasAnimation;
use easel_graphics::{Color, Insets, Rect, Size};
use easel_texture::Texture;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::event::TouchEvent;
use crate::layout_params::LayoutParams;
use crate::policy::{LayoutContext, MeasureContext, ViewPolicy};
use crate::requests::FrameRequests;
use crate::view::{View, ViewId, Visibility};

/// Stack-local snapshot of a child list, taken before iterating so the
/// arena can be borrowed again inside the loop.
pub(crate) type ChildList = SmallVec<[ViewId; 8]>;

/// The retained view tree.
///
/// Views live in an arena keyed by [`ViewId`]; the scene owns every node
/// and all tree edges. One view may be promoted to content pane, which is
/// where the measure, layout, render and dispatch passes start.
///
/// The scene itself is not thread safe. Callers that share it across a
/// control and a render thread wrap it in a lock; the only cross-thread
/// channel the scene itself uses is [`FrameRequests`].
pub struct Scene {
    views: FxHashMap<ViewId, View>,
    next_id: u64,
    content_pane: Option<ViewId>,
    requests: Arc<FrameRequests>,
    launched: Vec<ViewId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            views: FxHashMap::default(),
            next_id: 1,
            content_pane: None,
            requests: Arc::new(FrameRequests::new()),
            launched: Vec::new(),
        }
    }

    /// The scheduling flags this scene reports into.
    pub fn frame_requests(&self) -> Arc<FrameRequests> {
        Arc::clone(&self.requests)
    }

    // ----- structure -----

    /// Adds a view to the arena and returns its id. The view starts
    /// detached and parentless.
    pub fn insert(&mut self, view: View) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.views.insert(id, view);
        id
    }

    /// Drops a detached subtree from the arena. Ids into it become stale.
    pub fn discard(&mut self, id: ViewId) {
        {
            let view = self.node(id);
            assert!(
                view.parent.is_none(),
                "cannot discard a view that still has a parent"
            );
            assert!(!view.attached, "cannot discard an attached view");
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(view) = self.views.remove(&current) {
                stack.extend(view.children);
            }
        }
        self.launched.retain(|entry| self.views.contains_key(entry));
    }

    /// Appends `child` under `parent` and schedules a layout pass.
    ///
    /// Panics if `child` already has a parent. Children render and stack
    /// in insertion order, last on top.
    pub fn add_view(&mut self, parent: ViewId, child: ViewId, params: Option<LayoutParams>) {
        assert_ne!(parent, child, "a view cannot be its own child");
        assert!(
            self.node(child).parent.is_none(),
            "view already has a parent"
        );
        let parent_attached = {
            let view = self.node_mut(parent);
            view.children.push(child);
            view.attached
        };
        self.node_mut(child).parent = Some(parent);
        if parent_attached {
            self.attach_subtree(child);
        }
        self.node_mut(child).layout_params = params;
        self.request_layout(child);
    }

    /// Removes `child` from `parent`, cancelling any gesture aimed at it.
    /// Returns false when `child` is not a child of `parent`.
    pub fn remove_view(&mut self, parent: ViewId, child: ViewId) -> bool {
        let position = self.node(parent).children.iter().position(|&c| c == child);
        let Some(position) = position else {
            return false;
        };
        self.node_mut(parent).children.remove(position);
        self.remove_one(parent, child);
        self.request_layout(parent);
        true
    }

    /// Removes every child of `parent`.
    pub fn remove_all_views(&mut self, parent: ViewId) {
        let children: ChildList = self.node(parent).children.iter().copied().collect();
        self.node_mut(parent).children.clear();
        for child in children {
            self.remove_one(parent, child);
        }
        self.request_layout(parent);
    }

    fn remove_one(&mut self, parent: ViewId, child: ViewId) {
        if self.node(parent).motion_target == Some(child) {
            log::debug!("cancelling gesture aimed at removed view {child:?}");
            self.dispatch_touch(parent, TouchEvent::cancel());
        }
        if self.node(child).attached {
            self.detach_subtree(child);
        }
        self.node_mut(child).parent = None;
    }

    /// Promotes `pane` to content pane, detaching the previous one.
    ///
    /// The new pane must be parentless and not attached elsewhere.
    pub fn set_content_pane(&mut self, pane: Option<ViewId>) {
        if self.content_pane == pane {
            return;
        }
        if let Some(old) = self.content_pane.take() {
            self.detach_subtree(old);
        }
        self.content_pane = pane;
        if let Some(new) = pane {
            {
                let view = self.node(new);
                assert!(view.parent.is_none(), "content pane must not have a parent");
                assert!(!view.attached, "content pane is already attached");
            }
            self.attach_subtree(new);
        }
        self.requests.request_layout();
    }

    pub fn content_pane(&self) -> Option<ViewId> {
        self.content_pane
    }

    fn attach_subtree(&mut self, id: ViewId) {
        self.node_mut(id).attached = true;
        let mut policy = self.take_policy(id);
        policy.on_attached();
        self.restore_policy(id, policy);
        let children: ChildList = self.node(id).children.iter().copied().collect();
        for child in children {
            self.attach_subtree(child);
        }
    }

    fn detach_subtree(&mut self, id: ViewId) {
        let children: ChildList = self.node(id).children.iter().copied().collect();
        for child in children {
            self.detach_subtree(child);
        }
        let mut policy = self.take_policy(id);
        policy.on_detached();
        self.restore_policy(id, policy);
        self.node_mut(id).attached = false;
    }

    // ----- measure and layout -----

    /// Measures `id` against the given specs.
    ///
    /// The result is memoized: a view measured twice with the same specs
    /// runs its policy only once, unless a layout was requested for it in
    /// between.
    pub fn measure(&mut self, id: ViewId, width_spec: i32, height_spec: i32) {
        let spec = (width_spec, height_spec);
        {
            let view = self.node_mut(id);
            if view.last_spec == Some(spec) && !view.layout_requested {
                return;
            }
            view.last_spec = Some(spec);
            view.measured_size_set = false;
        }
        let mut policy = self.take_policy(id);
        policy.on_measure(&mut MeasureContext { scene: self, id }, width_spec, height_spec);
        self.restore_policy(id, policy);
        if !self.node(id).measured_size_set {
            panic!("view {id:?} finished measure without reporting a size");
        }
    }

    pub(crate) fn record_measured_size(&mut self, id: ViewId, width: i32, height: i32) {
        let view = self.node_mut(id);
        view.measured = Size::new(width, height);
        view.measured_size_set = true;
    }

    /// Assigns `id` its bounds, in its parent's coordinate space, and runs
    /// its layout policy.
    ///
    /// The policy hook runs on every call, size change or not, so state
    /// derived from position stays current.
    pub fn layout(&mut self, id: ViewId, left: i32, top: i32, right: i32, bottom: i32) {
        let bounds = Rect::new(left, top, right, bottom);
        let size_changed = {
            let view = self.node_mut(id);
            let changed = view.bounds.size() != bounds.size();
            view.bounds = bounds;
            view.layout_requested = false;
            changed
        };
        let mut policy = self.take_policy(id);
        policy.on_layout(&mut LayoutContext { scene: self, id }, size_changed, bounds);
        self.restore_policy(id, policy);
    }

    /// Marks `id` and every ancestor as needing layout, invalidating their
    /// memoized measure results, and schedules a pass if the tree is
    /// rooted.
    pub fn request_layout(&mut self, id: ViewId) {
        let mut cursor = id;
        loop {
            let (parent, attached) = {
                let view = self.node_mut(cursor);
                view.layout_requested = true;
                view.last_spec = None;
                (view.parent, view.attached)
            };
            match parent {
                Some(next) => cursor = next,
                None => {
                    if attached {
                        self.requests.request_layout();
                    }
                    return;
                }
            }
        }
    }

    /// Schedules a repaint. Has no effect on detached views.
    pub fn invalidate(&self, id: ViewId) {
        if self.node(id).attached {
            self.requests.request_render();
        }
    }

    // ----- animations -----

    /// Arms `animation` on an attached view and schedules the frame that
    /// will latch its start time.
    pub fn start_animation(&mut self, id: ViewId, animation: Box<dyn CanvasAnimation>) {
        assert!(
            self.node(id).attached,
            "cannot start an animation on a detached view"
        );
        let mut animation = animation;
        animation.start();
        self.node_mut(id).animation = Some(animation);
        if !self.launched.contains(&id) {
            self.launched.push(id);
        }
        self.invalidate(id);
    }

    pub fn clear_animation(&mut self, id: ViewId) {
        self.node_mut(id).animation = None;
        self.invalidate(id);
    }

    pub fn has_animation(&self, id: ViewId) -> bool {
        self.node(id).animation.is_some()
    }

    /// Advances every started animation to `now`, dropping finished ones,
    /// and schedules another frame while any remain active.
    ///
    /// Runs at the end of each frame. Animations the render walk already
    /// drove this frame see the same timestamp again, which is harmless;
    /// ones on detached or occluded views are kept moving here so they
    /// finish in real time.
    pub fn drive_animations(&mut self, now: u64) -> bool {
        let views = &mut self.views;
        let mut any_active = false;
        self.launched.retain(|&id| {
            let Some(view) = views.get_mut(&id) else {
                return false;
            };
            if !view.attached {
                return false;
            }
            let Some(animation) = view.animation.as_mut() else {
                return false;
            };
            let active = animation.calculate(now);
            if !active {
                view.animation = None;
            }
            any_active |= active;
            active
        });
        if any_active {
            self.requests.request_render();
        }
        any_active
    }

    // ----- properties -----

    /// Changes visibility, telling the subtree and scheduling a repaint.
    /// A layout pass is not implied; callers reveal views at their last
    /// laid-out bounds unless they also request layout.
    pub fn set_visibility(&mut self, id: ViewId, visibility: Visibility) {
        if self.node(id).visibility == visibility {
            return;
        }
        self.node_mut(id).visibility = visibility;
        self.notify_visibility_changed(id, visibility);
        self.invalidate(id);
    }

    fn notify_visibility_changed(&mut self, id: ViewId, visibility: Visibility) {
        let mut policy = self.take_policy(id);
        policy.on_visibility_changed(visibility);
        self.restore_policy(id, policy);
        let children: ChildList = self.node(id).children.iter().copied().collect();
        for child in children {
            if self.node(child).visibility == Visibility::Visible {
                self.notify_visibility_changed(child, visibility);
            }
        }
    }

    pub fn visibility(&self, id: ViewId) -> Visibility {
        self.node(id).visibility
    }

    pub fn set_background_color(&mut self, id: ViewId, color: Color) {
        self.node_mut(id).background_color = color;
        self.invalidate(id);
    }

    pub fn background_color(&self, id: ViewId) -> Color {
        self.node(id).background_color
    }

    /// Swaps the background texture, returning the previous one so the
    /// caller can recycle it against the canvas that prepared it.
    pub fn set_background(
        &mut self,
        id: ViewId,
        texture: Option<Box<dyn Texture>>,
    ) -> Option<Box<dyn Texture>> {
        let old = std::mem::replace(&mut self.node_mut(id).background, texture);
        self.invalidate(id);
        old
    }

    pub fn set_padding(&mut self, id: ViewId, padding: Insets) {
        self.node_mut(id).padding = padding;
    }

    pub fn padding(&self, id: ViewId) -> Insets {
        self.node(id).padding
    }

    pub fn set_scroll(&mut self, id: ViewId, x: i32, y: i32) {
        let view = self.node_mut(id);
        view.scroll_x = x;
        view.scroll_y = y;
        self.invalidate(id);
    }

    pub fn scroll(&self, id: ViewId) -> (i32, i32) {
        let view = self.node(id);
        (view.scroll_x, view.scroll_y)
    }

    /// Changes the stacking hint and fires the change listener with the
    /// new and previous values. No-op when the value is unchanged.
    pub fn set_z_order(&mut self, id: ViewId, z_order: i32) {
        let old = self.node(id).z_order;
        if old == z_order {
            return;
        }
        self.node_mut(id).z_order = z_order;
        if let Some(mut listener) = self.node_mut(id).on_z_order_changed.take() {
            listener(id, z_order, old);
            self.node_mut(id).on_z_order_changed = Some(listener);
        }
    }

    pub fn z_order(&self, id: ViewId) -> i32 {
        self.node(id).z_order
    }

    pub fn set_layout_params(&mut self, id: ViewId, params: Option<LayoutParams>) {
        self.node_mut(id).layout_params = params;
        self.request_layout(id);
    }

    pub fn layout_params(&self, id: ViewId) -> Option<LayoutParams> {
        self.node(id).layout_params
    }

    // ----- listeners -----

    pub fn set_on_click(&mut self, id: ViewId, listener: impl FnMut(ViewId) + Send + 'static) {
        self.node_mut(id).on_click = Some(Box::new(listener));
    }

    pub fn set_on_long_click(&mut self, id: ViewId, listener: impl FnMut(ViewId) + Send + 'static) {
        self.node_mut(id).on_long_click = Some(Box::new(listener));
    }

    /// Installs a touch listener. It replaces the policy's own touch
    /// handling entirely; the policy is not consulted as a fallback.
    pub fn set_on_touch(
        &mut self,
        id: ViewId,
        listener: impl FnMut(ViewId, &TouchEvent) -> bool + Send + 'static,
    ) {
        self.node_mut(id).on_touch = Some(Box::new(listener));
    }

    /// Installs a z-order change listener, called with the new and the
    /// previous value.
    pub fn set_on_z_order_changed(
        &mut self,
        id: ViewId,
        listener: impl FnMut(ViewId, i32, i32) + Send + 'static,
    ) {
        self.node_mut(id).on_z_order_changed = Some(Box::new(listener));
    }

    /// Fires the click listener, if any. Returns whether one ran.
    pub fn perform_click(&mut self, id: ViewId) -> bool {
        let Some(mut listener) = self.node_mut(id).on_click.take() else {
            return false;
        };
        listener(id);
        self.node_mut(id).on_click = Some(listener);
        true
    }

    /// Fires the long-click listener, if any. Returns whether one ran.
    pub fn perform_long_click(&mut self, id: ViewId) -> bool {
        let Some(mut listener) = self.node_mut(id).on_long_click.take() else {
            return false;
        };
        listener(id);
        self.node_mut(id).on_long_click = Some(listener);
        true
    }

    // ----- geometry queries -----

    pub fn bounds(&self, id: ViewId) -> Rect {
        self.node(id).bounds
    }

    pub fn measured_size(&self, id: ViewId) -> Size {
        self.node(id).measured
    }

    /// Bounds of `descendant` expressed in `ancestor`'s coordinate space,
    /// or `None` when `descendant` is not in that subtree.
    pub fn bounds_of(&self, ancestor: ViewId, descendant: ViewId) -> Option<Rect> {
        let mut left = 0;
        let mut top = 0;
        let mut cursor = descendant;
        while cursor != ancestor {
            let view = self.node(cursor);
            left += view.bounds.left;
            top += view.bounds.top;
            cursor = view.parent?;
        }
        let size = self.node(descendant).bounds.size();
        Some(Rect::new(left, top, left + size.width, top + size.height))
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).parent
    }

    pub fn is_attached(&self, id: ViewId) -> bool {
        self.node(id).attached
    }

    pub fn child_count(&self, id: ViewId) -> usize {
        self.node(id).children.len()
    }

    /// Panics if `index` is out of range.
    pub fn child_at(&self, id: ViewId, index: usize) -> ViewId {
        let children = &self.node(id).children;
        match children.get(index) {
            Some(&child) => child,
            None => panic!(
                "child index {index} out of range for view {id:?} with {} children",
                children.len()
            ),
        }
    }

    /// The child currently holding the pointer gesture under `id`.
    pub fn motion_target(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).motion_target
    }

    // ----- arena access -----

    pub(crate) fn node(&self, id: ViewId) -> &View {
        match self.views.get(&id) {
            Some(view) => view,
            None => panic!("stale view id {id:?}"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: ViewId) -> &mut View {
        match self.views.get_mut(&id) {
            Some(view) => view,
            None => panic!("stale view id {id:?}"),
        }
    }

    pub(crate) fn view_slot(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(&id)
    }

    pub(crate) fn take_policy(&mut self, id: ViewId) -> Box<dyn ViewPolicy> {
        match self.node_mut(id).policy.take() {
            Some(policy) => policy,
            None => panic!("view {id:?} re-entered one of its own policy callbacks"),
        }
    }

    pub(crate) fn restore_policy(&mut self, id: ViewId, policy: Box<dyn ViewPolicy>) {
        self.node_mut(id).policy = Some(policy);
    }

    pub(crate) fn frame_requests_ref(&self) -> &FrameRequests {
        &self.requests
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/scene_tests.rs"]
mod tests;
