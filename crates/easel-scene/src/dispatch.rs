use crate::event::{TouchAction, TouchEvent};
use crate::scene::{ChildList, Scene};
use crate::view::{ViewId, Visibility};

impl Scene {
    /// Routes a pointer event through `id`'s subtree. Returns whether any
    /// view consumed it.
    ///
    /// A `Down` searches visible children in reverse paint order, so the
    /// topmost child under the point wins. The child that consumes the
    /// `Down` captures the gesture: every later event goes straight to it,
    /// translated but not bounds-checked, until `Up` or `Cancel` releases
    /// the capture. A second `Down` while a capture is held first sends
    /// the old target a synthesized `Cancel`, then searches afresh.
    pub fn dispatch_touch(&mut self, id: ViewId, event: TouchEvent) -> bool {
        if let Some(target) = self.node(id).motion_target {
            if event.action == TouchAction::Down {
                let cancel = event.with_action(TouchAction::Cancel);
                self.dispatch_to_child(id, cancel, target, false);
                self.node_mut(id).motion_target = None;
            } else {
                self.dispatch_to_child(id, event, target, false);
                if matches!(event.action, TouchAction::Up | TouchAction::Cancel) {
                    self.node_mut(id).motion_target = None;
                }
                return true;
            }
        }

        if event.action == TouchAction::Down {
            let children: ChildList = self.node(id).children.iter().copied().collect();
            for &child in children.iter().rev() {
                if self.node(child).visibility != Visibility::Visible {
                    continue;
                }
                if self.dispatch_to_child(id, event, child, true) {
                    self.node_mut(id).motion_target = Some(child);
                    return true;
                }
            }
        }

        self.handle_touch(id, event)
    }

    /// Forwards an event into `child`'s coordinate space. Children draw
    /// offset by the parent's scroll, so hit tests and translation use the
    /// scrolled position.
    fn dispatch_to_child(
        &mut self,
        parent: ViewId,
        event: TouchEvent,
        child: ViewId,
        check_bounds: bool,
    ) -> bool {
        let (scroll_x, scroll_y) = {
            let view = self.node(parent);
            (view.scroll_x, view.scroll_y)
        };
        let bounds = self.node(child).bounds.offset(-scroll_x, -scroll_y);
        if check_bounds && !bounds.contains(event.x as i32, event.y as i32) {
            return false;
        }
        let translated = event.offset(-(bounds.left as f32), -(bounds.top as f32));
        self.dispatch_touch(child, translated)
    }

    /// The view's own handling, once no child claimed the event. An
    /// installed touch listener replaces the policy's handling outright.
    fn handle_touch(&mut self, id: ViewId, event: TouchEvent) -> bool {
        if self.node(id).visibility != Visibility::Visible {
            return false;
        }
        if let Some(mut listener) = self.node_mut(id).on_touch.take() {
            let consumed = listener(id, &event);
            self.node_mut(id).on_touch = Some(listener);
            return consumed;
        }
        let size = self.node(id).bounds.size();
        let mut policy = self.take_policy(id);
        let consumed = policy.on_touch(&event, size);
        self.restore_policy(id, policy);
        consumed
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
