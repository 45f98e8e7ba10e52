use easel_graphics::{Canvas, SaveFlags};

use crate::scene::{ChildList, Scene};
use crate::view::{ViewId, Visibility};

impl Scene {
    /// Renders the content pane and everything below it.
    ///
    /// `now` is the frame timestamp; animations encountered during the
    /// walk are advanced to it and another frame is requested while any
    /// remain active.
    pub fn render(&mut self, canvas: &mut dyn Canvas, now: u64) {
        if let Some(pane) = self.content_pane() {
            self.render_view(pane, canvas, now);
        }
    }

    fn render_view(&mut self, id: ViewId, canvas: &mut dyn Canvas, now: u64) {
        self.render_background(id, canvas);

        let size = self.node(id).bounds.size();
        let mut policy = self.take_policy(id);
        policy.on_render(canvas, size);
        self.restore_policy(id, policy);

        let children: ChildList = self.node(id).children.iter().copied().collect();
        if !children.is_empty() {
            canvas.save(SaveFlags::ALL);
            for child in children {
                self.render_child(id, child, canvas, now);
            }
            canvas.restore();
        }
    }

    fn render_background(&mut self, id: ViewId, canvas: &mut dyn Canvas) {
        let (width, height, color) = {
            let view = self.node(id);
            (view.bounds.width(), view.bounds.height(), view.background_color)
        };
        let background_animating = {
            let view = self.node_mut(id);
            if let Some(background) = view.background.as_mut() {
                background.draw(canvas, 0, 0, width, height);
                background.is_animating()
            } else {
                canvas.fill_rect(0.0, 0.0, width as f32, height as f32, color);
                false
            }
        };
        if background_animating {
            self.frame_requests_ref().request_render();
        }
    }

    /// Renders one child: translate to its scrolled position, bracket the
    /// subtree in the child's animation if one is running, recurse.
    fn render_child(&mut self, parent: ViewId, child: ViewId, canvas: &mut dyn Canvas, now: u64) {
        let (scroll_x, scroll_y) = {
            let view = self.node(parent);
            (view.scroll_x, view.scroll_y)
        };
        let (offset_x, offset_y, skip) = {
            let view = self.node(child);
            // Invisible children are skipped unless an animation still
            // holds them in the frame.
            let skip = view.visibility != Visibility::Visible && view.animation.is_none();
            (
                view.bounds.left - scroll_x,
                view.bounds.top - scroll_y,
                skip,
            )
        };
        if skip {
            return;
        }

        canvas.translate(offset_x as f32, offset_y as f32);

        let mut animation = self.node_mut(child).animation.take();
        let mut still_active = false;
        if let Some(animation) = animation.as_mut() {
            canvas.save(animation.save_flags());
            still_active = animation.calculate(now);
            if still_active {
                self.frame_requests_ref().request_render();
            }
            animation.apply(canvas);
        }

        self.render_view(child, canvas, now);

        if animation.is_some() {
            canvas.restore();
        }
        if still_active {
            if let Some(view) = self.view_slot(child) {
                view.animation = animation;
            }
        }

        canvas.translate(-(offset_x as f32), -(offset_y as f32));
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
