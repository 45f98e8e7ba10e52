//! GPU-resident texture without a backing copy

use easel_graphics::{Canvas, ContextId, TextureId};

use crate::error::TextureError;
use crate::texture::{Texture, TextureState};

/// A texture whose content lives only in GPU memory.
///
/// Producers prepare it against a context, then fill it through the
/// graphics API directly (video frames, camera previews). Because no CPU
/// copy is retained, content lost to a context recreation is gone for good:
/// binding afterwards keeps failing until the texture is prepared and
/// filled again.
pub struct RawTexture {
    width: i32,
    height: i32,
    opaque: bool,
    flip_vertical: bool,
    id: Option<TextureId>,
    context: Option<ContextId>,
    state: TextureState,
}

impl RawTexture {
    pub fn new(width: i32, height: i32, opaque: bool) -> Self {
        Self {
            width,
            height,
            opaque,
            flip_vertical: true,
            id: None,
            context: None,
            state: TextureState::Unloaded,
        }
    }

    pub fn id(&self) -> Option<TextureId> {
        self.id
    }

    pub fn is_flipped_vertically(&self) -> bool {
        self.flip_vertical
    }

    pub fn set_flipped_vertically(&mut self, flip: bool) {
        self.flip_vertical = flip;
    }

    /// Allocates and configures GPU storage against this canvas's context.
    /// A texture already prepared against the same context is left alone.
    pub fn prepare(&mut self, canvas: &mut dyn Canvas) {
        let current = canvas.context_id();
        if self.state == TextureState::Loaded && self.context == Some(current) {
            return;
        }
        let id = canvas.resource_ids().generate_texture();
        canvas.initialize_texture(id, self.width, self.height);
        canvas.set_texture_parameters(id);
        self.id = Some(id);
        self.context = Some(current);
        self.state = TextureState::Loaded;
    }

    /// Checks that the uploaded content is usable on this canvas.
    pub fn bind(&mut self, canvas: &mut dyn Canvas) -> Result<TextureId, TextureError> {
        let id = match (self.state, self.id) {
            (TextureState::Loaded, Some(id)) => id,
            _ => return Err(TextureError::NotReady),
        };
        let prepared_against = self.context.unwrap_or_else(|| canvas.context_id());
        if prepared_against != canvas.context_id() {
            // No backup to re-upload from; this instance stays dead.
            self.state = TextureState::Unloaded;
            return Err(TextureError::ContentLost { prepared_against });
        }
        Ok(id)
    }

    /// Returns the GPU id to the context for deferred deletion.
    pub fn recycle(&mut self, canvas: &mut dyn Canvas) {
        if let Some(id) = self.id.take() {
            if self.context == Some(canvas.context_id()) {
                canvas.unload_texture(id);
            }
        }
        self.context = None;
        self.state = TextureState::Unloaded;
    }
}

impl Texture for RawTexture {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn state(&self) -> TextureState {
        self.state
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, x: i32, y: i32, width: i32, height: i32) {
        match self.bind(canvas) {
            Ok(id) => canvas.draw_texture(
                id,
                x as f32,
                y as f32,
                width as f32,
                height as f32,
                self.flip_vertical,
            ),
            Err(error) => log::warn!("skipping raw texture draw: {error}"),
        }
    }

    // No backup copy exists, so there is nothing to release and rebuild.
    fn evict(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_testing::RecordingCanvas;

    #[test]
    fn prepare_allocates_and_configures_storage() {
        let mut canvas = RecordingCanvas::new();
        let mut texture = RawTexture::new(64, 32, false);
        assert_eq!(texture.state(), TextureState::Unloaded);
        texture.prepare(&mut canvas);
        assert_eq!(texture.state(), TextureState::Loaded);
        let id = texture.id().unwrap();
        assert_eq!(canvas.initialized_textures(), vec![(id, 64, 32)]);
    }

    #[test]
    fn prepare_is_idempotent_per_context() {
        let mut canvas = RecordingCanvas::new();
        let mut texture = RawTexture::new(8, 8, true);
        texture.prepare(&mut canvas);
        let first = texture.id();
        texture.prepare(&mut canvas);
        assert_eq!(texture.id(), first);
        assert_eq!(canvas.initialized_textures().len(), 1);
    }

    #[test]
    fn draw_binds_and_honors_flip_flag() {
        let mut canvas = RecordingCanvas::new();
        let mut texture = RawTexture::new(10, 10, true);
        texture.prepare(&mut canvas);
        texture.draw(&mut canvas, 0, 0, 10, 10);
        let draws = canvas.texture_draws();
        assert_eq!(draws.len(), 1);
        assert!(draws[0].1, "raw textures default to flipped drawing");
        texture.set_flipped_vertically(false);
        texture.draw(&mut canvas, 0, 0, 10, 10);
        assert!(!canvas.texture_draws()[1].1);
    }

    #[test]
    fn unprepared_draw_is_skipped() {
        let mut canvas = RecordingCanvas::new();
        let mut texture = RawTexture::new(10, 10, true);
        texture.draw(&mut canvas, 0, 0, 10, 10);
        assert!(canvas.texture_draws().is_empty());
    }

    #[test]
    fn bind_after_context_loss_is_a_permanent_failure() {
        let mut canvas = RecordingCanvas::new();
        let original_context = canvas.context_id();
        let mut texture = RawTexture::new(10, 10, true);
        texture.prepare(&mut canvas);
        canvas.recreate_context();
        assert_eq!(
            texture.bind(&mut canvas),
            Err(TextureError::ContentLost {
                prepared_against: original_context
            })
        );
        // Later binds keep failing; the content cannot come back.
        assert_eq!(texture.bind(&mut canvas), Err(TextureError::NotReady));
        assert_eq!(texture.state(), TextureState::Unloaded);
    }

    #[test]
    fn recycle_defers_deletion_to_the_context() {
        let mut canvas = RecordingCanvas::new();
        let mut texture = RawTexture::new(10, 10, true);
        texture.prepare(&mut canvas);
        let id = texture.id().unwrap();
        texture.recycle(&mut canvas);
        assert_eq!(texture.state(), TextureState::Unloaded);
        assert_eq!(canvas.unloaded_textures(), vec![id]);
        assert!(canvas.deleted_textures().is_empty());
        canvas.delete_recycled_resources();
        assert_eq!(canvas.deleted_textures(), vec![id]);
    }

    #[test]
    fn evict_keeps_gpu_content() {
        let mut canvas = RecordingCanvas::new();
        let mut texture = RawTexture::new(10, 10, true);
        texture.prepare(&mut canvas);
        texture.evict();
        assert_eq!(texture.state(), TextureState::Loaded);
        assert!(texture.bind(&mut canvas).is_ok());
    }
}
