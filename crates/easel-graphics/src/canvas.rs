//! The drawing-context contract consumed by the scene graph
//!
//! The scene graph never talks to a graphics API directly. Hosts implement
//! [`Canvas`] over whatever immediate-mode surface they render with; the
//! tree walk, animations, and textures are written purely against this
//! trait.

use std::ops::BitOr;

use crate::color::Color;
use crate::geometry::Rect;
use crate::paint::Paint;

/// Bit set naming the drawing-context state categories a save captures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveFlags(u8);

impl SaveFlags {
    pub const MATRIX: SaveFlags = SaveFlags(1 << 0);
    pub const ALPHA: SaveFlags = SaveFlags(1 << 1);
    pub const CLIP: SaveFlags = SaveFlags(1 << 2);
    pub const ALL: SaveFlags = SaveFlags(0b111);

    pub const fn empty() -> Self {
        SaveFlags(0)
    }

    pub const fn contains(&self, other: SaveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SaveFlags {
    type Output = SaveFlags;

    fn bitor(self, rhs: SaveFlags) -> SaveFlags {
        SaveFlags(self.0 | rhs.0)
    }
}

/// Stable identity of the GPU context behind a canvas.
///
/// Changes when the context is torn down and recreated; textures compare it
/// to detect that their uploaded content is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Opaque GPU texture object name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque GPU buffer object name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(u32);

impl BufferId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// External allocator for GPU object names.
pub trait ResourceIdAllocator {
    fn generate_texture(&mut self) -> TextureId;
    fn delete_texture(&mut self, id: TextureId);
    fn generate_buffer(&mut self) -> BufferId;
    fn delete_buffer(&mut self, id: BufferId);
}

/// Immediate-mode drawing context.
///
/// State manipulation is stack-shaped: [`Canvas::save`] captures exactly the
/// categories named by its flags and [`Canvas::restore`] reinstates them.
/// Saving less than an effect touches leaks that effect onto sibling draws,
/// so callers pass the precise set they perturb.
pub trait Canvas {
    /// Identity of the backing GPU context.
    fn context_id(&self) -> ContextId;

    /// The external GPU object-name allocator.
    fn resource_ids(&mut self) -> &mut dyn ResourceIdAllocator;

    fn save(&mut self, flags: SaveFlags);
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn rotate(&mut self, degrees: f32);

    /// Intersects the clip with `rect` in current coordinates.
    fn clip_rect(&mut self, rect: Rect);

    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);

    fn multiply_alpha(&mut self, alpha: f32) {
        let current = self.alpha();
        self.set_alpha(current * alpha);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint);

    /// Allocates GPU storage for a texture of the given dimensions.
    fn initialize_texture(&mut self, id: TextureId, width: i32, height: i32);

    /// Applies the sampling/wrap parameters this canvas draws textures with.
    fn set_texture_parameters(&mut self, id: TextureId);

    fn draw_texture(
        &mut self,
        id: TextureId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        flip_vertical: bool,
    );

    /// Schedules a texture for deletion; returns false if the id was not
    /// known to this context. Actual deletion is deferred until
    /// [`Canvas::delete_recycled_resources`].
    fn unload_texture(&mut self, id: TextureId) -> bool;

    /// Deletes every resource scheduled since the last call. Runs at the
    /// top of a frame, on the render thread.
    fn delete_recycled_resources(&mut self);
}
