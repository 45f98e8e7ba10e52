use std::sync::atomic::{AtomicU64, Ordering};

use easel_graphics::{
    BufferId, Canvas, Color, ContextId, Paint, Rect, ResourceIdAllocator, SaveFlags, TextureId,
};

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(1);

fn fresh_context() -> ContextId {
    ContextId::new(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed))
}

/// One recorded drawing call.
///
/// Geometry in `FillRect`, `DrawRect`, `DrawLine` and `DrawTexture` is in
/// surface coordinates: the translation and scale in effect at call time
/// are folded in. Rotation is logged as its own op but not folded in.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    Save(SaveFlags),
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
    Rotate(f32),
    ClipRect(Rect),
    SetAlpha(f32),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        alpha: f32,
    },
    DrawRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    DrawLine {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    },
    InitializeTexture {
        id: TextureId,
        width: i32,
        height: i32,
    },
    SetTextureParameters(TextureId),
    DrawTexture {
        id: TextureId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        flip_vertical: bool,
        alpha: f32,
    },
    UnloadTexture(TextureId),
    DeleteRecycled,
}

#[derive(Clone, Copy)]
struct DrawState {
    offset_x: f32,
    offset_y: f32,
    scale_x: f32,
    scale_y: f32,
    alpha: f32,
    clip: Option<Rect>,
}

impl DrawState {
    fn initial() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            clip: None,
        }
    }
}

struct CountingIds {
    next_texture: u32,
    next_buffer: u32,
    deleted_textures: Vec<TextureId>,
    deleted_buffers: Vec<BufferId>,
}

impl ResourceIdAllocator for CountingIds {
    fn generate_texture(&mut self) -> TextureId {
        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        id
    }

    fn delete_texture(&mut self, id: TextureId) {
        self.deleted_textures.push(id);
    }

    fn generate_buffer(&mut self) -> BufferId {
        let id = BufferId::new(self.next_buffer);
        self.next_buffer += 1;
        id
    }

    fn delete_buffer(&mut self, id: BufferId) {
        self.deleted_buffers.push(id);
    }
}

/// A [`Canvas`] that draws nothing and remembers everything.
///
/// Tracks the same stack-shaped state a real context would (translation,
/// scale, alpha, clip, honoring save flags on restore), allocates texture
/// ids from a counter, and keeps the unload/delete split so deferred
/// recycling is observable.
pub struct RecordingCanvas {
    context: ContextId,
    ops: Vec<CanvasOp>,
    state: DrawState,
    stack: Vec<(SaveFlags, DrawState)>,
    known_textures: Vec<TextureId>,
    pending_unload: Vec<TextureId>,
    ids: CountingIds,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            context: fresh_context(),
            ops: Vec::new(),
            state: DrawState::initial(),
            stack: Vec::new(),
            known_textures: Vec::new(),
            pending_unload: Vec::new(),
            ids: CountingIds {
                next_texture: 1,
                next_buffer: 1,
                deleted_textures: Vec::new(),
                deleted_buffers: Vec::new(),
            },
        }
    }

    /// Simulates losing and recreating the GPU context: the canvas gets a
    /// new [`ContextId`] and forgets every texture id it had handed out.
    pub fn recreate_context(&mut self) {
        self.context = fresh_context();
        self.known_textures.clear();
        self.pending_unload.clear();
    }

    /// Every recorded call, in order.
    pub fn ops(&self) -> Vec<CanvasOp> {
        self.ops.clone()
    }

    /// Forgets recorded calls. Canvas state and resources are kept.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Recorded rect fills as `(x, y, width, height, color)`, in surface
    /// coordinates.
    pub fn fills(&self) -> Vec<(f32, f32, f32, f32, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                    ..
                } => Some((*x, *y, *width, *height, *color)),
                _ => None,
            })
            .collect()
    }

    /// The alpha in effect at each recorded rect fill.
    pub fn fill_alphas(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::FillRect { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect()
    }

    /// The flags of each recorded save.
    pub fn saves(&self) -> Vec<SaveFlags> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Save(flags) => Some(*flags),
                _ => None,
            })
            .collect()
    }

    /// Recorded texture draws as `(id, flip_vertical)`.
    pub fn texture_draws(&self) -> Vec<(TextureId, bool)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::DrawTexture {
                    id, flip_vertical, ..
                } => Some((*id, *flip_vertical)),
                _ => None,
            })
            .collect()
    }

    /// Textures given storage, as `(id, width, height)`.
    pub fn initialized_textures(&self) -> Vec<(TextureId, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::InitializeTexture { id, width, height } => Some((*id, *width, *height)),
                _ => None,
            })
            .collect()
    }

    /// Textures scheduled for deletion and not yet deleted.
    pub fn unloaded_textures(&self) -> Vec<TextureId> {
        self.pending_unload.clone()
    }

    /// Textures actually deleted by [`Canvas::delete_recycled_resources`].
    pub fn deleted_textures(&self) -> Vec<TextureId> {
        self.ids.deleted_textures.clone()
    }

    /// The translation currently in effect, for asserting walk offsets.
    pub fn translation(&self) -> (f32, f32) {
        (self.state.offset_x, self.state.offset_y)
    }

    fn surface_x(&self, x: f32) -> f32 {
        self.state.offset_x + self.state.scale_x * x
    }

    fn surface_y(&self, y: f32) -> f32 {
        self.state.offset_y + self.state.scale_y * y
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    fn context_id(&self) -> ContextId {
        self.context
    }

    fn resource_ids(&mut self) -> &mut dyn ResourceIdAllocator {
        &mut self.ids
    }

    fn save(&mut self, flags: SaveFlags) {
        self.stack.push((flags, self.state));
        self.ops.push(CanvasOp::Save(flags));
    }

    fn restore(&mut self) {
        let Some((flags, saved)) = self.stack.pop() else {
            panic!("restore without a matching save");
        };
        if flags.contains(SaveFlags::MATRIX) {
            self.state.offset_x = saved.offset_x;
            self.state.offset_y = saved.offset_y;
            self.state.scale_x = saved.scale_x;
            self.state.scale_y = saved.scale_y;
        }
        if flags.contains(SaveFlags::ALPHA) {
            self.state.alpha = saved.alpha;
        }
        if flags.contains(SaveFlags::CLIP) {
            self.state.clip = saved.clip;
        }
        self.ops.push(CanvasOp::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.offset_x += self.state.scale_x * dx;
        self.state.offset_y += self.state.scale_y * dy;
        self.ops.push(CanvasOp::Translate(dx, dy));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale_x *= sx;
        self.state.scale_y *= sy;
        self.ops.push(CanvasOp::Scale(sx, sy));
    }

    fn rotate(&mut self, degrees: f32) {
        self.ops.push(CanvasOp::Rotate(degrees));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip = Some(rect);
        self.ops.push(CanvasOp::ClipRect(rect));
    }

    fn alpha(&self) -> f32 {
        self.state.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
        self.ops.push(CanvasOp::SetAlpha(alpha));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let op = CanvasOp::FillRect {
            x: self.surface_x(x),
            y: self.surface_y(y),
            width: width * self.state.scale_x,
            height: height * self.state.scale_y,
            color,
            alpha: self.state.alpha,
        };
        self.ops.push(op);
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
        let op = CanvasOp::DrawRect {
            x: self.surface_x(x),
            y: self.surface_y(y),
            width: width * self.state.scale_x,
            height: height * self.state.scale_y,
            color: paint.color(),
        };
        self.ops.push(op);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) {
        let op = CanvasOp::DrawLine {
            x1: self.surface_x(x1),
            y1: self.surface_y(y1),
            x2: self.surface_x(x2),
            y2: self.surface_y(y2),
            color: paint.color(),
        };
        self.ops.push(op);
    }

    fn initialize_texture(&mut self, id: TextureId, width: i32, height: i32) {
        self.known_textures.push(id);
        self.ops.push(CanvasOp::InitializeTexture { id, width, height });
    }

    fn set_texture_parameters(&mut self, id: TextureId) {
        self.ops.push(CanvasOp::SetTextureParameters(id));
    }

    fn draw_texture(
        &mut self,
        id: TextureId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        flip_vertical: bool,
    ) {
        let op = CanvasOp::DrawTexture {
            id,
            x: self.surface_x(x),
            y: self.surface_y(y),
            width: width * self.state.scale_x,
            height: height * self.state.scale_y,
            flip_vertical,
            alpha: self.state.alpha,
        };
        self.ops.push(op);
    }

    fn unload_texture(&mut self, id: TextureId) -> bool {
        if !self.known_textures.contains(&id) {
            return false;
        }
        self.pending_unload.push(id);
        self.ops.push(CanvasOp::UnloadTexture(id));
        true
    }

    fn delete_recycled_resources(&mut self) {
        for id in self.pending_unload.drain(..) {
            self.ids.deleted_textures.push(id);
        }
        self.ops.push(CanvasOp::DeleteRecycled);
    }
}
