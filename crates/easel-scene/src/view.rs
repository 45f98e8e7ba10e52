use easel_graphics::{Color, Insets, Rect, Size};
use easel_texture::Texture;

use crate::event::TouchEvent;
use crate::layout_params::LayoutParams;
use crate::policy::{DefaultPolicy, ViewPolicy};

use easel_animation::CanvasAnimation;

/// Handle to a view stored in a [`Scene`](crate::Scene).
///
/// Ids are minted by the owning scene and never reused; passing an id
/// whose view has been discarded is a caller bug and panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Invisible,
}

pub(crate) type ClickListener = Box<dyn FnMut(ViewId) + Send>;
pub(crate) type LongClickListener = Box<dyn FnMut(ViewId) + Send>;
pub(crate) type TouchListener = Box<dyn FnMut(ViewId, &TouchEvent) -> bool + Send>;
pub(crate) type ZOrderListener = Box<dyn FnMut(ViewId, i32, i32) + Send>;

/// One node of the view tree.
///
/// A view owns its behavior (a [`ViewPolicy`]), its children by id, and
/// the retained state the pipeline reads each frame: bounds, visibility,
/// background, scroll offset and the memoized measure result.
pub struct View {
    pub(crate) policy: Option<Box<dyn ViewPolicy>>,
    pub(crate) parent: Option<ViewId>,
    pub(crate) attached: bool,
    pub(crate) children: Vec<ViewId>,
    pub(crate) visibility: Visibility,
    pub(crate) bounds: Rect,
    pub(crate) scroll_x: i32,
    pub(crate) scroll_y: i32,
    pub(crate) padding: Insets,
    pub(crate) z_order: i32,
    pub(crate) background_color: Color,
    pub(crate) background: Option<Box<dyn Texture>>,
    pub(crate) layout_params: Option<LayoutParams>,
    pub(crate) measured: Size,
    pub(crate) measured_size_set: bool,
    pub(crate) last_spec: Option<(i32, i32)>,
    pub(crate) layout_requested: bool,
    pub(crate) animation: Option<Box<dyn CanvasAnimation>>,
    pub(crate) motion_target: Option<ViewId>,
    pub(crate) on_click: Option<ClickListener>,
    pub(crate) on_long_click: Option<LongClickListener>,
    pub(crate) on_touch: Option<TouchListener>,
    pub(crate) on_z_order_changed: Option<ZOrderListener>,
}

impl View {
    /// A view with the default policy: it measures to exactly the specs
    /// it is given and draws nothing beyond its background.
    pub fn new() -> Self {
        Self::with_policy(DefaultPolicy)
    }

    pub fn with_policy(policy: impl ViewPolicy + 'static) -> Self {
        Self {
            policy: Some(Box::new(policy)),
            parent: None,
            attached: false,
            children: Vec::new(),
            visibility: Visibility::Visible,
            bounds: Rect::EMPTY,
            scroll_x: 0,
            scroll_y: 0,
            padding: Insets::ZERO,
            z_order: 0,
            background_color: Color::BLACK,
            background: None,
            layout_params: None,
            measured: Size::ZERO,
            measured_size_set: false,
            last_spec: None,
            layout_requested: false,
            animation: None,
            motion_target: None,
            on_click: None,
            on_long_click: None,
            on_touch: None,
            on_z_order_changed: None,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}
