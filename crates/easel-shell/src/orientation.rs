//! Display rotation state and the compensation it induces

use easel_graphics::Transform;

/// Physical rotation of the display away from its natural orientation, in
/// quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl DisplayRotation {
    /// Quarter turn for `degrees`, which may be any multiple of 90,
    /// negative included. Other values round down to the nearest quarter.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) / 90 {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg0,
            Self::Deg90 => Self::Deg270,
            Self::Deg180 => Self::Deg180,
            Self::Deg270 => Self::Deg90,
        }
    }

    /// True for the rotations that swap a surface's width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Live source of the display rotation.
///
/// Installed on a [`Root`](crate::Root); the layout pass re-reads it so a
/// rotation is picked up on the next frame without an explicit layout
/// request.
pub trait OrientationSource: Send {
    /// Current physical rotation of the display.
    fn display_rotation(&self) -> DisplayRotation;

    /// Rotation to apply to rendered content so it appears upright. Zero
    /// when the window rotates together with the display.
    fn compensation(&self) -> DisplayRotation {
        self.display_rotation().inverse()
    }
}

/// Builds the transform mapping surface coordinates into the coordinate
/// space of content rendered under `compensation` on a `width` x `height`
/// surface.
///
/// A quarter turn moves the pivot: the rotated content is `height` wide and
/// `width` tall, so its center sits at the swapped half-extents.
pub(crate) fn compensation_matrix(
    compensation: DisplayRotation,
    width: i32,
    height: i32,
) -> Transform {
    if compensation == DisplayRotation::Deg0 {
        return Transform::IDENTITY;
    }
    let half_width = (width / 2) as f32;
    let half_height = (height / 2) as f32;
    let mut matrix = Transform::rotation(compensation.degrees() as f32);
    matrix.pre_translate(-half_width, -half_height);
    if compensation.swaps_axes() {
        matrix.post_translate(half_height, half_width);
    } else {
        matrix.post_translate(half_width, half_height);
    }
    matrix
}
