/// Per-child sizing request consulted by the parent's measure policy.
///
/// Dimensions are either a concrete pixel count or [`MATCH_PARENT`],
/// which resolves to the measure spec the parent itself received.
///
/// [`MATCH_PARENT`]: LayoutParams::MATCH_PARENT
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutParams {
    pub width: i32,
    pub height: i32,
}

impl LayoutParams {
    pub const MATCH_PARENT: i32 = -1;

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn match_parent() -> Self {
        Self::new(Self::MATCH_PARENT, Self::MATCH_PARENT)
    }

    /// Resolves one dimension against the spec the parent was measured with.
    pub fn resolve(value: i32, parent_spec: i32) -> i32 {
        if value == Self::MATCH_PARENT {
            parent_spec
        } else {
            value
        }
    }
}
