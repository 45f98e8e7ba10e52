//! Texture lifecycle and drawable variants for Easel
//!
//! A texture is a drawable rectangular surface with a GPU-residency state
//! machine. The hierarchy is a closed set of variants behind one small
//! trait: [`ColorTexture`] (flat color, always ready), [`RawTexture`]
//! (GPU-resident, cannot rebuild lost content) and [`FadeTexture`]
//! (time-limited fade over another texture).

mod color_texture;
mod error;
mod fade;
mod raw;
mod texture;

pub use color_texture::*;
pub use error::*;
pub use fade::*;
pub use raw::*;
pub use texture::*;

pub mod prelude {
    pub use crate::color_texture::ColorTexture;
    pub use crate::fade::{FadeTexture, FADE_DURATION};
    pub use crate::raw::RawTexture;
    pub use crate::texture::{Texture, TextureState};
}
