//! Where Placard's faces come from
//!
//! Three kinds of face can sit in a [`placard_core::FontBook`]:
//!
//! - [`Font`]: a real font file, outlines drawn through skrifa
//! - the system sans-serif bold, found through fontdb, used when the
//!   display face is missing or fails to load
//! - [`BlockFace`]: solid blocks for any character, so text is never lost
//!
//! [`FontLoader`] fetches the display face off the painting thread and
//! reports its progress as a [`LoadState`].

mod block;
mod font;
mod loader;
pub mod system;

pub use block::BlockFace;
pub use font::Font;
pub use loader::{fallback_book, fallback_face, FontLoader, FontSource, LoadState};

/// Result of loading one face
pub type LoadResult<T> = std::result::Result<T, placard_core::error::FontLoadError>;
