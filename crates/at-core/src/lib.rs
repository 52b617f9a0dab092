/// Types partagés d'asciitone : frames, grilles, erreurs et configuration.
///
/// Every other crate of the workspace depends on this one; it has no
/// knowledge of glyph rendering, image decoding or output formats.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use config::{ArtConfig, OutputMethod, RoundPolicy};
pub use error::CoreError;
pub use frame::{CharGrid, FrameBuffer, GlyphBitmap, TileGrid};
pub use traits::GlyphSource;
