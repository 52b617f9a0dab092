/// Moteur de conversion image → ASCII par correspondance de luminosité.
///
/// Maintains a brightness table over a character set, pads and tiles
/// images, and maps each tile to the closest-brightness character.

pub mod brightness_table;
pub mod geometry;
pub mod glyph;
pub mod matcher;
pub mod pipeline;
pub mod tile_cache;
