/// Écriture des grilles ASCII : console et page HTML.

pub mod console;
pub mod html;

use anyhow::Result;
use at_core::frame::CharGrid;

/// Destination d'une grille ASCII rendue.
pub trait ArtWriter {
    /// Write one complete rendering.
    ///
    /// # Errors
    /// Returns an error if the underlying sink fails.
    fn write_art(&mut self, art: &CharGrid) -> Result<()>;
}
