use std::io::Write;

use anyhow::{Context, Result};
use at_core::frame::CharGrid;

use crate::ArtWriter;

/// Séparateur entre deux caractères d'une même ligne.
pub const CELL_SEPARATOR: char = ' ';

/// One row of the grid with cells separated by [`CELL_SEPARATOR`].
///
/// # Example
/// ```
/// use at_export::console::format_row;
/// assert_eq!(format_row(&['a', 'b', 'c']), "a b c");
/// ```
#[must_use]
pub fn format_row(row: &[char]) -> String {
    let mut line = String::with_capacity(row.len() * 2);
    for (i, &ch) in row.iter().enumerate() {
        if i > 0 {
            line.push(CELL_SEPARATOR);
        }
        line.push(ch);
    }
    line
}

/// Écrit la grille ligne par ligne sur un flux texte.
///
/// # Example
/// ```
/// use at_core::frame::CharGrid;
/// use at_export::ArtWriter;
/// use at_export::console::ConsoleWriter;
///
/// let mut art = CharGrid::new(2, 1);
/// art.set(0, 0, '#');
/// art.set(1, 0, '.');
/// let mut out = Vec::new();
/// ConsoleWriter::new(&mut out).write_art(&art).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "# .\n");
/// ```
pub struct ConsoleWriter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleWriter<W> {
    /// Wrap a text sink (stdout, a buffer, a file).
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the wrapped sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ArtWriter for ConsoleWriter<W> {
    fn write_art(&mut self, art: &CharGrid) -> Result<()> {
        for row in art.rows() {
            writeln!(self.out, "{}", format_row(row)).context("Écriture console échouée")?;
        }
        self.out.flush().context("Flush console échoué")?;
        Ok(())
    }
}
