use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use at_core::frame::CharGrid;

use crate::ArtWriter;

/// Famille de repli si la police configurée est absente du navigateur.
const FALLBACK_FAMILY: &str = "monospace";

/// Escape the characters that are significant in HTML text and attributes.
///
/// # Example
/// ```
/// use at_export::html::escape;
/// assert_eq!(escape("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Build the standalone HTML page for `art`, rendered in `font`.
#[must_use]
pub fn render_page(art: &CharGrid, font: &str) -> String {
    let mut page = String::with_capacity(art.cells.len() * 2 + 512);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>ASCII Art</title>\n</head>\n<body>\n");
    page.push_str(&format!(
        "<pre style=\"font-family: '{}', {FALLBACK_FAMILY}; font-size: 8px; line-height: 1;\">\n",
        escape(font)
    ));
    for row in art.rows() {
        for &ch in row {
            let mut buf = [0u8; 4];
            page.push_str(&escape(ch.encode_utf8(&mut buf)));
        }
        page.push('\n');
    }
    page.push_str("</pre>\n</body>\n</html>\n");
    page
}

/// Écrit chaque rendu dans un fichier HTML (écrasé à chaque appel).
///
/// # Example
/// ```no_run
/// use at_core::frame::CharGrid;
/// use at_export::ArtWriter;
/// use at_export::html::HtmlWriter;
///
/// let mut writer = HtmlWriter::new("out.html", "Courier New");
/// writer.write_art(&CharGrid::new(4, 2)).unwrap();
/// ```
pub struct HtmlWriter {
    path: PathBuf,
    font: String,
}

impl HtmlWriter {
    /// Writer targeting `path`, rendering with font family `font`.
    pub fn new(path: impl Into<PathBuf>, font: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            font: font.into(),
        }
    }

    /// Output file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtWriter for HtmlWriter {
    fn write_art(&mut self, art: &CharGrid) -> Result<()> {
        let page = render_page(art, &self.font);
        std::fs::write(&self.path, page)
            .with_context(|| format!("Impossible d'écrire {}", self.path.display()))?;
        log::info!(
            "HTML écrit : {} ({}×{})",
            self.path.display(),
            art.width,
            art.height
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CharGrid {
        let mut art = CharGrid::new(2, 2);
        art.set(0, 0, '<');
        art.set(1, 0, '&');
        art.set(0, 1, ' ');
        art.set(1, 1, '#');
        art
    }

    #[test]
    fn page_escapes_cells_and_keeps_rows() {
        let page = render_page(&sample(), "Courier New");
        assert!(page.contains("&lt;&amp;\n #\n</pre>"));
        assert!(page.contains("font-family: 'Courier New', monospace"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn font_name_is_escaped() {
        let page = render_page(&sample(), "Evil'\"<x>");
        assert!(page.contains("Evil&#39;&quot;&lt;x&gt;"));
        assert!(!page.contains("<x>"));
    }

    #[test]
    fn writer_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let mut writer = HtmlWriter::new(&path, "Courier New");
        writer.write_art(&sample()).unwrap();
        let mut small = CharGrid::new(1, 1);
        small.set(0, 0, 'z');
        writer.write_art(&small).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(">\nz\n</pre>"));
        assert!(!written.contains("&lt;"));
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = HtmlWriter::new(dir.path().join("absent").join("out.html"), "x");
        let err = writer.write_art(&sample()).unwrap_err();
        assert!(err.to_string().contains("out.html"));
    }
}
