use crate::frame::GlyphBitmap;

/// Fournit le bitmap de glyphe d'un caractère pour le calcul de luminosité.
///
/// Every bitmap returned by one source must have the same dimensions, so that
/// raw brightness values are comparable across characters. The bitmap is only
/// read while the brightness is computed and is not retained.
///
/// Implémenté par : `Font8x8`.
///
/// # Example
/// ```
/// use at_core::traits::GlyphSource;
/// use at_core::frame::GlyphBitmap;
///
/// struct Solid;
/// impl GlyphSource for Solid {
///     fn glyph(&self, _ch: char) -> Option<GlyphBitmap> {
///         Some(GlyphBitmap::new(1, 1, vec![true]))
///     }
/// }
/// assert_eq!(Solid.glyph('x').map(|g| g.coverage()), Some(1.0));
/// ```
pub trait GlyphSource {
    /// Bitmap for `ch`, or `None` if the source cannot draw it.
    fn glyph(&self, ch: char) -> Option<GlyphBitmap>;
}

impl<G: GlyphSource + ?Sized> GlyphSource for &G {
    fn glyph(&self, ch: char) -> Option<GlyphBitmap> {
        (**self).glyph(ch)
    }
}
