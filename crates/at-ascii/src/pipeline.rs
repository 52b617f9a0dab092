use at_core::config::RoundPolicy;
use at_core::error::CoreError;
use at_core::frame::{CharGrid, FrameBuffer, TileGrid};
use at_core::traits::GlyphSource;

use crate::brightness_table::CharacterBrightnessTable;
use crate::geometry::{compute_tile_grid, pad_image};
use crate::matcher::BrightnessMatcher;
use crate::tile_cache::TileBrightnessCache;

/// Pipeline image → grille ASCII, avec cache de luminosité par tuile.
///
/// Padding, tiling and per-tile brightness are skipped entirely while the
/// cache is valid, so re-rendering the same image after a charset or policy
/// change only re-runs the matching step. The caller owns invalidation: call
/// [`RenderPipeline::invalidate_cache`] whenever the resolution (or the image)
/// changes.
///
/// # Example
/// ```
/// use at_ascii::brightness_table::CharacterBrightnessTable;
/// use at_ascii::pipeline::RenderPipeline;
/// use at_core::config::RoundPolicy;
/// use at_core::frame::FrameBuffer;
///
/// let mut table = CharacterBrightnessTable::new();
/// table.add_all([' ', '@']).unwrap();
/// let mut pipeline = RenderPipeline::new();
/// let image = FrameBuffer::filled(8, 8, (255, 255, 255));
/// let art = pipeline.render(&image, 2, &table, RoundPolicy::NearestEither).unwrap();
/// assert_eq!((art.width, art.height), (2, 2));
/// assert!(art.cells.iter().all(|&c| c == '@'));
/// ```
#[derive(Debug, Default)]
pub struct RenderPipeline {
    cache: TileBrightnessCache,
    invert: bool,
}

impl RenderPipeline {
    /// Pipeline with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: match `1 - brightness` instead of the tile brightness.
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Toggle inversion. Cached tile brightness stays valid.
    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Whether tile brightness is inverted before matching.
    #[must_use]
    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Drop the cached tile grid on the next render.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// The tile cache, for inspection.
    #[must_use]
    pub fn cache(&self) -> &TileBrightnessCache {
        &self.cache
    }

    /// Tile brightness grid of the last render, if still valid.
    #[must_use]
    pub fn last_tile_grid(&self) -> Option<&TileGrid> {
        self.cache.get()
    }

    /// Render `image` as `resolution` characters per row.
    ///
    /// Precondition: `resolution` is a power of two no larger than the padded
    /// width (the caller enforces this); violations are only caught by debug
    /// assertions.
    ///
    /// # Errors
    /// - [`CoreError::EmptyCharset`] if `table` is empty.
    /// - [`CoreError::InvalidDimensions`] if `image` has a zero dimension.
    pub fn render<G: GlyphSource>(
        &mut self,
        image: &FrameBuffer,
        resolution: u32,
        table: &CharacterBrightnessTable<G>,
        policy: RoundPolicy,
    ) -> Result<CharGrid, CoreError> {
        if table.is_empty() {
            return Err(CoreError::EmptyCharset);
        }
        if image.width == 0 || image.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: image.width,
                height: image.height,
            });
        }

        let mut refreshed = false;
        let tiles = self.cache.get_or_refresh(|| {
            refreshed = true;
            let padded = pad_image(image);
            compute_tile_grid(&padded, resolution)
        });
        if refreshed {
            log::debug!(
                "Luminosité recalculée : {}×{} tuiles (résolution {resolution})",
                tiles.cols,
                tiles.rows
            );
        } else {
            log::debug!("Luminosité des tuiles réutilisée depuis le cache");
        }
        debug_assert_eq!(
            tiles.cols, resolution,
            "cache périmé : invalidate_cache() manquant après changement de résolution"
        );

        let matcher = BrightnessMatcher::new(table);
        let mut art = CharGrid::new(tiles.cols, tiles.rows);
        for row in 0..tiles.rows {
            for col in 0..tiles.cols {
                let brightness = tiles.get(col, row);
                let target = if self.invert {
                    1.0 - brightness
                } else {
                    brightness
                };
                art.set(col, row, matcher.best_match(target, policy)?);
            }
        }
        Ok(art)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness_table::tests::Coverage;

    /// 8×8 image: left half black, right half white.
    fn split_image() -> FrameBuffer {
        let mut image = FrameBuffer::filled(8, 8, (255, 255, 255));
        for y in 0..8 {
            for x in 0..4 {
                image.set_pixel(x, y, (0, 0, 0));
            }
        }
        image
    }

    fn gradient_image(width: u32, height: u32) -> FrameBuffer {
        let mut image = FrameBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 255 / (width + height - 2).max(1)) as u8;
                image.set_pixel(x, y, (v, v / 2, 255 - v));
            }
        }
        image
    }

    fn dark_light() -> CharacterBrightnessTable<Coverage> {
        let mut table =
            CharacterBrightnessTable::with_glyphs(Coverage::of(&[('.', 5), ('#', 80)]));
        table.add_all(['.', '#']).unwrap();
        table
    }

    #[test]
    fn split_image_maps_halves() {
        let table = dark_light();
        let mut pipeline = RenderPipeline::new();
        let art = pipeline
            .render(&split_image(), 2, &table, RoundPolicy::NearestEither)
            .unwrap();
        assert_eq!((art.width, art.height), (2, 2));
        assert_eq!(art.get(0, 0), '.');
        assert_eq!(art.get(1, 0), '#');
        assert_eq!(art.get(0, 1), '.');
        assert_eq!(art.get(1, 1), '#');
    }

    #[test]
    fn invert_swaps_characters_but_not_cache() {
        let table = dark_light();
        let mut pipeline = RenderPipeline::new();
        let image = split_image();
        pipeline
            .render(&image, 2, &table, RoundPolicy::NearestEither)
            .unwrap();
        let before = pipeline.last_tile_grid().cloned();

        pipeline.set_invert(true);
        let art = pipeline
            .render(&image, 2, &table, RoundPolicy::NearestEither)
            .unwrap();
        assert_eq!(art.get(0, 0), '#');
        assert_eq!(art.get(1, 0), '.');
        assert_eq!(pipeline.last_tile_grid().cloned(), before);
    }

    #[test]
    fn cached_grid_survives_charset_edits() {
        let mut table = CharacterBrightnessTable::new();
        table.add_range('0'..='9').unwrap();
        let image = gradient_image(30, 20);
        let mut pipeline = RenderPipeline::new();

        pipeline
            .render(&image, 8, &table, RoundPolicy::NearestEither)
            .unwrap();
        let first = pipeline.last_tile_grid().cloned().unwrap();

        table.add_range('a'..='z').unwrap();
        table.remove('5');
        pipeline
            .render(&image, 8, &table, RoundPolicy::NearestAbove)
            .unwrap();
        let second = pipeline.last_tile_grid().cloned().unwrap();

        assert_eq!(first, second);
        let fresh = compute_tile_grid(&pad_image(&image), 8);
        assert_eq!(second, fresh);
    }

    #[test]
    fn valid_cache_skips_recomputation() {
        let table = dark_light();
        let mut pipeline = RenderPipeline::new();
        let black = FrameBuffer::filled(8, 8, (0, 0, 0));
        let white = FrameBuffer::filled(8, 8, (255, 255, 255));

        let first = pipeline
            .render(&black, 4, &table, RoundPolicy::NearestEither)
            .unwrap();
        // Without invalidation the cached (black) brightness is reused.
        let reused = pipeline
            .render(&white, 4, &table, RoundPolicy::NearestEither)
            .unwrap();
        assert_eq!(first, reused);

        pipeline.invalidate_cache();
        let fresh = pipeline
            .render(&white, 4, &table, RoundPolicy::NearestEither)
            .unwrap();
        assert!(fresh.cells.iter().all(|&c| c == '#'));
    }

    #[test]
    fn resolution_change_recomputes_after_invalidation() {
        let table = dark_light();
        let image = gradient_image(16, 16);
        let mut pipeline = RenderPipeline::new();

        let small = pipeline
            .render(&image, 4, &table, RoundPolicy::NearestEither)
            .unwrap();
        assert_eq!((small.width, small.height), (4, 4));

        pipeline.invalidate_cache();
        let large = pipeline
            .render(&image, 8, &table, RoundPolicy::NearestEither)
            .unwrap();
        assert_eq!((large.width, large.height), (8, 8));
        assert_eq!(
            pipeline.last_tile_grid().map(TileGrid::shape),
            Some((8, 8))
        );
        assert_eq!(
            pipeline.last_tile_grid().cloned(),
            Some(compute_tile_grid(&pad_image(&image), 8))
        );
    }

    #[test]
    fn non_square_image_is_padded_before_tiling() {
        let table = dark_light();
        let image = FrameBuffer::filled(100, 50, (0, 0, 0));
        let mut pipeline = RenderPipeline::new();
        let art = pipeline
            .render(&image, 4, &table, RoundPolicy::NearestEither)
            .unwrap();
        // 128×64 padded, 32-pixel tiles.
        assert_eq!((art.width, art.height), (4, 2));
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = CharacterBrightnessTable::new();
        let mut pipeline = RenderPipeline::new();
        let err = pipeline
            .render(&split_image(), 2, &table, RoundPolicy::NearestEither)
            .unwrap_err();
        assert_eq!(err, CoreError::EmptyCharset);
        assert!(!pipeline.cache().is_valid());
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let table = dark_light();
        let mut pipeline = RenderPipeline::new();
        let err = pipeline
            .render(&FrameBuffer::new(0, 4), 1, &table, RoundPolicy::NearestEither)
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidDimensions { width: 0, height: 4 });
    }
}
