use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use at_core::charset::ordered_range;
use at_core::error::CoreError;
use at_core::traits::GlyphSource;

use crate::glyph::Font8x8;

/// Raw and normalized brightness of one character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrightnessEntry {
    /// Fraction of foreground pixels in the glyph, in [0, 1].
    pub raw: f32,
    /// `raw` rescaled against the current min/max of the set.
    pub normalized: f32,
}

/// Jeu de caractères dynamique avec luminosité normalisée maintenue en continu.
///
/// Normalization is relative to the whole set: once at least two distinct raw
/// values exist, the dimmest character sits at 0 and the brightest at 1. An
/// insertion that widens the range or a removal of an extreme renormalizes
/// every entry; anything else touches only the affected entry.
///
/// # Example
/// ```
/// use at_ascii::brightness_table::CharacterBrightnessTable;
/// let mut table = CharacterBrightnessTable::new();
/// table.add_all("0123456789".chars()).unwrap();
/// assert_eq!(table.len(), 10);
/// assert!(table.contains('5'));
/// ```
#[derive(Clone, Debug)]
pub struct CharacterBrightnessTable<G = Font8x8> {
    glyphs: G,
    entries: BTreeMap<char, BrightnessEntry>,
    /// `(min, max)` raw brightness; `None` when empty.
    range: Option<(f32, f32)>,
}

impl CharacterBrightnessTable<Font8x8> {
    /// Empty table backed by the built-in 8×8 font.
    #[must_use]
    pub fn new() -> Self {
        Self::with_glyphs(Font8x8)
    }
}

impl Default for CharacterBrightnessTable<Font8x8> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GlyphSource> CharacterBrightnessTable<G> {
    /// Empty table backed by a custom glyph provider.
    #[must_use]
    pub fn with_glyphs(glyphs: G) -> Self {
        Self {
            glyphs,
            entries: BTreeMap::new(),
            range: None,
        }
    }

    /// Insert `ch`. Re-adding a present character leaves the table unchanged.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingGlyph`] if the glyph provider cannot draw `ch`.
    pub fn add(&mut self, ch: char) -> Result<(), CoreError> {
        if self.entries.contains_key(&ch) {
            return Ok(());
        }
        let raw = self
            .glyphs
            .glyph(ch)
            .ok_or(CoreError::MissingGlyph { ch })?
            .coverage();

        match self.range {
            None => {
                self.range = Some((raw, raw));
                self.entries.insert(
                    ch,
                    BrightnessEntry {
                        raw,
                        normalized: raw,
                    },
                );
            }
            Some((min, max)) if raw < min || raw > max => {
                self.range = Some((min.min(raw), max.max(raw)));
                self.entries.insert(
                    ch,
                    BrightnessEntry {
                        raw,
                        normalized: raw,
                    },
                );
                self.renormalize_all();
            }
            Some(_) => {
                let normalized = self.normalize(raw);
                self.entries.insert(ch, BrightnessEntry { raw, normalized });
            }
        }
        Ok(())
    }

    /// Remove `ch`. Absent characters are ignored.
    pub fn remove(&mut self, ch: char) {
        let Some(removed) = self.entries.remove(&ch) else {
            return;
        };
        let Some((min, max)) = self.range else {
            return;
        };
        if removed.raw != min && removed.raw != max {
            return;
        }

        self.range = self.entries.values().fold(None, |acc, e| match acc {
            None => Some((e.raw, e.raw)),
            Some((lo, hi)) => Some((lo.min(e.raw), hi.max(e.raw))),
        });

        match self.entries.len() {
            0 => {}
            1 => {
                for entry in self.entries.values_mut() {
                    entry.normalized = entry.raw;
                }
            }
            _ => self.renormalize_all(),
        }
    }

    /// Add every character of `chars`, stopping at the first failure.
    ///
    /// # Errors
    /// Propagates [`CoreError::MissingGlyph`].
    pub fn add_all(&mut self, chars: impl IntoIterator<Item = char>) -> Result<(), CoreError> {
        for ch in chars {
            self.add(ch)?;
        }
        Ok(())
    }

    /// Add a contiguous code range. Endpoints may be given in either order.
    ///
    /// # Errors
    /// Propagates [`CoreError::MissingGlyph`].
    pub fn add_range(&mut self, range: RangeInclusive<char>) -> Result<(), CoreError> {
        self.add_all(ordered_range(*range.start(), *range.end()))
    }

    /// Remove a contiguous code range. Endpoints may be given in either order.
    pub fn remove_range(&mut self, range: RangeInclusive<char>) {
        for ch in ordered_range(*range.start(), *range.end()) {
            self.remove(ch);
        }
    }

    /// True if `ch` is in the set.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Number of characters in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Characters in ascending code order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    /// `(char, entry)` pairs in ascending code order.
    pub fn entries(&self) -> impl Iterator<Item = (char, BrightnessEntry)> + '_ {
        self.entries.iter().map(|(&c, &e)| (c, e))
    }

    /// Entry for `ch`.
    #[must_use]
    pub fn entry(&self, ch: char) -> Option<BrightnessEntry> {
        self.entries.get(&ch).copied()
    }

    /// Normalized brightness of `ch`.
    #[must_use]
    pub fn normalized(&self, ch: char) -> Option<f32> {
        self.entries.get(&ch).map(|e| e.normalized)
    }

    /// Raw brightness of `ch`.
    #[must_use]
    pub fn raw(&self, ch: char) -> Option<f32> {
        self.entries.get(&ch).map(|e| e.raw)
    }

    /// Current `(min, max)` raw brightness, `None` when empty.
    #[must_use]
    pub fn range(&self) -> Option<(f32, f32)> {
        self.range
    }

    /// Linear stretch against the current range. A flat range returns `raw` as is.
    fn normalize(&self, raw: f32) -> f32 {
        match self.range {
            Some((min, max)) if max > min => (raw - min) / (max - min),
            _ => raw,
        }
    }

    fn renormalize_all(&mut self) {
        let Some((min, max)) = self.range else {
            return;
        };
        log::debug!(
            "Renormalisation complète : {} caractères, plage [{min}, {max}]",
            self.entries.len()
        );
        let span = max - min;
        for entry in self.entries.values_mut() {
            entry.normalized = if span > 0.0 {
                (entry.raw - min) / span
            } else {
                entry.raw
            };
        }
    }
}
