use at_core::config::RoundPolicy;
use at_core::error::CoreError;
use at_core::traits::GlyphSource;

use crate::brightness_table::CharacterBrightnessTable;

/// Résout une luminosité normalisée vers le caractère le plus proche.
///
/// Stateless: it borrows the table and takes the policy per call. When
/// several characters are equally close the lowest character code wins.
///
/// # Example
/// ```
/// use at_ascii::brightness_table::CharacterBrightnessTable;
/// use at_ascii::matcher::BrightnessMatcher;
/// use at_core::config::RoundPolicy;
///
/// let mut table = CharacterBrightnessTable::new();
/// table.add_all([' ', '@']).unwrap();
/// let matcher = BrightnessMatcher::new(&table);
/// assert_eq!(matcher.best_match(0.0, RoundPolicy::NearestEither).unwrap(), ' ');
/// assert_eq!(matcher.best_match(1.0, RoundPolicy::NearestEither).unwrap(), '@');
/// ```
pub struct BrightnessMatcher<'a, G> {
    table: &'a CharacterBrightnessTable<G>,
}

impl<'a, G: GlyphSource> BrightnessMatcher<'a, G> {
    /// Borrow `table` for matching.
    #[must_use]
    pub fn new(table: &'a CharacterBrightnessTable<G>) -> Self {
        Self { table }
    }

    /// Best character for `target` (normalized, in [0, 1]) under `policy`.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCharset`] if the table has no entries.
    pub fn best_match(&self, target: f32, policy: RoundPolicy) -> Result<char, CoreError> {
        // (char, normalized) of the closest entry on each side.
        let mut above: Option<(char, f32)> = None;
        let mut below: Option<(char, f32)> = None;

        for (ch, entry) in self.table.entries() {
            let value = entry.normalized;
            if value == target {
                return Ok(ch);
            }
            if value > target && above.is_none_or(|(_, best)| value < best) {
                above = Some((ch, value));
            }
            if value < target && below.is_none_or(|(_, best)| value > best) {
                below = Some((ch, value));
            }
        }

        let picked = match (above, below, policy) {
            (None, None, _) => return Err(CoreError::EmptyCharset),
            (Some((ch, _)), None, _) | (None, Some((ch, _)), _) => ch,
            (Some((up, _)), Some(_), RoundPolicy::NearestAbove) => up,
            (Some(_), Some((down, _)), RoundPolicy::NearestBelow) => down,
            (Some((up, up_val)), Some((down, down_val)), RoundPolicy::NearestEither) => {
                let d_up = up_val - target;
                let d_down = target - down_val;
                if d_up < d_down {
                    up
                } else if d_down < d_up {
                    down
                } else {
                    up.min(down)
                }
            }
        };
        Ok(picked)
    }
}
